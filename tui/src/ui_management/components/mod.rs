mod component;
pub mod input_box;
pub mod option_bar;
pub mod usage;

pub use component::{Component, ComponentRender};
