pub mod components;
mod pages;
mod ui_manager;

pub use ui_manager::UiManager;
