/// HTTP implementation for a client to be able to request rooms from the backend
#[cfg(feature = "client")]
pub mod client;
