/// Transport types, user roles and the room capacity table
pub mod room;
/// Request bodies and query strings the backend accepts
pub mod request;
/// Response bodies the backend replies with
pub mod response;
/// Implementation of the room requests over HTTP.
/// Requires the 'client' feature to be enabled and will bring in reqwest alongside with other dependencies
pub mod transport;
