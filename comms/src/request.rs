use serde::{Deserialize, Serialize};

use crate::room::{TransportType, UserType};

/// Query for `GET /rooms/random`.
/// Asks the backend for any open room matching the transport type and role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomRoomQuery {
    pub transport_type: TransportType,
    pub user_type: UserType,
}

/// Body for `POST /rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    // The room identifier, the display name is reused as-is.
    pub room_name: String,
    pub transport_type: TransportType,
    // Derived from the transport type on the client side.
    pub capacity: u32,
    pub creator_type: UserType,
    pub display_name: String,
}

impl CreateRoomRequest {
    /// Builds a creation request for a room whose identifier is its display name.
    pub fn new(display_name: &str, transport_type: TransportType, creator_type: UserType) -> Self {
        CreateRoomRequest {
            room_name: String::from(display_name),
            transport_type,
            capacity: transport_type.capacity(),
            creator_type,
            display_name: String::from(display_name),
        }
    }
}
