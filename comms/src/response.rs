use serde::{Deserialize, Serialize};

/// Reply to `GET /rooms/random`. A missing or empty `room` means no match.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomRoomResponse {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Successful reply to `POST /rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub capacity: u32,
}

/// Body of a rejected request, `detail` is meant to be shown to the user verbatim
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Interpreted result of a random room lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RandomRoomOutcome {
    Found { room: String, capacity: u32 },
    NoneAvailable,
}

/// Interpreted result of a room creation
#[derive(Debug, Clone, PartialEq)]
pub enum CreateRoomOutcome {
    Created { capacity: u32 },
    Rejected { detail: String },
}

impl RandomRoomResponse {
    /// Interprets the reply. `fallback_capacity` is used when a room is found but the
    /// backend left out its capacity.
    pub fn into_outcome(self, fallback_capacity: u32) -> RandomRoomOutcome {
        match self.room {
            Some(room) if !room.is_empty() => RandomRoomOutcome::Found {
                room,
                capacity: self.capacity.unwrap_or(fallback_capacity),
            },
            _ => RandomRoomOutcome::NoneAvailable,
        }
    }
}
