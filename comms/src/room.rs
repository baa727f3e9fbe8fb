use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Capacity used when the transport type is not one we know about
pub const DEFAULT_CAPACITY: u32 = 4;

/// The kind of ride a room is organised around. Determines the room capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Bike,
    Car,
    Location,
    Bus,
}

impl TransportType {
    pub const ALL: [TransportType; 4] = [
        TransportType::Bike,
        TransportType::Car,
        TransportType::Location,
        TransportType::Bus,
    ];

    /// Maximum number of participants (driver included) in a room of this type
    pub fn capacity(&self) -> u32 {
        match self {
            TransportType::Bike => 2,
            TransportType::Car => 4,
            TransportType::Location => 10,
            TransportType::Bus => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Bike => "bike",
            TransportType::Car => "car",
            TransportType::Location => "location",
            TransportType::Bus => "bus",
        }
    }
}

/// Capacity for a transport type as it appears on the wire.
/// Unknown values fall back to [DEFAULT_CAPACITY].
pub fn capacity_for_raw(raw: &str) -> u32 {
    raw.parse::<TransportType>()
        .map(|transport_type| transport_type.capacity())
        .unwrap_or(DEFAULT_CAPACITY)
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(TransportType::Bike),
            "car" => Ok(TransportType::Car),
            "location" => Ok(TransportType::Location),
            "bus" => Ok(TransportType::Bus),
            other => Err(anyhow::anyhow!("unknown transport type: {}", other)),
        }
    }
}

/// The role a user takes in a room. Drivers create rooms, passengers join them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Driver,
    Passenger,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Driver, UserType::Passenger];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Driver => "driver",
            UserType::Passenger => "passenger",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(UserType::Driver),
            "passenger" => Ok(UserType::Passenger),
            other => Err(anyhow::anyhow!("unknown user type: {}", other)),
        }
    }
}
