//! Hotel inventory model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Room type offered by a hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoomType {
    /// Single room
    #[default]
    #[serde(rename = "single")]
    Single,
    /// Double room
    #[serde(rename = "double")]
    Double,
    /// Family suite
    #[serde(rename = "family suite")]
    FamilySuite,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomType::Single => write!(f, "single"),
            RoomType::Double => write!(f, "double"),
            RoomType::FamilySuite => write!(f, "family suite"),
        }
    }
}

impl RoomType {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" => Some(RoomType::Single),
            "double" => Some(RoomType::Double),
            "family suite" | "family_suite" => Some(RoomType::FamilySuite),
            _ => None,
        }
    }

    /// All room types, in display order
    pub fn all() -> [RoomType; 3] {
        [RoomType::Single, RoomType::Double, RoomType::FamilySuite]
    }
}

/// Hotel inventory entity
///
/// `available_spaces` is the remaining bookable capacity and is only ever
/// mutated through the guarded decrement/increment queries in the booking
/// engine. It must never go negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    /// Unique identifier
    pub id: Uuid,

    /// Hotel name
    pub name: String,

    /// City/location
    pub location: String,

    /// Room type this inventory row sells
    pub room_type: RoomType,

    /// Price per stay
    pub cost: Decimal,

    /// Remaining bookable units
    pub available_spaces: i32,
}

impl Hotel {
    /// Check whether any units remain
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.available_spaces > 0
    }
}
