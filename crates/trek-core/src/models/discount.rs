//! Hotel discount lookup table
//!
//! Display-only data: the percentage is shown alongside package search
//! results and never feeds into the booking rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RoomType;

/// Room-type discount entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDiscount {
    /// Unique identifier
    pub id: Uuid,

    /// Discounted room type
    pub room_type: RoomType,

    /// Markdown percentage (0-100)
    pub percentage: i32,
}
