//! Tour inventory model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tour inventory entity
///
/// Same capacity rules as [`super::Hotel`]: `available_spaces` moves only
/// through the booking engine's guarded queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    /// Unique identifier
    pub id: Uuid,

    /// Tour name
    pub name: String,

    /// Region/location
    pub location: String,

    /// Price per seat
    pub cost: Decimal,

    /// Remaining bookable seats
    pub available_spaces: i32,
}

impl Tour {
    /// Check whether any seats remain
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.available_spaces > 0
    }
}
