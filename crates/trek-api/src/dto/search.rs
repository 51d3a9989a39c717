//! Search DTOs
//!
//! Query parameters and response types for the hotel and tour
//! availability searches and the discount listing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trek_core::models::{Hotel, HotelDiscount, Tour};
use uuid::Uuid;

/// Hotel search query parameters
///
/// A hotel matches when one of its availability windows fully contains
/// `[check_in, check_out]`, its room type equals `room_type`, and it has
/// spaces left.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchParams {
    /// Desired check-in date (YYYY-MM-DD)
    pub check_in: NaiveDate,

    /// Desired check-out date (YYYY-MM-DD)
    pub check_out: NaiveDate,

    /// Room type: "single", "double", or "family suite"
    pub room_type: String,
}

/// Tour search query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct TourSearchParams {
    /// Desired tour start date (YYYY-MM-DD)
    pub start_date: NaiveDate,

    /// Desired tour end date (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// Hotel search result entry
#[derive(Debug, Clone, Serialize)]
pub struct HotelResponse {
    /// Hotel ID
    pub id: Uuid,

    /// Hotel name
    pub name: String,

    /// City or region
    pub location: String,

    /// Room type offered
    pub room_type: String,

    /// Cost per stay
    pub cost: Decimal,

    /// Remaining bookable units
    pub available_spaces: i32,
}

impl From<Hotel> for HotelResponse {
    fn from(hotel: Hotel) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name,
            location: hotel.location,
            room_type: hotel.room_type.to_string(),
            cost: hotel.cost,
            available_spaces: hotel.available_spaces,
        }
    }
}

/// Tour search result entry
#[derive(Debug, Clone, Serialize)]
pub struct TourResponse {
    /// Tour ID
    pub id: Uuid,

    /// Tour name
    pub name: String,

    /// City or region
    pub location: String,

    /// Cost per seat
    pub cost: Decimal,

    /// Remaining bookable seats
    pub available_spaces: i32,
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id,
            name: tour.name,
            location: tour.location,
            cost: tour.cost,
            available_spaces: tour.available_spaces,
        }
    }
}

/// Hotel discount entry (display data)
#[derive(Debug, Clone, Serialize)]
pub struct DiscountResponse {
    /// Discount ID
    pub id: Uuid,

    /// Room type the discount applies to
    pub room_type: String,

    /// Discount percentage
    pub percentage: i32,
}

impl From<HotelDiscount> for DiscountResponse {
    fn from(discount: HotelDiscount) -> Self {
        Self {
            id: discount.id,
            room_type: discount.room_type.to_string(),
            percentage: discount.percentage,
        }
    }
}
