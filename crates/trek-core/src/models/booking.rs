//! Booking ledger models
//!
//! One row per reservation. Lifecycle is the product of two explicit
//! states: {Active, Cancelled} x {Unpaid, Paid}. Cancellation is a soft
//! delete; rows are never physically removed. Payment flips once and is
//! never reversed. A cancelled booking may keep `Paid` (refunds are out
//! of scope), but a cancelled booking can no longer be paid.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Hotel, Tour, Traveler};

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booking holds an inventory unit and shows in the owner's list
    #[default]
    Active,
    /// Soft-deleted; hidden from the owner's list, kept for the report
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Active => write!(f, "active"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl BookingStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(BookingStatus::Active),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Check whether the booking still holds its inventory unit
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Active)
    }
}

/// Payment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting the payment stub
    #[default]
    Unpaid,
    /// Marked paid; never reversed
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

impl PaymentStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unpaid" => Some(PaymentStatus::Unpaid),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    /// Check whether payment has completed
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

/// Booking kind, as routed through the payment stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// Single hotel reservation
    Hotel,
    /// Single tour reservation
    Tour,
    /// Bundled hotel + tour reservation under one ledger row
    Package,
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingKind::Hotel => write!(f, "hotel"),
            BookingKind::Tour => write!(f, "tour"),
            BookingKind::Package => write!(f, "package"),
        }
    }
}

impl BookingKind {
    /// Parse from string (the `booking_type` request parameter)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hotel" => Some(BookingKind::Hotel),
            "tour" => Some(BookingKind::Tour),
            "package" => Some(BookingKind::Package),
            _ => None,
        }
    }
}

/// Hotel booking ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelBooking {
    /// Unique identifier
    pub id: Uuid,

    /// Owning traveler
    pub user_id: Uuid,

    /// Booked hotel
    pub hotel_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Lifecycle state
    pub status: BookingStatus,

    /// Payment state
    pub payment: PaymentStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl HotelBooking {
    /// Create a new active, unpaid booking
    pub fn new(user_id: Uuid, hotel_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            hotel_id,
            check_in,
            check_out,
            status: BookingStatus::Active,
            payment: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tour booking ledger row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourBooking {
    /// Unique identifier
    pub id: Uuid,

    /// Owning traveler
    pub user_id: Uuid,

    /// Booked tour
    pub tour_id: Uuid,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,

    /// Lifecycle state
    pub status: BookingStatus,

    /// Payment state
    pub payment: PaymentStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TourBooking {
    /// Create a new active, unpaid booking
    pub fn new(user_id: Uuid, tour_id: Uuid, tour_start: NaiveDate, tour_end: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            tour_id,
            tour_start,
            tour_end,
            status: BookingStatus::Active,
            payment: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Package booking ledger row
///
/// Bundles one hotel stay and one tour under a single lifecycle pair;
/// the package holds one unit of each inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageBooking {
    /// Unique identifier
    pub id: Uuid,

    /// Owning traveler
    pub user_id: Uuid,

    /// Booked hotel
    pub hotel_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Booked tour
    pub tour_id: Uuid,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,

    /// Lifecycle state
    pub status: BookingStatus,

    /// Payment state
    pub payment: PaymentStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl PackageBooking {
    /// Create a new active, unpaid package booking
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        hotel_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        tour_id: Uuid,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            hotel_id,
            check_in,
            check_out,
            tour_id,
            tour_start,
            tour_end,
            status: BookingStatus::Active,
            payment: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Hotel booking joined with its inventory (and, for the report, its owner)
#[derive(Debug, Clone, Serialize)]
pub struct HotelBookingDetail {
    pub booking: HotelBooking,
    pub hotel: Hotel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traveler: Option<Traveler>,
}

/// Tour booking joined with its inventory (and, for the report, its owner)
#[derive(Debug, Clone, Serialize)]
pub struct TourBookingDetail {
    pub booking: TourBooking,
    pub tour: Tour,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traveler: Option<Traveler>,
}

/// Package booking joined with both inventory items (and owner for the report)
#[derive(Debug, Clone, Serialize)]
pub struct PackageBookingDetail {
    pub booking: PackageBooking,
    pub hotel: Hotel,
    pub tour: Tour,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traveler: Option<Traveler>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_booking_starts_active_unpaid() {
        let b = HotelBooking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            date(2024, 1, 5),
            date(2024, 1, 10),
        );
        assert!(b.status.is_active());
        assert!(!b.payment.is_paid());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(BookingStatus::from_str("active"), Some(BookingStatus::Active));
        assert_eq!(
            BookingStatus::from_str("Cancelled"),
            Some(BookingStatus::Cancelled)
        );
        assert_eq!(BookingStatus::from_str("deleted"), None);

        assert_eq!(PaymentStatus::from_str("paid"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_str("unpaid"), Some(PaymentStatus::Unpaid));
        assert_eq!(PaymentStatus::from_str("refunded"), None);
    }

    #[test]
    fn test_booking_kind_parsing() {
        assert_eq!(BookingKind::from_str("hotel"), Some(BookingKind::Hotel));
        assert_eq!(BookingKind::from_str("tour"), Some(BookingKind::Tour));
        assert_eq!(BookingKind::from_str("package"), Some(BookingKind::Package));
        assert_eq!(BookingKind::from_str("cruise"), None);
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in [BookingKind::Hotel, BookingKind::Tour, BookingKind::Package] {
            assert_eq!(BookingKind::from_str(&kind.to_string()), Some(kind));
        }
    }
}
