//! Booking DTOs
//!
//! Request and response types for booking creation, reschedule, and the
//! traveler's own booking list.

use crate::dto::search::{HotelResponse, TourResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use trek_core::models::{
    HotelBooking, HotelBookingDetail, PackageBooking, PackageBookingDetail, TourBooking,
    TourBookingDetail,
};
use uuid::Uuid;

/// Hotel booking creation request
#[derive(Debug, Clone, Deserialize)]
pub struct HotelBookingRequest {
    /// Hotel to book
    pub hotel_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,
}

/// Tour booking creation request
#[derive(Debug, Clone, Deserialize)]
pub struct TourBookingRequest {
    /// Tour to book
    pub tour_id: Uuid,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,
}

/// Package booking creation request (one hotel stay + one tour)
#[derive(Debug, Clone, Deserialize)]
pub struct PackageBookingRequest {
    /// Hotel to book
    pub hotel_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Tour to book
    pub tour_id: Uuid,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,
}

/// Hotel booking reschedule request
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleStayRequest {
    /// New check-in date
    pub check_in: NaiveDate,

    /// New check-out date
    pub check_out: NaiveDate,
}

/// Tour booking reschedule request
#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleTourRequest {
    /// New tour start date
    pub tour_start: NaiveDate,

    /// New tour end date
    pub tour_end: NaiveDate,
}

/// Package booking reschedule request; both legs move together
#[derive(Debug, Clone, Deserialize)]
pub struct ReschedulePackageRequest {
    /// New check-in date
    pub check_in: NaiveDate,

    /// New check-out date
    pub check_out: NaiveDate,

    /// New tour start date
    pub tour_start: NaiveDate,

    /// New tour end date
    pub tour_end: NaiveDate,
}

/// Hotel booking response
///
/// `booking_type` is echoed so the client can route the follow-up
/// payment request without guessing.
#[derive(Debug, Clone, Serialize)]
pub struct HotelBookingResponse {
    /// Booking ID
    pub id: Uuid,

    /// Booking kind, always "hotel"
    pub booking_type: String,

    /// Booked hotel
    pub hotel_id: Uuid,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Lifecycle state
    pub status: String,

    /// Payment state
    pub payment: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<HotelBooking> for HotelBookingResponse {
    fn from(booking: HotelBooking) -> Self {
        Self {
            id: booking.id,
            booking_type: "hotel".to_string(),
            hotel_id: booking.hotel_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            status: booking.status.to_string(),
            payment: booking.payment.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Tour booking response
#[derive(Debug, Clone, Serialize)]
pub struct TourBookingResponse {
    /// Booking ID
    pub id: Uuid,

    /// Booking kind, always "tour"
    pub booking_type: String,

    /// Booked tour
    pub tour_id: Uuid,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,

    /// Lifecycle state
    pub status: String,

    /// Payment state
    pub payment: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<TourBooking> for TourBookingResponse {
    fn from(booking: TourBooking) -> Self {
        Self {
            id: booking.id,
            booking_type: "tour".to_string(),
            tour_id: booking.tour_id,
            tour_start: booking.tour_start,
            tour_end: booking.tour_end,
            status: booking.status.to_string(),
            payment: booking.payment.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Package booking response
#[derive(Debug, Clone, Serialize)]
pub struct PackageBookingResponse {
    /// Booking ID
    pub id: Uuid,

    /// Booking kind, always "package"
    pub booking_type: String,

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
    pub status: String,

    /// Payment state
    pub payment: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<PackageBooking> for PackageBookingResponse {
    fn from(booking: PackageBooking) -> Self {
        Self {
            id: booking.id,
            booking_type: "package".to_string(),
            hotel_id: booking.hotel_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            tour_id: booking.tour_id,
            tour_start: booking.tour_start,
            tour_end: booking.tour_end,
            status: booking.status.to_string(),
            payment: booking.payment.to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Hotel booking entry in the traveler's own list, inventory joined in
#[derive(Debug, Clone, Serialize)]
pub struct HotelBookingItem {
    /// Booking ID
    pub id: Uuid,

    /// Booked hotel
    pub hotel: HotelResponse,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Payment state
    pub payment: String,
}

impl From<HotelBookingDetail> for HotelBookingItem {
    fn from(detail: HotelBookingDetail) -> Self {
        Self {
            id: detail.booking.id,
            hotel: detail.hotel.into(),
            check_in: detail.booking.check_in,
            check_out: detail.booking.check_out,
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// Tour booking entry in the traveler's own list
#[derive(Debug, Clone, Serialize)]
pub struct TourBookingItem {
    /// Booking ID
    pub id: Uuid,

    /// Booked tour
    pub tour: TourResponse,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,

    /// Payment state
    pub payment: String,
}

impl From<TourBookingDetail> for TourBookingItem {
    fn from(detail: TourBookingDetail) -> Self {
        Self {
            id: detail.booking.id,
            tour: detail.tour.into(),
            tour_start: detail.booking.tour_start,
            tour_end: detail.booking.tour_end,
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// Package booking entry in the traveler's own list
#[derive(Debug, Clone, Serialize)]
pub struct PackageBookingItem {
    /// Booking ID
    pub id: Uuid,

    /// Booked hotel
    pub hotel: HotelResponse,

    /// Check-in date
    pub check_in: NaiveDate,

    /// Check-out date
    pub check_out: NaiveDate,

    /// Booked tour
    pub tour: TourResponse,

    /// Tour start date
    pub tour_start: NaiveDate,

    /// Tour end date
    pub tour_end: NaiveDate,

    /// Payment state
    pub payment: String,
}

impl From<PackageBookingDetail> for PackageBookingItem {
    fn from(detail: PackageBookingDetail) -> Self {
        Self {
            id: detail.booking.id,
            hotel: detail.hotel.into(),
            check_in: detail.booking.check_in,
            check_out: detail.booking.check_out,
            tour: detail.tour.into(),
            tour_start: detail.booking.tour_start,
            tour_end: detail.booking.tour_end,
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// The traveler's active bookings, grouped by kind
///
/// Cancelled bookings never appear here; they remain visible only in
/// the staff report.
#[derive(Debug, Clone, Serialize)]
pub struct MyBookingsResponse {
    pub hotel_bookings: Vec<HotelBookingItem>,
    pub tour_bookings: Vec<TourBookingItem>,
    pub package_bookings: Vec<PackageBookingItem>,
}
