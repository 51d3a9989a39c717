//! Common traits for repositories
//!
//! Defines abstractions for database access. Inventory and availability
//! windows are seed data, so their repositories are read-only; all
//! counter mutation goes through the booking engine's transactions.

use crate::error::AppError;
use crate::models::{
    Hotel, HotelBookingDetail, HotelDiscount, PackageBookingDetail, RoomType, Tour,
    TourBookingDetail,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Hotel availability search
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Find every hotel of the given room type with at least one availability
    /// window fully containing `[check_in, check_out]` and positive remaining
    /// capacity. De-duplicated: a hotel with several matching windows appears
    /// once.
    async fn find_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: RoomType,
    ) -> Result<Vec<Hotel>, AppError>;
}

/// Tour availability search
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Find every tour with a window fully containing `[start, end]` and
    /// positive remaining capacity, de-duplicated.
    async fn find_available(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Tour>, AppError>;
}

/// Hotel discount lookup
#[async_trait]
pub trait HotelDiscountRepository: Send + Sync {
    /// All discount rows (display data)
    async fn list_all(&self) -> Result<Vec<HotelDiscount>, AppError>;
}

/// Hotel booking ledger access
#[async_trait]
pub trait HotelBookingRepository: Send + Sync {
    /// The owner's active (non-cancelled) bookings with hotels joined in
    async fn list_active_for_user(&self, user_id: Uuid)
        -> Result<Vec<HotelBookingDetail>, AppError>;

    /// Every booking across all users, cancelled included, with hotel and
    /// traveler joined in (staff report)
    async fn list_report(&self) -> Result<Vec<HotelBookingDetail>, AppError>;
}

/// Tour booking ledger access
#[async_trait]
pub trait TourBookingRepository: Send + Sync {
    /// The owner's active bookings with tours joined in
    async fn list_active_for_user(&self, user_id: Uuid)
        -> Result<Vec<TourBookingDetail>, AppError>;

    /// Every booking across all users with tour and traveler joined in
    async fn list_report(&self) -> Result<Vec<TourBookingDetail>, AppError>;
}

/// Package booking ledger access
#[async_trait]
pub trait PackageBookingRepository: Send + Sync {
    /// The owner's active bookings with hotel and tour joined in
    async fn list_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PackageBookingDetail>, AppError>;

    /// Every booking across all users with inventory and traveler joined in
    async fn list_report(&self) -> Result<Vec<PackageBookingDetail>, AppError>;
}
