//! Domain models for Trek Booking
//!
//! This module contains all the core domain models used throughout the application.

pub mod booking;
pub mod discount;
pub mod hotel;
pub mod tour;
pub mod user;

pub use booking::{
    BookingKind, BookingStatus, HotelBooking, HotelBookingDetail, PackageBooking,
    PackageBookingDetail, PaymentStatus, TourBooking, TourBookingDetail,
};
pub use discount::HotelDiscount;
pub use hotel::{Hotel, RoomType};
pub use tour::Tour;
pub use user::{Traveler, UserRole};
