//! Repository implementations
//!
//! This module contains concrete implementations of all repository traits
//! defined in trek-core, using sqlx for PostgreSQL access.

pub mod discount_repo;
pub mod hotel_booking_repo;
pub mod hotel_repo;
pub mod package_booking_repo;
pub mod tour_booking_repo;
pub mod tour_repo;

pub use discount_repo::PgHotelDiscountRepository;
pub use hotel_booking_repo::PgHotelBookingRepository;
pub use hotel_repo::PgHotelRepository;
pub use package_booking_repo::PgPackageBookingRepository;
pub use tour_booking_repo::PgTourBookingRepository;
pub use tour_repo::PgTourRepository;
