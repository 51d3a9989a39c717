//! Business logic services for Trek Booking
//!
//! This crate contains the booking rules that sit between the HTTP
//! handlers and the repositories.
//!
//! # Architecture
//!
//! - The engine owns a connection pool and runs every mutating operation
//!   inside a single transaction
//! - Capacity moves only through guarded conditional updates, so two
//!   concurrent bookings can never both take the last unit
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `BookingEngine` - booking creation, reschedule, cancellation, and the
//!   payment stub for hotels, tours, and packages

pub mod booking_engine;

pub use booking_engine::BookingEngine;
