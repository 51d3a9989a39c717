//! Trek Booking Database Layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the Trek Booking system. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for inventory, availability, and booking ledgers
//! - Availability queries with date-containment and capacity filtering
//! - Schema migrations under `migrations/`

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::{PgPool, Postgres, Transaction};
pub use trek_core::{AppError, AppResult};
