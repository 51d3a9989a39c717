//! HTTP API layer for Trek Booking
//!
//! Request/response DTOs and actix-web handlers for the public JSON API.
//! All endpoints live under `/api/v1` and require an authenticated
//! traveler; the staff report additionally requires the staff role.
//!
//! # Modules
//!
//! - `dto` - Request and response types
//! - `handlers` - HTTP request handlers and route configuration

pub mod dto;
pub mod handlers;
