//! Authentication and authorization for Trek Booking
//!
//! This crate provides JWT-based request authentication and Actix-web
//! extractors for role-based access control. Credential storage and user
//! registration belong to the external identity provider; this crate only
//! validates the tokens it mints.
//!
//! # Examples
//!
//! ## Validating a token
//!
//! ```no_run
//! use trek_auth::{JwtService, Claims};
//! use trek_core::models::UserRole;
//! use uuid::Uuid;
//!
//! let jwt_service = JwtService::new("your-secret-key", 3600);
//! let claims = Claims::new(Uuid::new_v4(), UserRole::Customer);
//! let token = jwt_service.create_token(&claims)?;
//! let decoded = jwt_service.validate_token(&token)?;
//! # Ok::<(), trek_core::error::AppError>(())
//! ```
//!
//! ## Using extractors in Actix-web
//!
//! ```no_run
//! use actix_web::HttpResponse;
//! use trek_auth::middleware::{AuthenticatedUser, StaffUser};
//!
//! async fn my_bookings(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id }))
//! }
//!
//! async fn report(staff: StaffUser) -> HttpResponse {
//!     HttpResponse::Ok().json(serde_json::json!({ "message": "Staff access granted" }))
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthenticatedUser, StaffUser};
