//! Actix-web authentication middleware and request extractors
//!
//! Provides extractors for authenticated travelers with role-based access control.

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{
    dev::Payload,
    error::{ErrorForbidden, ErrorUnauthorized},
    web, FromRequest, HttpRequest,
};
use futures::future::{ready, Ready};
use std::sync::Arc;
use tracing::{debug, warn};
use trek_core::error::AppError;
use trek_core::models::UserRole;
use uuid::Uuid;

/// Extract JWT token from request
///
/// Checks for token in the following order:
/// 1. Authorization header (Bearer token)
/// 2. Cookie named "token"
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    // Try Authorization header first
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    // Try cookie
    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    None
}

/// Authenticated traveler extractor
///
/// Extracts and validates the JWT token from a request, exposing the
/// traveler's id and role to handlers.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use trek_auth::middleware::AuthenticatedUser;
///
/// async fn protected_handler(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().json(serde_json::json!({
///         "user_id": user.user_id,
///         "role": user.role
///     }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Traveler id of the authenticated user
    pub user_id: Uuid,

    /// Role of the authenticated user
    pub role: UserRole,

    /// Full claims from the JWT token
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Check if the user may read the staff report
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Extract JWT service from app data
        let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
            Some(service) => service.get_ref().clone(),
            None => {
                warn!("JwtService not found in app data");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "Authentication service not configured".to_string(),
                ))));
            }
        };

        // Extract token from request
        let token = match extract_token_from_request(req) {
            Some(t) => t,
            None => {
                debug!("No authentication token found in request");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "No authentication token provided".to_string(),
                ))));
            }
        };

        // Validate token and extract claims
        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                let user_id = match claims.user_id() {
                    Ok(id) => id,
                    Err(e) => {
                        warn!(error = %e, "Token subject is not a traveler id");
                        return ready(Err(ErrorUnauthorized(e)));
                    }
                };

                debug!(
                    user_id = %user_id,
                    role = ?claims.role,
                    "User authenticated successfully"
                );

                ready(Ok(AuthenticatedUser {
                    user_id,
                    role: claims.role,
                    claims,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                ready(Err(ErrorUnauthorized(e)))
            }
        }
    }
}

/// Staff user extractor
///
/// Requires the staff role; returns `Forbidden` otherwise.
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use trek_auth::middleware::StaffUser;
///
/// async fn report_handler(staff: StaffUser) -> HttpResponse {
///     HttpResponse::Ok().json(serde_json::json!({
///         "message": "Staff access granted",
///         "user_id": staff.user_id
///     }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StaffUser(pub AuthenticatedUser);

impl std::ops::Deref for StaffUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for StaffUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = match AuthenticatedUser::from_request(req, payload).into_inner() {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if !user.is_staff() {
            warn!(user_id = %user.user_id, "Staff access denied");
            return ready(Err(ErrorForbidden(AppError::Forbidden)));
        }

        ready(Ok(StaffUser(user)))
    }
}
