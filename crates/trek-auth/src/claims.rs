//! JWT Claims structure
//!
//! Defines the claims structure used in JWT tokens for authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use trek_core::models::UserRole;
use trek_core::AppError;
use uuid::Uuid;

/// JWT Claims
///
/// Standard claims used in JWT tokens for traveler authentication.
/// The subject is the traveler's id as minted by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (traveler id)
    pub sub: String,

    /// User role
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for the given traveler and role
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: 0, // Will be set by JwtService
        }
    }

    /// Create new claims with custom expiration duration
    pub fn with_expiration(user_id: Uuid, role: UserRole, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the subject back into a traveler id
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AppError::InvalidToken(format!("Malformed subject: {}", e)))
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        self.exp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_subject_roundtrip() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, UserRole::Customer);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_malformed_subject_rejected() {
        let mut claims = Claims::new(Uuid::new_v4(), UserRole::Customer);
        claims.sub = "not-a-uuid".to_string();
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_expiration_check() {
        let live = Claims::with_expiration(Uuid::new_v4(), UserRole::Staff, 3600);
        assert!(!live.is_expired());

        let stale = Claims::with_expiration(Uuid::new_v4(), UserRole::Staff, -10);
        assert!(stale.is_expired());
    }
}
