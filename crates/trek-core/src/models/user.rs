//! Traveler identity models
//!
//! Identity and credential storage live in an external provider; this
//! crate only consumes the traveler's id, profile fields joined into the
//! staff report, and the role carried in the access token.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User role carried in JWT claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular customer: books and manages their own reservations
    #[default]
    Customer,
    /// Staff: additionally reads the all-users report
    Staff,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Staff => write!(f, "staff"),
        }
    }
}

impl UserRole {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(UserRole::Customer),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }

    /// Check whether this role may read the staff report
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Staff)
    }
}

/// Traveler profile as stored by the identity provider
///
/// Read-only here; joined into the staff report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traveler {
    /// Unique identifier (subject of the access token)
    pub id: Uuid,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Passport number
    pub passport_number: String,

    /// Customer reference number
    pub customer_number: Uuid,
}

impl Traveler {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
