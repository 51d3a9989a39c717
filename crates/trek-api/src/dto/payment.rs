//! Payment DTOs
//!
//! The payment endpoint is a stub: card details are validated by shape
//! only and never stored or forwarded anywhere.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

static CARD_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{16}$").unwrap());
static CVC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,4}$").unwrap());
static EXPIRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").unwrap());

/// Which booking the payment applies to
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentQuery {
    /// Booking to pay for
    pub booking_id: Uuid,

    /// Booking kind: "hotel", "tour", or "package"
    pub booking_type: String,
}

/// Card payment form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentForm {
    /// Name on the card
    #[validate(length(min = 1, max = 100, message = "Cardholder name is required"))]
    pub cardholder_name: String,

    /// Card number, exactly 16 digits
    #[validate(regex(path = *CARD_NUMBER_RE, message = "Card number must be 16 digits"))]
    pub card_number: String,

    /// Billing address
    #[validate(length(min = 1, max = 200, message = "Billing address is required"))]
    pub billing_address: String,

    /// Expiry in MM/YY form
    #[validate(regex(path = *EXPIRY_RE, message = "Expiry must be in MM/YY format"))]
    pub expiry: String,

    /// Card verification code, 3 or 4 digits
    #[validate(regex(path = *CVC_RE, message = "CVC must be 3 or 4 digits"))]
    pub cvc: String,
}

/// Payment confirmation
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    /// Paid booking
    pub booking_id: Uuid,

    /// Booking kind
    pub booking_type: String,

    /// Payment state after the operation
    pub payment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(card_number: &str, cvc: &str) -> PaymentForm {
        PaymentForm {
            cardholder_name: "Jane Traveler".to_string(),
            card_number: card_number.to_string(),
            billing_address: "12 Mountain View Rd".to_string(),
            expiry: "09/27".to_string(),
            cvc: cvc.to_string(),
        }
    }

    #[test]
    fn test_valid_card_accepted() {
        assert!(form("4111111111111111", "123").validate().is_ok());
        assert!(form("4111111111111111", "1234").validate().is_ok());
    }

    #[test]
    fn test_short_card_number_rejected() {
        assert!(form("411111111111111", "123").validate().is_err());
    }

    #[test]
    fn test_card_number_with_letters_rejected() {
        assert!(form("41111111x1111111", "123").validate().is_err());
    }

    #[test]
    fn test_bad_cvc_rejected() {
        assert!(form("4111111111111111", "12").validate().is_err());
        assert!(form("4111111111111111", "12345").validate().is_err());
        assert!(form("4111111111111111", "12a").validate().is_err());
    }

    #[test]
    fn test_bad_expiry_rejected() {
        let mut f = form("4111111111111111", "123");
        f.expiry = "13/27".to_string();
        assert!(f.validate().is_err());

        f.expiry = "9/27".to_string();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_empty_cardholder_rejected() {
        let mut f = form("4111111111111111", "123");
        f.cardholder_name = String::new();
        assert!(f.validate().is_err());
    }
}
