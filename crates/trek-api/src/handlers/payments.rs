//! Payment handlers
//!
//! The payment endpoint validates the card form by shape, then flips the
//! booking's payment state. No card data is stored or forwarded.

use crate::dto::payment::{PaymentForm, PaymentQuery, PaymentReceipt};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use tracing::{debug, info, instrument, warn};
use trek_auth::AuthenticatedUser;
use trek_core::models::BookingKind;
use trek_core::AppError;
use trek_services::BookingEngine;
use validator::Validate;

/// Pay for a booking
///
/// POST /api/v1/payments?booking_id={id}&booking_type={kind}
#[instrument(skip(engine, user, form))]
pub async fn process_payment(
    engine: web::Data<BookingEngine>,
    user: AuthenticatedUser,
    query: web::Query<PaymentQuery>,
    form: web::Json<PaymentForm>,
) -> Result<HttpResponse, AppError> {
    form.validate().map_err(|e| {
        warn!("Payment form validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let kind = BookingKind::from_str(&query.booking_type).ok_or_else(|| {
        warn!("Unknown booking kind in payment: {}", query.booking_type);
        AppError::UnknownBookingKind(query.booking_type.clone())
    })?;

    debug!(
        booking_id = %query.booking_id,
        kind = %kind,
        "Processing payment"
    );

    engine.mark_paid(kind, query.booking_id, user.user_id).await?;

    info!(booking_id = %query.booking_id, "Payment recorded");

    let receipt = PaymentReceipt {
        booking_id: query.booking_id,
        booking_type: kind.to_string(),
        payment: "paid".to_string(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        receipt,
        "Payment processed successfully",
    )))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/payments").route("", web::post().to(process_payment)));
}
