//! HTTP request handlers
//!
//! Each module configures its own routes; `configure` assembles the
//! whole `/api/v1` tree.

pub mod bookings;
pub mod payments;
pub mod report;
pub mod search;

use actix_web::{web, HttpResponse};
use serde_json::json;

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "trek-booking",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
    search::configure(cfg);
    bookings::configure(cfg);
    payments::configure(cfg);
    report::configure(cfg);
}
