//! Staff report handler
//!
//! One read-only endpoint listing every booking across all travelers,
//! cancelled rows included. Requires the staff role.

use crate::dto::report::{HotelReportRow, PackageReportRow, ReportResponse, TourReportRow};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use tracing::{debug, instrument};
use trek_auth::StaffUser;
use trek_core::traits::{
    HotelBookingRepository, PackageBookingRepository, TourBookingRepository,
};
use trek_core::AppError;
use trek_db::{PgHotelBookingRepository, PgPackageBookingRepository, PgTourBookingRepository};

/// Full booking report
///
/// GET /api/v1/report
#[instrument(skip(pool, staff))]
pub async fn booking_report(
    pool: web::Data<PgPool>,
    staff: StaffUser,
) -> Result<HttpResponse, AppError> {
    debug!(user_id = %staff.user_id, "Building staff report");

    let hotel_repo = PgHotelBookingRepository::new(pool.get_ref().clone());
    let tour_repo = PgTourBookingRepository::new(pool.get_ref().clone());
    let package_repo = PgPackageBookingRepository::new(pool.get_ref().clone());

    let hotel_bookings: Vec<HotelReportRow> = hotel_repo
        .list_report()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let tour_bookings: Vec<TourReportRow> = tour_repo
        .list_report()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let package_bookings: Vec<PackageReportRow> = package_repo
        .list_report()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let report = ReportResponse::new(hotel_bookings, tour_bookings, package_bookings);
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/report", web::get().to(booking_report));
}
