//! Booking handlers
//!
//! HTTP handlers for creating, listing, rescheduling, and cancelling
//! bookings. All capacity mutation goes through the booking engine; the
//! handlers only translate between HTTP and the engine.

use crate::dto::booking::{
    HotelBookingItem, HotelBookingRequest, HotelBookingResponse, MyBookingsResponse,
    PackageBookingItem, PackageBookingRequest, PackageBookingResponse, ReschedulePackageRequest,
    RescheduleStayRequest, RescheduleTourRequest, TourBookingItem, TourBookingRequest,
    TourBookingResponse,
};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use trek_auth::AuthenticatedUser;
use trek_core::models::BookingKind;
use trek_core::traits::{
    HotelBookingRepository, PackageBookingRepository, TourBookingRepository,
};
use trek_core::AppError;
use trek_db::{PgHotelBookingRepository, PgPackageBookingRepository, PgTourBookingRepository};
use trek_services::BookingEngine;
use uuid::Uuid;

/// List the authenticated traveler's active bookings
///
/// GET /api/v1/bookings
#[instrument(skip(pool, user))]
pub async fn list_my_bookings(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    debug!(user_id = %user.user_id, "Listing bookings");

    let hotel_repo = PgHotelBookingRepository::new(pool.get_ref().clone());
    let tour_repo = PgTourBookingRepository::new(pool.get_ref().clone());
    let package_repo = PgPackageBookingRepository::new(pool.get_ref().clone());

    let hotel_bookings: Vec<HotelBookingItem> = hotel_repo
        .list_active_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let tour_bookings: Vec<TourBookingItem> = tour_repo
        .list_active_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let package_bookings: Vec<PackageBookingItem> = package_repo
        .list_active_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MyBookingsResponse {
        hotel_bookings,
        tour_bookings,
        package_bookings,
    })))
}

/// Book a hotel stay
///
/// POST /api/v1/bookings/hotel
#[instrument(skip(engine, user, req))]
pub async fn book_hotel(
    engine: web::Data<BookingEngine>,
    user: AuthenticatedUser,
    req: web::Json<HotelBookingRequest>,
) -> Result<HttpResponse, AppError> {
    debug!(
        user_id = %user.user_id,
        hotel_id = %req.hotel_id,
        "Booking hotel"
    );

    let booking = engine
        .book_hotel(user.user_id, req.hotel_id, req.check_in, req.check_out)
        .await?;

    info!(booking_id = %booking.id, "Hotel booked");

    let response = HotelBookingResponse::from(booking);
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        response,
        "Hotel booked successfully",
    )))
}

/// Book a tour
///
/// POST /api/v1/bookings/tour
#[instrument(skip(engine, user, req))]
pub async fn book_tour(
    engine: web::Data<BookingEngine>,
    user: AuthenticatedUser,
    req: web::Json<TourBookingRequest>,
) -> Result<HttpResponse, AppError> {
    debug!(
        user_id = %user.user_id,
        tour_id = %req.tour_id,
        "Booking tour"
    );

    let booking = engine
        .book_tour(user.user_id, req.tour_id, req.tour_start, req.tour_end)
        .await?;

    info!(booking_id = %booking.id, "Tour booked");

    let response = TourBookingResponse::from(booking);
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        response,
        "Tour booked successfully",
    )))
}

/// Book a hotel + tour package
///
/// POST /api/v1/bookings/package
#[instrument(skip(engine, user, req))]
pub async fn book_package(
    engine: web::Data<BookingEngine>,
    user: AuthenticatedUser,
    req: web::Json<PackageBookingRequest>,
) -> Result<HttpResponse, AppError> {
    debug!(
        user_id = %user.user_id,
        hotel_id = %req.hotel_id,
        tour_id = %req.tour_id,
        "Booking package"
    );

    let booking = engine
        .book_package(
            user.user_id,
            req.hotel_id,
            req.check_in,
            req.check_out,
            req.tour_id,
            req.tour_start,
            req.tour_end,
        )
        .await?;

    info!(booking_id = %booking.id, "Package booked");

    let response = PackageBookingResponse::from(booking);
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        response,
        "Package booked successfully",
    )))
}

/// Reschedule a hotel booking
///
/// PUT /api/v1/bookings/hotel/{id}
#[instrument(skip(engine, user, req))]
pub async fn reschedule_hotel(
    engine: web::Data<BookingEngine>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<RescheduleStayRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    debug!(booking_id = %booking_id, "Rescheduling hotel booking");

    let booking = engine
        .reschedule_hotel(booking_id, user.user_id, req.check_in, req.check_out)
        .await?;

    let response = HotelBookingResponse::from(booking);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        response,
        "Booking updated successfully",
    )))
}

/// Reschedule a tour booking
///
/// PUT /api/v1/bookings/tour/{id}
#[instrument(skip(engine, user, req))]
pub async fn reschedule_tour(
    engine: web::Data<BookingEngine>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<RescheduleTourRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    debug!(booking_id = %booking_id, "Rescheduling tour booking");

    let booking = engine
        .reschedule_tour(booking_id, user.user_id, req.tour_start, req.tour_end)
        .await?;

    let response = TourBookingResponse::from(booking);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        response,
        "Booking updated successfully",
    )))
}

/// Reschedule a package booking (both legs)
///
/// PUT /api/v1/bookings/package/{id}
#[instrument(skip(engine, user, req))]
pub async fn reschedule_package(
    engine: web::Data<BookingEngine>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
    req: web::Json<ReschedulePackageRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    debug!(booking_id = %booking_id, "Rescheduling package booking");

    let booking = engine
        .reschedule_package(
            booking_id,
            user.user_id,
            req.check_in,
            req.check_out,
            req.tour_start,
            req.tour_end,
        )
        .await?;

    let response = PackageBookingResponse::from(booking);
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        response,
        "Booking updated successfully",
    )))
}

/// Cancel a booking of any kind
///
/// POST /api/v1/bookings/{kind}/{id}/cancel
#[instrument(skip(engine, user))]
pub async fn cancel_booking(
    engine: web::Data<BookingEngine>,
    path: web::Path<(String, Uuid)>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (kind_str, booking_id) = path.into_inner();

    let kind = BookingKind::from_str(&kind_str).ok_or_else(|| {
        warn!("Unknown booking kind in cancel request: {}", kind_str);
        AppError::UnknownBookingKind(kind_str.clone())
    })?;

    debug!(booking_id = %booking_id, kind = %kind, "Cancelling booking");

    engine.cancel(kind, booking_id, user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        json!({
            "booking_id": booking_id,
            "booking_type": kind.to_string(),
            "status": "cancelled",
        }),
        "Booking cancelled",
    )))
}

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(list_my_bookings))
            .route("/hotel", web::post().to(book_hotel))
            .route("/tour", web::post().to(book_tour))
            .route("/package", web::post().to(book_package))
            .route("/hotel/{id}", web::put().to(reschedule_hotel))
            .route("/tour/{id}", web::put().to(reschedule_tour))
            .route("/package/{id}", web::put().to(reschedule_package))
            .route("/{kind}/{id}/cancel", web::post().to(cancel_booking)),
    );
}
