//! Search handlers
//!
//! HTTP handlers for the hotel and tour availability searches and the
//! discount listing. Searches are reads only; nothing here touches
//! capacity.

use crate::dto::search::{
    DiscountResponse, HotelResponse, HotelSearchParams, TourResponse, TourSearchParams,
};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use trek_auth::AuthenticatedUser;
use trek_core::models::RoomType;
use trek_core::traits::{HotelDiscountRepository, HotelRepository, TourRepository};
use trek_core::AppError;
use trek_db::{PgHotelDiscountRepository, PgHotelRepository, PgTourRepository};

/// Search hotels by date window and room type
///
/// GET /api/v1/hotels/search
#[instrument(skip(pool, _user))]
pub async fn search_hotels(
    pool: web::Data<PgPool>,
    query: web::Query<HotelSearchParams>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    if query.check_out < query.check_in {
        warn!(
            "Rejecting hotel search with reversed dates: {} to {}",
            query.check_in, query.check_out
        );
        return Err(AppError::InvalidInput(
            "Check-out date is before check-in date".to_string(),
        ));
    }

    let room_type = RoomType::from_str(&query.room_type).ok_or_else(|| {
        warn!("Unknown room type in search: {}", query.room_type);
        AppError::InvalidInput(format!("Unknown room type: {}", query.room_type))
    })?;

    debug!(
        check_in = %query.check_in,
        check_out = %query.check_out,
        room_type = %room_type,
        "Searching hotels"
    );

    let repo = PgHotelRepository::new(pool.get_ref().clone());
    let hotels = repo
        .find_available(query.check_in, query.check_out, room_type)
        .await?;

    let response: Vec<HotelResponse> = hotels.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Search tours by date window
///
/// GET /api/v1/tours/search
#[instrument(skip(pool, _user))]
pub async fn search_tours(
    pool: web::Data<PgPool>,
    query: web::Query<TourSearchParams>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    if query.end_date < query.start_date {
        warn!(
            "Rejecting tour search with reversed dates: {} to {}",
            query.start_date, query.end_date
        );
        return Err(AppError::InvalidInput(
            "End date is before start date".to_string(),
        ));
    }

    debug!(
        start_date = %query.start_date,
        end_date = %query.end_date,
        "Searching tours"
    );

    let repo = PgTourRepository::new(pool.get_ref().clone());
    let tours = repo.find_available(query.start_date, query.end_date).await?;

    let response: Vec<TourResponse> = tours.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// List hotel discounts
///
/// GET /api/v1/discounts
#[instrument(skip(pool, _user))]
pub async fn list_discounts(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    debug!("Listing hotel discounts");

    let repo = PgHotelDiscountRepository::new(pool.get_ref().clone());
    let discounts = repo.list_all().await?;

    let response: Vec<DiscountResponse> = discounts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/hotels").route("/search", web::get().to(search_hotels)))
        .service(web::scope("/tours").route("/search", web::get().to(search_tours)))
        .route("/discounts", web::get().to(list_discounts));
}
