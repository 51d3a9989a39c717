//! Availability search integration tests
//!
//! These tests need a live PostgreSQL instance and are ignored by
//! default. Run them with:
//!
//! ```sh
//! DATABASE_URL=postgresql://localhost/trek_test cargo test -- --ignored
//! ```
//!
//! Every test seeds its own inventory rows under fresh UUIDs, so the
//! suite can run against a shared database. Assertions check for the
//! presence or absence of the seeded id rather than result counts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use trek_core::config::BookingConfig;
use trek_core::models::{Hotel, RoomType, Tour};
use trek_core::traits::{HotelRepository, TourRepository};
use trek_core::AppError;
use trek_db::pool::run_migrations;
use trek_db::{PgHotelRepository, PgTourRepository};
use trek_services::BookingEngine;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("connect");
    run_migrations(&pool).await.expect("migrations");
    pool
}

async fn seed_traveler(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO travelers (id, first_name, last_name, passport_number, customer_number)
         VALUES ($1, 'Test', 'Traveler', 'P0000001', $2)",
    )
    .bind(id)
    .bind(Uuid::new_v4())
    .execute(pool)
    .await
    .expect("seed traveler");
    id
}

async fn seed_hotel(pool: &PgPool, spaces: i32, room_type: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO hotels (id, name, location, room_type, cost, available_spaces)
         VALUES ($1, 'Test Hotel', 'Lima', $2, $3, $4)",
    )
    .bind(id)
    .bind(room_type)
    .bind(Decimal::new(15000, 2))
    .bind(spaces)
    .execute(pool)
    .await
    .expect("seed hotel");
    id
}

async fn add_hotel_window(pool: &PgPool, hotel_id: Uuid, from: NaiveDate, to: NaiveDate) {
    sqlx::query(
        "INSERT INTO hotel_availabilities (hotel_id, available_from, available_to)
         VALUES ($1, $2, $3)",
    )
    .bind(hotel_id)
    .bind(from)
    .bind(to)
    .execute(pool)
    .await
    .expect("seed hotel window");
}

async fn seed_tour(pool: &PgPool, spaces: i32) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO tours (id, name, location, cost, available_spaces)
         VALUES ($1, 'Test Tour', 'Cusco', $2, $3)",
    )
    .bind(id)
    .bind(Decimal::new(8000, 2))
    .bind(spaces)
    .execute(pool)
    .await
    .expect("seed tour");
    id
}

async fn add_tour_window(pool: &PgPool, tour_id: Uuid, from: NaiveDate, to: NaiveDate) {
    sqlx::query(
        "INSERT INTO tour_availabilities (tour_id, available_from, available_to)
         VALUES ($1, $2, $3)",
    )
    .bind(tour_id)
    .bind(from)
    .bind(to)
    .execute(pool)
    .await
    .expect("seed tour window");
}

fn hotel_ids(hotels: &[Hotel]) -> Vec<Uuid> {
    hotels.iter().map(|h| h.id).collect()
}

fn tour_ids(tours: &[Tour]) -> Vec<Uuid> {
    tours.iter().map(|t| t.id).collect()
}

#[tokio::test]
#[ignore]
async fn zero_space_hotel_never_listed() {
    let pool = test_pool().await;
    let hotel = seed_hotel(&pool, 0, "double").await;
    add_hotel_window(&pool, hotel, date(2030, 6, 1), date(2030, 6, 30)).await;

    let repo = PgHotelRepository::new(pool.clone());
    let found = repo
        .find_available(date(2030, 6, 5), date(2030, 6, 10), RoomType::Double)
        .await
        .expect("search succeeds");

    assert!(!hotel_ids(&found).contains(&hotel));
}

#[tokio::test]
#[ignore]
async fn partially_overlapping_window_not_matched() {
    let pool = test_pool().await;
    let hotel = seed_hotel(&pool, 3, "double").await;
    add_hotel_window(&pool, hotel, date(2030, 6, 1), date(2030, 6, 10)).await;

    let repo = PgHotelRepository::new(pool.clone());

    // Stay starts inside the window but runs past its end
    let found = repo
        .find_available(date(2030, 6, 5), date(2030, 6, 15), RoomType::Double)
        .await
        .expect("search succeeds");
    assert!(!hotel_ids(&found).contains(&hotel));

    // Stay starts before the window opens
    let found = repo
        .find_available(date(2030, 5, 28), date(2030, 6, 5), RoomType::Double)
        .await
        .expect("search succeeds");
    assert!(!hotel_ids(&found).contains(&hotel));

    // The fully contained stay matches
    let found = repo
        .find_available(date(2030, 6, 2), date(2030, 6, 9), RoomType::Double)
        .await
        .expect("search succeeds");
    assert!(hotel_ids(&found).contains(&hotel));
}

#[tokio::test]
#[ignore]
async fn hotel_with_two_covering_windows_listed_once() {
    let pool = test_pool().await;
    let hotel = seed_hotel(&pool, 2, "double").await;
    add_hotel_window(&pool, hotel, date(2030, 6, 1), date(2030, 6, 30)).await;
    add_hotel_window(&pool, hotel, date(2030, 5, 15), date(2030, 7, 15)).await;

    let repo = PgHotelRepository::new(pool.clone());
    let found = repo
        .find_available(date(2030, 6, 5), date(2030, 6, 10), RoomType::Double)
        .await
        .expect("search succeeds");

    let matches = hotel_ids(&found).iter().filter(|id| **id == hotel).count();
    assert_eq!(matches, 1);
}

#[tokio::test]
#[ignore]
async fn room_type_must_match() {
    let pool = test_pool().await;
    let hotel = seed_hotel(&pool, 3, "single").await;
    add_hotel_window(&pool, hotel, date(2030, 6, 1), date(2030, 6, 30)).await;

    let repo = PgHotelRepository::new(pool.clone());

    let found = repo
        .find_available(date(2030, 6, 5), date(2030, 6, 10), RoomType::Double)
        .await
        .expect("search succeeds");
    assert!(!hotel_ids(&found).contains(&hotel));

    let found = repo
        .find_available(date(2030, 6, 5), date(2030, 6, 10), RoomType::Single)
        .await
        .expect("search succeeds");
    assert!(hotel_ids(&found).contains(&hotel));
}

#[tokio::test]
#[ignore]
async fn tour_partial_overlap_not_matched() {
    let pool = test_pool().await;
    let tour = seed_tour(&pool, 5).await;
    add_tour_window(&pool, tour, date(2030, 3, 1), date(2030, 3, 10)).await;

    let repo = PgTourRepository::new(pool.clone());

    let found = repo
        .find_available(date(2030, 3, 8), date(2030, 3, 12))
        .await
        .expect("search succeeds");
    assert!(!tour_ids(&found).contains(&tour));

    let found = repo
        .find_available(date(2030, 3, 2), date(2030, 3, 9))
        .await
        .expect("search succeeds");
    assert!(tour_ids(&found).contains(&tour));
}

#[tokio::test]
#[ignore]
async fn two_unit_tour_sells_out_after_two_bookings() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let tour = seed_tour(&pool, 2).await;
    add_tour_window(&pool, tour, date(2030, 3, 1), date(2030, 3, 31)).await;

    let repo = PgTourRepository::new(pool.clone());
    let engine = BookingEngine::new(Arc::new(pool.clone()), BookingConfig::default());

    let found = repo
        .find_available(date(2030, 3, 5), date(2030, 3, 10))
        .await
        .expect("search succeeds");
    assert!(tour_ids(&found).contains(&tour));

    engine
        .book_tour(user, tour, date(2030, 3, 5), date(2030, 3, 10))
        .await
        .expect("first booking succeeds");
    engine
        .book_tour(user, tour, date(2030, 3, 12), date(2030, 3, 17))
        .await
        .expect("second booking succeeds");

    let third = engine
        .book_tour(user, tour, date(2030, 3, 20), date(2030, 3, 25))
        .await;
    assert!(matches!(third, Err(AppError::Unavailable(_))));

    // Sold out, so the search stops listing it
    let found = repo
        .find_available(date(2030, 3, 5), date(2030, 3, 10))
        .await
        .expect("search succeeds");
    assert!(!tour_ids(&found).contains(&tour));
}
