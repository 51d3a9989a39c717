//! Booking engine integration tests
//!
//! These tests need a live PostgreSQL instance and are ignored by
//! default. Run them with:
//!
//! ```sh
//! DATABASE_URL=postgresql://localhost/trek_test cargo test -- --ignored
//! ```
//!
//! Every test seeds its own inventory rows under fresh UUIDs, so the
//! suite can run against a shared database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use trek_core::config::BookingConfig;
use trek_core::models::BookingKind;
use trek_core::AppError;
use trek_db::pool::run_migrations;
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

fn engine(pool: &PgPool) -> BookingEngine {
    BookingEngine::new(Arc::new(pool.clone()), BookingConfig::default())
}

fn engine_with(pool: &PgPool, config: BookingConfig) -> BookingEngine {
    BookingEngine::new(Arc::new(pool.clone()), config)
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

async fn seed_hotel(pool: &PgPool, spaces: i32, from: NaiveDate, to: NaiveDate) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO hotels (id, name, location, room_type, cost, available_spaces)
         VALUES ($1, 'Test Hotel', 'Lima', 'double', $2, $3)",
    )
    .bind(id)
    .bind(Decimal::new(15000, 2))
    .bind(spaces)
    .execute(pool)
    .await
    .expect("seed hotel");

    sqlx::query(
        "INSERT INTO hotel_availabilities (hotel_id, available_from, available_to)
         VALUES ($1, $2, $3)",
    )
    .bind(id)
    .bind(from)
    .bind(to)
    .execute(pool)
    .await
    .expect("seed hotel window");

    id
}

async fn seed_tour(pool: &PgPool, spaces: i32, from: NaiveDate, to: NaiveDate) -> Uuid {
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

    sqlx::query(
        "INSERT INTO tour_availabilities (tour_id, available_from, available_to)
         VALUES ($1, $2, $3)",
    )
    .bind(id)
    .bind(from)
    .bind(to)
    .execute(pool)
    .await
    .expect("seed tour window");

    id
}

async fn hotel_spaces(pool: &PgPool, hotel_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT available_spaces FROM hotels WHERE id = $1")
        .bind(hotel_id)
        .fetch_one(pool)
        .await
        .expect("hotel spaces")
}

async fn tour_spaces(pool: &PgPool, tour_id: Uuid) -> i32 {
    sqlx::query_scalar("SELECT available_spaces FROM tours WHERE id = $1")
        .bind(tour_id)
        .fetch_one(pool)
        .await
        .expect("tour spaces")
}

#[tokio::test]
#[ignore]
async fn booking_takes_one_unit() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let booking = engine(&pool)
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    assert_eq!(booking.user_id, user);
    assert_eq!(hotel_spaces(&pool, hotel).await, 2);
}

#[tokio::test]
#[ignore]
async fn sold_out_hotel_rejected() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 0, date(2030, 6, 1), date(2030, 6, 30)).await;

    let result = engine(&pool)
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await;

    assert!(matches!(result, Err(AppError::Unavailable(_))));
    assert_eq!(hotel_spaces(&pool, hotel).await, 0);
}

#[tokio::test]
#[ignore]
async fn partial_window_overlap_rejected() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    // Window covers June only; stay spills into July
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let result = engine(&pool)
        .book_hotel(user, hotel, date(2030, 6, 25), date(2030, 7, 2))
        .await;

    assert!(matches!(result, Err(AppError::Unavailable(_))));
    assert_eq!(hotel_spaces(&pool, hotel).await, 3);
}

#[tokio::test]
#[ignore]
async fn window_boundaries_are_inclusive() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;

    // Stay exactly equal to the window matches
    engine(&pool)
        .book_hotel(user, hotel, date(2030, 6, 1), date(2030, 6, 30))
        .await
        .expect("exact window booking succeeds");
}

#[tokio::test]
#[ignore]
async fn concurrent_bookings_cannot_oversell() {
    let pool = test_pool().await;
    let user_a = seed_traveler(&pool).await;
    let user_b = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 1, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng_a = engine(&pool);
    let eng_b = engine(&pool);

    let (a, b) = tokio::join!(
        eng_a.book_hotel(user_a, hotel, date(2030, 6, 5), date(2030, 6, 10)),
        eng_b.book_hotel(user_b, hotel, date(2030, 6, 5), date(2030, 6, 10)),
    );

    // Exactly one of the two racing bookings wins the last unit
    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "exactly one booking should succeed"
    );
    assert_eq!(hotel_spaces(&pool, hotel).await, 0);
}

#[tokio::test]
#[ignore]
async fn reschedule_is_capacity_neutral() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");
    assert_eq!(hotel_spaces(&pool, hotel).await, 2);

    let updated = eng
        .reschedule_hotel(booking.id, user, date(2030, 6, 12), date(2030, 6, 18))
        .await
        .expect("reschedule succeeds");

    assert_eq!(updated.check_in, date(2030, 6, 12));
    assert_eq!(hotel_spaces(&pool, hotel).await, 2);
}

#[tokio::test]
#[ignore]
async fn legacy_reschedule_takes_another_unit() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine_with(
        &pool,
        BookingConfig {
            legacy_edit_redecrement: true,
            restore_capacity_on_cancel: true,
        },
    );

    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    eng.reschedule_hotel(booking.id, user, date(2030, 6, 12), date(2030, 6, 18))
        .await
        .expect("reschedule succeeds");

    assert_eq!(hotel_spaces(&pool, hotel).await, 1);
}

#[tokio::test]
#[ignore]
async fn reschedule_outside_window_rejected() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    let result = eng
        .reschedule_hotel(booking.id, user, date(2030, 7, 1), date(2030, 7, 5))
        .await;

    assert!(matches!(result, Err(AppError::Unavailable(_))));

    // Original dates untouched
    let (check_in,): (NaiveDate,) =
        sqlx::query_as("SELECT check_in FROM hotel_bookings WHERE id = $1")
            .bind(booking.id)
            .fetch_one(&pool)
            .await
            .expect("booking row");
    assert_eq!(check_in, date(2030, 6, 5));
}

#[tokio::test]
#[ignore]
async fn reschedule_by_stranger_forbidden() {
    let pool = test_pool().await;
    let owner = seed_traveler(&pool).await;
    let stranger = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_hotel(owner, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    let result = eng
        .reschedule_hotel(booking.id, stranger, date(2030, 6, 12), date(2030, 6, 18))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
#[ignore]
async fn cancel_restores_capacity_once() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");
    assert_eq!(hotel_spaces(&pool, hotel).await, 2);

    eng.cancel(BookingKind::Hotel, booking.id, user)
        .await
        .expect("cancel succeeds");
    assert_eq!(hotel_spaces(&pool, hotel).await, 3);

    // Repeating the cancel is a no-op and must not restore again
    eng.cancel(BookingKind::Hotel, booking.id, user)
        .await
        .expect("repeat cancel is a no-op");
    assert_eq!(hotel_spaces(&pool, hotel).await, 3);
}

#[tokio::test]
#[ignore]
async fn cancel_without_restore_flag_keeps_capacity() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine_with(
        &pool,
        BookingConfig {
            legacy_edit_redecrement: false,
            restore_capacity_on_cancel: false,
        },
    );

    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    eng.cancel(BookingKind::Hotel, booking.id, user)
        .await
        .expect("cancel succeeds");

    assert_eq!(hotel_spaces(&pool, hotel).await, 2);
}

#[tokio::test]
#[ignore]
async fn cancel_unknown_booking_not_found() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;

    let result = engine(&pool)
        .cancel(BookingKind::Hotel, Uuid::new_v4(), user)
        .await;

    assert!(matches!(result, Err(AppError::BookingNotFound(_))));
}

#[tokio::test]
#[ignore]
async fn cancelled_booking_cannot_be_rescheduled() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 3, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_hotel(user, hotel, date(2030, 6, 5), date(2030, 6, 10))
        .await
        .expect("booking succeeds");

    eng.cancel(BookingKind::Hotel, booking.id, user)
        .await
        .expect("cancel succeeds");

    let result = eng
        .reschedule_hotel(booking.id, user, date(2030, 6, 12), date(2030, 6, 18))
        .await;

    assert!(matches!(result, Err(AppError::BookingCancelled(_))));
}

#[tokio::test]
#[ignore]
async fn package_claims_and_releases_both_legs() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;
    let tour = seed_tour(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_package(
            user,
            hotel,
            date(2030, 6, 5),
            date(2030, 6, 10),
            tour,
            date(2030, 6, 6),
            date(2030, 6, 8),
        )
        .await
        .expect("package booking succeeds");

    assert_eq!(hotel_spaces(&pool, hotel).await, 1);
    assert_eq!(tour_spaces(&pool, tour).await, 1);

    eng.cancel(BookingKind::Package, booking.id, user)
        .await
        .expect("cancel succeeds");

    assert_eq!(hotel_spaces(&pool, hotel).await, 2);
    assert_eq!(tour_spaces(&pool, tour).await, 2);
}

#[tokio::test]
#[ignore]
async fn package_fails_atomically_when_tour_leg_unavailable() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let hotel = seed_hotel(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;
    // Tour window does not cover the requested dates
    let tour = seed_tour(&pool, 2, date(2030, 7, 1), date(2030, 7, 31)).await;

    let result = engine(&pool)
        .book_package(
            user,
            hotel,
            date(2030, 6, 5),
            date(2030, 6, 10),
            tour,
            date(2030, 6, 6),
            date(2030, 6, 8),
        )
        .await;

    assert!(matches!(result, Err(AppError::Unavailable(_))));

    // Neither leg lost capacity
    assert_eq!(hotel_spaces(&pool, hotel).await, 2);
    assert_eq!(tour_spaces(&pool, tour).await, 2);
}

#[tokio::test]
#[ignore]
async fn payment_flips_once_and_survives_cancel() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let tour = seed_tour(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_tour(user, tour, date(2030, 6, 5), date(2030, 6, 8))
        .await
        .expect("booking succeeds");

    eng.mark_paid(BookingKind::Tour, booking.id, user)
        .await
        .expect("payment succeeds");

    // Paying again is a no-op
    eng.mark_paid(BookingKind::Tour, booking.id, user)
        .await
        .expect("repeat payment is a no-op");

    eng.cancel(BookingKind::Tour, booking.id, user)
        .await
        .expect("cancel succeeds");

    // The cancelled row keeps its paid state
    let (status, payment): (String, String) =
        sqlx::query_as("SELECT status, payment FROM tour_bookings WHERE id = $1")
            .bind(booking.id)
            .fetch_one(&pool)
            .await
            .expect("booking row");
    assert_eq!(status, "cancelled");
    assert_eq!(payment, "paid");
}

#[tokio::test]
#[ignore]
async fn cancelled_booking_cannot_be_paid() {
    let pool = test_pool().await;
    let user = seed_traveler(&pool).await;
    let tour = seed_tour(&pool, 2, date(2030, 6, 1), date(2030, 6, 30)).await;

    let eng = engine(&pool);
    let booking = eng
        .book_tour(user, tour, date(2030, 6, 5), date(2030, 6, 8))
        .await
        .expect("booking succeeds");

    eng.cancel(BookingKind::Tour, booking.id, user)
        .await
        .expect("cancel succeeds");

    let result = eng.mark_paid(BookingKind::Tour, booking.id, user).await;
    assert!(matches!(result, Err(AppError::BookingCancelled(_))));
}
