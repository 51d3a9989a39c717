//! Tour booking ledger repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trek_core::{
    models::{BookingStatus, PaymentStatus, Tour, TourBooking, TourBookingDetail, Traveler},
    traits::TourBookingRepository,
    AppError, AppResult,
};
use uuid::Uuid;

/// PostgreSQL implementation of TourBookingRepository
pub struct PgTourBookingRepository {
    pool: PgPool,
}

impl PgTourBookingRepository {
    /// Create a new tour booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourBookingRepository for PgTourBookingRepository {
    #[instrument(skip(self))]
    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<TourBookingDetail>> {
        debug!("Listing active tour bookings for user {}", user_id);

        let rows = sqlx::query_as::<sqlx::Postgres, DetailRow>(
            r#"
            SELECT tb.id, tb.user_id, tb.tour_id, tb.tour_start, tb.tour_end,
                   tb.status, tb.payment, tb.created_at, tb.updated_at,
                   t.name AS tour_name, t.location AS tour_location,
                   t.cost AS tour_cost, t.available_spaces AS tour_available_spaces
            FROM tour_bookings tb
            INNER JOIN tours t ON t.id = tb.tour_id
            WHERE tb.user_id = $1 AND tb.status = 'active'
            ORDER BY tb.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing tour bookings: {}", e);
            AppError::Database(format!("Failed to fetch tour bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn list_report(&self) -> AppResult<Vec<TourBookingDetail>> {
        debug!("Listing tour bookings for staff report");

        let rows = sqlx::query_as::<sqlx::Postgres, ReportRow>(
            r#"
            SELECT tb.id, tb.user_id, tb.tour_id, tb.tour_start, tb.tour_end,
                   tb.status, tb.payment, tb.created_at, tb.updated_at,
                   t.name AS tour_name, t.location AS tour_location,
                   t.cost AS tour_cost, t.available_spaces AS tour_available_spaces,
                   tr.first_name, tr.last_name, tr.passport_number, tr.customer_number
            FROM tour_bookings tb
            INNER JOIN tours t ON t.id = tb.tour_id
            INNER JOIN travelers tr ON tr.id = tb.user_id
            ORDER BY tb.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing report bookings: {}", e);
            AppError::Database(format!("Failed to fetch report bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct DetailRow {
    id: Uuid,
    user_id: Uuid,
    tour_id: Uuid,
    tour_start: NaiveDate,
    tour_end: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tour_name: String,
    tour_location: String,
    tour_cost: Decimal,
    tour_available_spaces: i32,
}

impl From<DetailRow> for TourBookingDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            booking: TourBooking {
                id: row.id,
                user_id: row.user_id,
                tour_id: row.tour_id,
                tour_start: row.tour_start,
                tour_end: row.tour_end,
                status: BookingStatus::from_str(&row.status).unwrap_or_default(),
                payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            tour: Tour {
                id: row.tour_id,
                name: row.tour_name,
                location: row.tour_location,
                cost: row.tour_cost,
                available_spaces: row.tour_available_spaces,
            },
            traveler: None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    tour_id: Uuid,
    tour_start: NaiveDate,
    tour_end: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tour_name: String,
    tour_location: String,
    tour_cost: Decimal,
    tour_available_spaces: i32,
    first_name: String,
    last_name: String,
    passport_number: String,
    customer_number: Uuid,
}

impl From<ReportRow> for TourBookingDetail {
    fn from(row: ReportRow) -> Self {
        Self {
            booking: TourBooking {
                id: row.id,
                user_id: row.user_id,
                tour_id: row.tour_id,
                tour_start: row.tour_start,
                tour_end: row.tour_end,
                status: BookingStatus::from_str(&row.status).unwrap_or_default(),
                payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            tour: Tour {
                id: row.tour_id,
                name: row.tour_name,
                location: row.tour_location,
                cost: row.tour_cost,
                available_spaces: row.tour_available_spaces,
            },
            traveler: Some(Traveler {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                passport_number: row.passport_number,
                customer_number: row.customer_number,
            }),
        }
    }
}
