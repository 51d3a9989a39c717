//! Hotel booking ledger repository implementation
//!
//! Read-side queries over the hotel booking ledger: owner-scoped active
//! listings and the staff report join. Ledger writes happen inside the
//! booking engine's transactions.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trek_core::{
    models::{
        BookingStatus, Hotel, HotelBooking, HotelBookingDetail, PaymentStatus, RoomType, Traveler,
    },
    traits::HotelBookingRepository,
    AppError, AppResult,
};
use uuid::Uuid;

/// PostgreSQL implementation of HotelBookingRepository
pub struct PgHotelBookingRepository {
    pool: PgPool,
}

impl PgHotelBookingRepository {
    /// Create a new hotel booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelBookingRepository for PgHotelBookingRepository {
    #[instrument(skip(self))]
    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<HotelBookingDetail>> {
        debug!("Listing active hotel bookings for user {}", user_id);

        let rows = sqlx::query_as::<sqlx::Postgres, DetailRow>(
            r#"
            SELECT hb.id, hb.user_id, hb.hotel_id, hb.check_in, hb.check_out,
                   hb.status, hb.payment, hb.created_at, hb.updated_at,
                   h.name AS hotel_name, h.location AS hotel_location,
                   h.room_type AS hotel_room_type, h.cost AS hotel_cost,
                   h.available_spaces AS hotel_available_spaces
            FROM hotel_bookings hb
            INNER JOIN hotels h ON h.id = hb.hotel_id
            WHERE hb.user_id = $1 AND hb.status = 'active'
            ORDER BY hb.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing hotel bookings: {}", e);
            AppError::Database(format!("Failed to fetch hotel bookings: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn list_report(&self) -> AppResult<Vec<HotelBookingDetail>> {
        debug!("Listing hotel bookings for staff report");

        let rows = sqlx::query_as::<sqlx::Postgres, ReportRow>(
            r#"
            SELECT hb.id, hb.user_id, hb.hotel_id, hb.check_in, hb.check_out,
                   hb.status, hb.payment, hb.created_at, hb.updated_at,
                   h.name AS hotel_name, h.location AS hotel_location,
                   h.room_type AS hotel_room_type, h.cost AS hotel_cost,
                   h.available_spaces AS hotel_available_spaces,
                   t.first_name, t.last_name, t.passport_number, t.customer_number
            FROM hotel_bookings hb
            INNER JOIN hotels h ON h.id = hb.hotel_id
            INNER JOIN travelers t ON t.id = hb.user_id
            ORDER BY hb.created_at DESC
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
    hotel_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    hotel_name: String,
    hotel_location: String,
    hotel_room_type: String,
    hotel_cost: Decimal,
    hotel_available_spaces: i32,
}

impl From<DetailRow> for HotelBookingDetail {
    fn from(row: DetailRow) -> Self {
        Self {
            booking: HotelBooking {
                id: row.id,
                user_id: row.user_id,
                hotel_id: row.hotel_id,
                check_in: row.check_in,
                check_out: row.check_out,
                status: BookingStatus::from_str(&row.status).unwrap_or_default(),
                payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            hotel: Hotel {
                id: row.hotel_id,
                name: row.hotel_name,
                location: row.hotel_location,
                room_type: RoomType::from_str(&row.hotel_room_type).unwrap_or_default(),
                cost: row.hotel_cost,
                available_spaces: row.hotel_available_spaces,
            },
            traveler: None,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    hotel_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    hotel_name: String,
    hotel_location: String,
    hotel_room_type: String,
    hotel_cost: Decimal,
    hotel_available_spaces: i32,
    first_name: String,
    last_name: String,
    passport_number: String,
    customer_number: Uuid,
}

impl From<ReportRow> for HotelBookingDetail {
    fn from(row: ReportRow) -> Self {
        Self {
            booking: HotelBooking {
                id: row.id,
                user_id: row.user_id,
                hotel_id: row.hotel_id,
                check_in: row.check_in,
                check_out: row.check_out,
                status: BookingStatus::from_str(&row.status).unwrap_or_default(),
                payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            hotel: Hotel {
                id: row.hotel_id,
                name: row.hotel_name,
                location: row.hotel_location,
                room_type: RoomType::from_str(&row.hotel_room_type).unwrap_or_default(),
                cost: row.hotel_cost,
                available_spaces: row.hotel_available_spaces,
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
