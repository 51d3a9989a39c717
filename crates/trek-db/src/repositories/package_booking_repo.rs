//! Package booking ledger repository implementation
//!
//! A package row references both a hotel and a tour; every detail query
//! joins both inventory tables.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trek_core::{
    models::{
        BookingStatus, Hotel, PackageBooking, PackageBookingDetail, PaymentStatus, RoomType, Tour,
        Traveler,
    },
    traits::PackageBookingRepository,
    AppError, AppResult,
};
use uuid::Uuid;

/// PostgreSQL implementation of PackageBookingRepository
pub struct PgPackageBookingRepository {
    pool: PgPool,
}

impl PgPackageBookingRepository {
    /// Create a new package booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DETAIL_COLUMNS: &str = r#"
    pb.id, pb.user_id, pb.hotel_id, pb.check_in, pb.check_out,
    pb.tour_id, pb.tour_start, pb.tour_end,
    pb.status, pb.payment, pb.created_at, pb.updated_at,
    h.name AS hotel_name, h.location AS hotel_location,
    h.room_type AS hotel_room_type, h.cost AS hotel_cost,
    h.available_spaces AS hotel_available_spaces,
    t.name AS tour_name, t.location AS tour_location,
    t.cost AS tour_cost, t.available_spaces AS tour_available_spaces
"#;

#[async_trait]
impl PackageBookingRepository for PgPackageBookingRepository {
    #[instrument(skip(self))]
    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<PackageBookingDetail>> {
        debug!("Listing active package bookings for user {}", user_id);

        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM package_bookings pb
            INNER JOIN hotels h ON h.id = pb.hotel_id
            INNER JOIN tours t ON t.id = pb.tour_id
            WHERE pb.user_id = $1 AND pb.status = 'active'
            ORDER BY pb.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<sqlx::Postgres, DetailRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error listing package bookings: {}", e);
                AppError::Database(format!("Failed to fetch package bookings: {}", e))
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn list_report(&self) -> AppResult<Vec<PackageBookingDetail>> {
        debug!("Listing package bookings for staff report");

        let sql = format!(
            r#"
            SELECT {DETAIL_COLUMNS},
                   tr.first_name, tr.last_name, tr.passport_number, tr.customer_number
            FROM package_bookings pb
            INNER JOIN hotels h ON h.id = pb.hotel_id
            INNER JOIN tours t ON t.id = pb.tour_id
            INNER JOIN travelers tr ON tr.id = pb.user_id
            ORDER BY pb.created_at DESC
            "#
        );

        let rows = sqlx::query_as::<sqlx::Postgres, ReportRow>(&sql)
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
    tour_id: Uuid,
    tour_start: NaiveDate,
    tour_end: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    hotel_name: String,
    hotel_location: String,
    hotel_room_type: String,
    hotel_cost: Decimal,
    hotel_available_spaces: i32,
    tour_name: String,
    tour_location: String,
    tour_cost: Decimal,
    tour_available_spaces: i32,
}

impl DetailRow {
    fn into_detail(self, traveler: Option<Traveler>) -> PackageBookingDetail {
        PackageBookingDetail {
            booking: PackageBooking {
                id: self.id,
                user_id: self.user_id,
                hotel_id: self.hotel_id,
                check_in: self.check_in,
                check_out: self.check_out,
                tour_id: self.tour_id,
                tour_start: self.tour_start,
                tour_end: self.tour_end,
                status: BookingStatus::from_str(&self.status).unwrap_or_default(),
                payment: PaymentStatus::from_str(&self.payment).unwrap_or_default(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            hotel: Hotel {
                id: self.hotel_id,
                name: self.hotel_name,
                location: self.hotel_location,
                room_type: RoomType::from_str(&self.hotel_room_type).unwrap_or_default(),
                cost: self.hotel_cost,
                available_spaces: self.hotel_available_spaces,
            },
            tour: Tour {
                id: self.tour_id,
                name: self.tour_name,
                location: self.tour_location,
                cost: self.tour_cost,
                available_spaces: self.tour_available_spaces,
            },
            traveler,
        }
    }
}

impl From<DetailRow> for PackageBookingDetail {
    fn from(row: DetailRow) -> Self {
        row.into_detail(None)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    #[sqlx(flatten)]
    detail: DetailRow,
    first_name: String,
    last_name: String,
    passport_number: String,
    customer_number: Uuid,
}

impl From<ReportRow> for PackageBookingDetail {
    fn from(row: ReportRow) -> Self {
        let traveler = Traveler {
            id: row.detail.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            passport_number: row.passport_number,
            customer_number: row.customer_number,
        };
        row.detail.into_detail(Some(traveler))
    }
}
