//! Hotel discount repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, instrument};
use trek_core::{
    models::{HotelDiscount, RoomType},
    traits::HotelDiscountRepository,
    AppError, AppResult,
};
use uuid::Uuid;

/// PostgreSQL implementation of HotelDiscountRepository
pub struct PgHotelDiscountRepository {
    pool: PgPool,
}

impl PgHotelDiscountRepository {
    /// Create a new discount repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelDiscountRepository for PgHotelDiscountRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> AppResult<Vec<HotelDiscount>> {
        let rows = sqlx::query_as::<sqlx::Postgres, DiscountRow>(
            r#"
            SELECT id, room_type, percentage
            FROM hotel_discounts
            ORDER BY room_type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing discounts: {}", e);
            AppError::Database(format!("Failed to fetch discounts: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct DiscountRow {
    id: Uuid,
    room_type: String,
    percentage: i32,
}

impl From<DiscountRow> for HotelDiscount {
    fn from(row: DiscountRow) -> Self {
        Self {
            id: row.id,
            room_type: RoomType::from_str(&row.room_type).unwrap_or_default(),
            percentage: row.percentage,
        }
    }
}
