//! Tour inventory repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trek_core::{models::Tour, traits::TourRepository, AppError, AppResult};
use uuid::Uuid;

/// PostgreSQL implementation of TourRepository
pub struct PgTourRepository {
    pool: PgPool,
}

impl PgTourRepository {
    /// Create a new tour repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourRepository for PgTourRepository {
    #[instrument(skip(self))]
    async fn find_available(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Tour>> {
        debug!("Searching tours for [{} .. {}]", start, end);

        let rows = sqlx::query_as::<sqlx::Postgres, TourRow>(
            r#"
            SELECT DISTINCT t.id, t.name, t.location, t.cost, t.available_spaces
            FROM tours t
            INNER JOIN tour_availabilities ta ON ta.tour_id = t.id
            WHERE ta.available_from <= $1
                AND ta.available_to >= $2
                AND t.available_spaces > 0
            ORDER BY t.name
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error searching tours: {}", e);
            AppError::Database(format!("Failed to search tours: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct TourRow {
    id: Uuid,
    name: String,
    location: String,
    cost: Decimal,
    available_spaces: i32,
}

impl From<TourRow> for Tour {
    fn from(row: TourRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            cost: row.cost,
            available_spaces: row.available_spaces,
        }
    }
}
