//! Hotel inventory repository implementation
//!
//! Read-side access to hotels and their availability windows. The
//! availability search joins windows to inventory with the containment
//! predicate and the positive-capacity guard, de-duplicating hotels that
//! match through more than one window.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use trek_core::{
    models::{Hotel, RoomType},
    traits::HotelRepository,
    AppError, AppResult,
};
use uuid::Uuid;

/// PostgreSQL implementation of HotelRepository
pub struct PgHotelRepository {
    pool: PgPool,
}

impl PgHotelRepository {
    /// Create a new hotel repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse room type from its stored text form
    fn parse_room_type(s: &str) -> RoomType {
        RoomType::from_str(s).unwrap_or_default()
    }
}

#[async_trait]
impl HotelRepository for PgHotelRepository {
    #[instrument(skip(self))]
    async fn find_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: RoomType,
    ) -> AppResult<Vec<Hotel>> {
        debug!(
            "Searching hotels for [{} .. {}], room type {}",
            check_in, check_out, room_type
        );

        let rows = sqlx::query_as::<sqlx::Postgres, HotelRow>(
            r#"
            SELECT DISTINCT h.id, h.name, h.location, h.room_type, h.cost, h.available_spaces
            FROM hotels h
            INNER JOIN hotel_availabilities ha ON ha.hotel_id = h.id
            WHERE ha.available_from <= $1
                AND ha.available_to >= $2
                AND h.room_type = $3
                AND h.available_spaces > 0
            ORDER BY h.name
            "#,
        )
        .bind(check_in)
        .bind(check_out)
        .bind(room_type.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error searching hotels: {}", e);
            AppError::Database(format!("Failed to search hotels: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    location: String,
    room_type: String,
    cost: Decimal,
    available_spaces: i32,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            room_type: PgHotelRepository::parse_room_type(&row.room_type),
            cost: row.cost,
            available_spaces: row.available_spaces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_room_type() {
        assert_eq!(
            PgHotelRepository::parse_room_type("double"),
            RoomType::Double
        );
        assert_eq!(
            PgHotelRepository::parse_room_type("family suite"),
            RoomType::FamilySuite
        );
        // Unknown values fall back to the default rather than failing the row
        assert_eq!(
            PgHotelRepository::parse_room_type("penthouse"),
            RoomType::Single
        );
    }
}
