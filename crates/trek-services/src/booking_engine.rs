//! Booking engine service
//!
//! Manages the booking ledger throughout its lifecycle:
//! - Create hotel, tour, and package bookings
//! - Reschedule bookings to new dates
//! - Cancel bookings (soft delete)
//! - Mark bookings as paid
//!
//! Every mutating operation runs in a single transaction. Inventory rows
//! are locked with `FOR UPDATE` and capacity moves only through guarded
//! conditional updates, so two concurrent requests can never both take
//! the last unit.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use trek_core::{
    config::BookingConfig,
    models::{
        BookingKind, BookingStatus, Hotel, HotelBooking, PackageBooking, PaymentStatus, RoomType,
        Tour, TourBooking,
    },
    AppError, AppResult,
};
use uuid::Uuid;

/// Booking engine
///
/// Handles all booking ledger operations with proper transaction
/// management. Availability is the conjunction of a covering date window
/// and a positive space count; both are re-checked inside the transaction
/// of every write.
pub struct BookingEngine {
    pool: Arc<PgPool>,
    config: BookingConfig,
}

impl BookingEngine {
    /// Create a new booking engine
    pub fn new(pool: Arc<PgPool>, config: BookingConfig) -> Self {
        Self { pool, config }
    }

    /// Validate that a date window is not reversed
    fn validate_window(start: NaiveDate, end: NaiveDate, label: &str) -> AppResult<()> {
        if end < start {
            return Err(AppError::InvalidInput(format!(
                "{} end date {} is before start date {}",
                label, end, start
            )));
        }
        Ok(())
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            error!("Failed to start transaction: {}", e);
            AppError::Transaction(format!("Failed to start transaction: {}", e))
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })
    }

    // ==================== Inventory helpers ====================

    /// Lock a hotel row for the duration of the transaction
    async fn lock_hotel(
        tx: &mut Transaction<'static, Postgres>,
        hotel_id: Uuid,
    ) -> AppResult<Hotel> {
        let row = sqlx::query_as::<Postgres, HotelRow>(
            r#"
            SELECT id, name, location, room_type, cost, available_spaces
            FROM hotels
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to lock hotel: {}", e);
            AppError::Database(format!("Failed to lock hotel: {}", e))
        })?
        .ok_or_else(|| AppError::HotelNotFound(hotel_id.to_string()))?;

        Ok(row.into())
    }

    /// Lock a tour row for the duration of the transaction
    async fn lock_tour(tx: &mut Transaction<'static, Postgres>, tour_id: Uuid) -> AppResult<Tour> {
        let row = sqlx::query_as::<Postgres, TourRow>(
            r#"
            SELECT id, name, location, cost, available_spaces
            FROM tours
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(tour_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to lock tour: {}", e);
            AppError::Database(format!("Failed to lock tour: {}", e))
        })?
        .ok_or_else(|| AppError::TourNotFound(tour_id.to_string()))?;

        Ok(row.into())
    }

    /// Check whether a single availability window fully contains the stay
    async fn hotel_window_covers(
        tx: &mut Transaction<'static, Postgres>,
        hotel_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM hotel_availabilities
                WHERE hotel_id = $1
                  AND available_from <= $2
                  AND available_to >= $3
            )
            "#,
        )
        .bind(hotel_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to check hotel availability window: {}", e);
            AppError::Database(format!("Failed to check availability: {}", e))
        })
    }

    async fn tour_window_covers(
        tx: &mut Transaction<'static, Postgres>,
        tour_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM tour_availabilities
                WHERE tour_id = $1
                  AND available_from <= $2
                  AND available_to >= $3
            )
            "#,
        )
        .bind(tour_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to check tour availability window: {}", e);
            AppError::Database(format!("Failed to check availability: {}", e))
        })
    }

    /// Take one unit of hotel capacity
    ///
    /// The decrement is guarded so the space count can never go negative,
    /// even without the caller holding a row lock.
    async fn claim_hotel_unit(
        tx: &mut Transaction<'static, Postgres>,
        hotel_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE hotels
            SET available_spaces = available_spaces - 1
            WHERE id = $1
              AND available_spaces > 0
            "#,
        )
        .bind(hotel_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to claim hotel capacity: {}", e);
            AppError::Database(format!("Failed to claim hotel capacity: {}", e))
        })?;

        if result.rows_affected() == 0 {
            warn!("Hotel {} has no spaces left", hotel_id);
            return Err(AppError::Unavailable(format!(
                "Hotel {} has no spaces left",
                hotel_id
            )));
        }

        Ok(())
    }

    async fn claim_tour_unit(
        tx: &mut Transaction<'static, Postgres>,
        tour_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tours
            SET available_spaces = available_spaces - 1
            WHERE id = $1
              AND available_spaces > 0
            "#,
        )
        .bind(tour_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to claim tour capacity: {}", e);
            AppError::Database(format!("Failed to claim tour capacity: {}", e))
        })?;

        if result.rows_affected() == 0 {
            warn!("Tour {} has no spaces left", tour_id);
            return Err(AppError::Unavailable(format!(
                "Tour {} has no spaces left",
                tour_id
            )));
        }

        Ok(())
    }

    /// Return one unit of hotel capacity
    async fn release_hotel_unit(
        tx: &mut Transaction<'static, Postgres>,
        hotel_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE hotels
            SET available_spaces = available_spaces + 1
            WHERE id = $1
            "#,
        )
        .bind(hotel_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to release hotel capacity: {}", e);
            AppError::Database(format!("Failed to release hotel capacity: {}", e))
        })?;

        Ok(())
    }

    async fn release_tour_unit(
        tx: &mut Transaction<'static, Postgres>,
        tour_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE tours
            SET available_spaces = available_spaces + 1
            WHERE id = $1
            "#,
        )
        .bind(tour_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to release tour capacity: {}", e);
            AppError::Database(format!("Failed to release tour capacity: {}", e))
        })?;

        Ok(())
    }

    // ==================== Booking creation ====================

    /// Book a hotel stay
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The hotel does not exist
    /// - No availability window fully contains the stay
    /// - The hotel has no spaces left
    /// - Database transaction fails
    #[instrument(skip(self))]
    pub async fn book_hotel(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<HotelBooking> {
        Self::validate_window(check_in, check_out, "stay")?;

        info!(
            "Booking hotel {} for traveler {}: {} to {}",
            hotel_id, user_id, check_in, check_out
        );

        let mut tx = self.begin().await?;

        let hotel = Self::lock_hotel(&mut tx, hotel_id).await?;

        if !Self::hotel_window_covers(&mut tx, hotel_id, check_in, check_out).await? {
            warn!(
                "Hotel {} is not available for {} to {}",
                hotel_id, check_in, check_out
            );
            return Err(AppError::Unavailable(format!(
                "Hotel {} is not available for the selected dates",
                hotel.name
            )));
        }

        Self::claim_hotel_unit(&mut tx, hotel_id).await?;

        let booking = HotelBooking::new(user_id, hotel_id, check_in, check_out);
        Self::insert_hotel_booking(&mut tx, &booking).await?;

        Self::commit(tx).await?;

        info!(
            "Created hotel booking {} for traveler {}",
            booking.id, user_id
        );

        Ok(booking)
    }

    /// Book a tour
    #[instrument(skip(self))]
    pub async fn book_tour(
        &self,
        user_id: Uuid,
        tour_id: Uuid,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> AppResult<TourBooking> {
        Self::validate_window(tour_start, tour_end, "tour")?;

        info!(
            "Booking tour {} for traveler {}: {} to {}",
            tour_id, user_id, tour_start, tour_end
        );

        let mut tx = self.begin().await?;

        let tour = Self::lock_tour(&mut tx, tour_id).await?;

        if !Self::tour_window_covers(&mut tx, tour_id, tour_start, tour_end).await? {
            warn!(
                "Tour {} is not available for {} to {}",
                tour_id, tour_start, tour_end
            );
            return Err(AppError::Unavailable(format!(
                "Tour {} is not available for the selected dates",
                tour.name
            )));
        }

        Self::claim_tour_unit(&mut tx, tour_id).await?;

        let booking = TourBooking::new(user_id, tour_id, tour_start, tour_end);
        Self::insert_tour_booking(&mut tx, &booking).await?;

        Self::commit(tx).await?;

        info!(
            "Created tour booking {} for traveler {}",
            booking.id, user_id
        );

        Ok(booking)
    }

    /// Book a hotel + tour package
    ///
    /// Both legs are validated and claimed inside one transaction; if
    /// either leg fails, neither loses capacity. Inventory rows are
    /// always locked hotel first to keep lock ordering consistent.
    #[instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn book_package(
        &self,
        user_id: Uuid,
        hotel_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        tour_id: Uuid,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> AppResult<PackageBooking> {
        Self::validate_window(check_in, check_out, "stay")?;
        Self::validate_window(tour_start, tour_end, "tour")?;

        info!(
            "Booking package (hotel {}, tour {}) for traveler {}",
            hotel_id, tour_id, user_id
        );

        let mut tx = self.begin().await?;

        let hotel = Self::lock_hotel(&mut tx, hotel_id).await?;
        let tour = Self::lock_tour(&mut tx, tour_id).await?;

        // Validate both legs before touching capacity
        if !Self::hotel_window_covers(&mut tx, hotel_id, check_in, check_out).await? {
            return Err(AppError::Unavailable(format!(
                "Hotel {} is not available for the selected dates",
                hotel.name
            )));
        }
        if !Self::tour_window_covers(&mut tx, tour_id, tour_start, tour_end).await? {
            return Err(AppError::Unavailable(format!(
                "Tour {} is not available for the selected dates",
                tour.name
            )));
        }

        Self::claim_hotel_unit(&mut tx, hotel_id).await?;
        Self::claim_tour_unit(&mut tx, tour_id).await?;

        let booking = PackageBooking::new(
            user_id, hotel_id, check_in, check_out, tour_id, tour_start, tour_end,
        );
        Self::insert_package_booking(&mut tx, &booking).await?;

        Self::commit(tx).await?;

        info!(
            "Created package booking {} for traveler {}",
            booking.id, user_id
        );

        Ok(booking)
    }

    // ==================== Reschedule ====================

    /// Move a hotel booking to new dates
    ///
    /// The booking keeps the unit it already holds; rescheduling is a
    /// release-and-reacquire of the same unit and leaves capacity
    /// unchanged. The `legacy_edit_redecrement` flag reproduces the old
    /// behavior of charging a second unit on every edit.
    #[instrument(skip(self))]
    pub async fn reschedule_hotel(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<HotelBooking> {
        Self::validate_window(check_in, check_out, "stay")?;

        info!(
            "Rescheduling hotel booking {} to {} - {}",
            booking_id, check_in, check_out
        );

        let mut tx = self.begin().await?;

        let mut booking = Self::lock_hotel_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;
        Self::check_active(booking.status, booking_id)?;

        let hotel = Self::lock_hotel(&mut tx, booking.hotel_id).await?;

        if !Self::hotel_window_covers(&mut tx, booking.hotel_id, check_in, check_out).await? {
            warn!(
                "Hotel {} is not available for {} to {}",
                booking.hotel_id, check_in, check_out
            );
            return Err(AppError::Unavailable(format!(
                "Hotel {} is not available for the selected dates",
                hotel.name
            )));
        }

        if self.config.legacy_edit_redecrement {
            Self::claim_hotel_unit(&mut tx, booking.hotel_id).await?;
        }

        let updated_at = Self::touch_hotel_booking_dates(&mut tx, booking_id, check_in, check_out)
            .await?;

        Self::commit(tx).await?;

        booking.check_in = check_in;
        booking.check_out = check_out;
        booking.updated_at = updated_at;

        info!("Rescheduled hotel booking {}", booking_id);

        Ok(booking)
    }

    /// Move a tour booking to new dates
    #[instrument(skip(self))]
    pub async fn reschedule_tour(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> AppResult<TourBooking> {
        Self::validate_window(tour_start, tour_end, "tour")?;

        info!(
            "Rescheduling tour booking {} to {} - {}",
            booking_id, tour_start, tour_end
        );

        let mut tx = self.begin().await?;

        let mut booking = Self::lock_tour_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;
        Self::check_active(booking.status, booking_id)?;

        let tour = Self::lock_tour(&mut tx, booking.tour_id).await?;

        if !Self::tour_window_covers(&mut tx, booking.tour_id, tour_start, tour_end).await? {
            warn!(
                "Tour {} is not available for {} to {}",
                booking.tour_id, tour_start, tour_end
            );
            return Err(AppError::Unavailable(format!(
                "Tour {} is not available for the selected dates",
                tour.name
            )));
        }

        if self.config.legacy_edit_redecrement {
            Self::claim_tour_unit(&mut tx, booking.tour_id).await?;
        }

        let updated_at =
            Self::touch_tour_booking_dates(&mut tx, booking_id, tour_start, tour_end).await?;

        Self::commit(tx).await?;

        booking.tour_start = tour_start;
        booking.tour_end = tour_end;
        booking.updated_at = updated_at;

        info!("Rescheduled tour booking {}", booking_id);

        Ok(booking)
    }

    /// Move both legs of a package booking to new dates
    ///
    /// Both legs are validated before either is written; a failed tour
    /// leg never leaves the hotel leg half-moved.
    #[instrument(skip(self))]
    #[allow(clippy::too_many_arguments)]
    pub async fn reschedule_package(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> AppResult<PackageBooking> {
        Self::validate_window(check_in, check_out, "stay")?;
        Self::validate_window(tour_start, tour_end, "tour")?;

        info!("Rescheduling package booking {}", booking_id);

        let mut tx = self.begin().await?;

        let mut booking = Self::lock_package_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;
        Self::check_active(booking.status, booking_id)?;

        let hotel = Self::lock_hotel(&mut tx, booking.hotel_id).await?;
        let tour = Self::lock_tour(&mut tx, booking.tour_id).await?;

        if !Self::hotel_window_covers(&mut tx, booking.hotel_id, check_in, check_out).await? {
            return Err(AppError::Unavailable(format!(
                "Hotel {} is not available for the selected dates",
                hotel.name
            )));
        }
        if !Self::tour_window_covers(&mut tx, booking.tour_id, tour_start, tour_end).await? {
            return Err(AppError::Unavailable(format!(
                "Tour {} is not available for the selected dates",
                tour.name
            )));
        }

        if self.config.legacy_edit_redecrement {
            Self::claim_hotel_unit(&mut tx, booking.hotel_id).await?;
            Self::claim_tour_unit(&mut tx, booking.tour_id).await?;
        }

        let updated_at = sqlx::query_scalar::<Postgres, DateTime<Utc>>(
            r#"
            UPDATE package_bookings
            SET check_in = $2,
                check_out = $3,
                tour_start = $4,
                tour_end = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(booking_id)
        .bind(check_in)
        .bind(check_out)
        .bind(tour_start)
        .bind(tour_end)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to update package booking: {}", e);
            AppError::Database(format!("Failed to update booking: {}", e))
        })?;

        Self::commit(tx).await?;

        booking.check_in = check_in;
        booking.check_out = check_out;
        booking.tour_start = tour_start;
        booking.tour_end = tour_end;
        booking.updated_at = updated_at;

        info!("Rescheduled package booking {}", booking_id);

        Ok(booking)
    }

    // ==================== Cancellation ====================

    /// Cancel a booking of any kind
    ///
    /// Cancellation is a soft delete: the row keeps its payment state and
    /// stays visible to the staff report. Cancelling an already cancelled
    /// booking is a no-op. When `restore_capacity_on_cancel` is set (the
    /// default) each inventory unit the booking held is returned.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        kind: BookingKind,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        match kind {
            BookingKind::Hotel => self.cancel_hotel(booking_id, user_id).await,
            BookingKind::Tour => self.cancel_tour(booking_id, user_id).await,
            BookingKind::Package => self.cancel_package(booking_id, user_id).await,
        }
    }

    async fn cancel_hotel(&self, booking_id: Uuid, user_id: Uuid) -> AppResult<()> {
        info!("Cancelling hotel booking {}", booking_id);

        let mut tx = self.begin().await?;

        let booking = Self::lock_hotel_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;

        if !booking.status.is_active() {
            debug!("Hotel booking {} already cancelled, skipping", booking_id);
            return Ok(());
        }

        Self::mark_cancelled(&mut tx, "hotel_bookings", booking_id).await?;

        if self.config.restore_capacity_on_cancel {
            Self::release_hotel_unit(&mut tx, booking.hotel_id).await?;
        }

        Self::commit(tx).await?;

        info!("Cancelled hotel booking {}", booking_id);

        Ok(())
    }

    async fn cancel_tour(&self, booking_id: Uuid, user_id: Uuid) -> AppResult<()> {
        info!("Cancelling tour booking {}", booking_id);

        let mut tx = self.begin().await?;

        let booking = Self::lock_tour_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;

        if !booking.status.is_active() {
            debug!("Tour booking {} already cancelled, skipping", booking_id);
            return Ok(());
        }

        Self::mark_cancelled(&mut tx, "tour_bookings", booking_id).await?;

        if self.config.restore_capacity_on_cancel {
            Self::release_tour_unit(&mut tx, booking.tour_id).await?;
        }

        Self::commit(tx).await?;

        info!("Cancelled tour booking {}", booking_id);

        Ok(())
    }

    async fn cancel_package(&self, booking_id: Uuid, user_id: Uuid) -> AppResult<()> {
        info!("Cancelling package booking {}", booking_id);

        let mut tx = self.begin().await?;

        let booking = Self::lock_package_booking(&mut tx, booking_id).await?;
        Self::check_owner(booking.user_id, user_id, booking_id)?;

        if !booking.status.is_active() {
            debug!("Package booking {} already cancelled, skipping", booking_id);
            return Ok(());
        }

        Self::mark_cancelled(&mut tx, "package_bookings", booking_id).await?;

        // A package holds one unit of each leg
        if self.config.restore_capacity_on_cancel {
            Self::release_hotel_unit(&mut tx, booking.hotel_id).await?;
            Self::release_tour_unit(&mut tx, booking.tour_id).await?;
        }

        Self::commit(tx).await?;

        info!("Cancelled package booking {}", booking_id);

        Ok(())
    }

    // ==================== Payment ====================

    /// Mark a booking as paid
    ///
    /// Payment flips once and is never reversed; paying an already paid
    /// booking is a no-op. A cancelled booking can no longer be paid.
    #[instrument(skip(self))]
    pub async fn mark_paid(
        &self,
        kind: BookingKind,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<()> {
        info!("Marking {} booking {} as paid", kind, booking_id);

        let mut tx = self.begin().await?;

        let (owner, status, payment) = match kind {
            BookingKind::Hotel => {
                let b = Self::lock_hotel_booking(&mut tx, booking_id).await?;
                (b.user_id, b.status, b.payment)
            }
            BookingKind::Tour => {
                let b = Self::lock_tour_booking(&mut tx, booking_id).await?;
                (b.user_id, b.status, b.payment)
            }
            BookingKind::Package => {
                let b = Self::lock_package_booking(&mut tx, booking_id).await?;
                (b.user_id, b.status, b.payment)
            }
        };

        Self::check_owner(owner, user_id, booking_id)?;

        if !status.is_active() {
            warn!("Refusing payment for cancelled booking {}", booking_id);
            return Err(AppError::BookingCancelled(booking_id.to_string()));
        }

        if payment.is_paid() {
            debug!("Booking {} already paid, skipping", booking_id);
            return Ok(());
        }

        let table = match kind {
            BookingKind::Hotel => "hotel_bookings",
            BookingKind::Tour => "tour_bookings",
            BookingKind::Package => "package_bookings",
        };

        sqlx::query(&format!(
            r#"
            UPDATE {}
            SET payment = 'paid',
                updated_at = NOW()
            WHERE id = $1
            "#,
            table
        ))
        .bind(booking_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to mark booking paid: {}", e);
            AppError::Database(format!("Failed to mark booking paid: {}", e))
        })?;

        Self::commit(tx).await?;

        info!("Marked {} booking {} as paid", kind, booking_id);

        Ok(())
    }

    // ==================== Internal ====================

    fn check_owner(owner: Uuid, user_id: Uuid, booking_id: Uuid) -> AppResult<()> {
        if owner != user_id {
            warn!(
                "Traveler {} attempted to modify booking {} owned by {}",
                user_id, booking_id, owner
            );
            return Err(AppError::Forbidden);
        }
        Ok(())
    }

    fn check_active(status: BookingStatus, booking_id: Uuid) -> AppResult<()> {
        if !status.is_active() {
            return Err(AppError::BookingCancelled(booking_id.to_string()));
        }
        Ok(())
    }

    async fn mark_cancelled(
        tx: &mut Transaction<'static, Postgres>,
        table: &str,
        booking_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(&format!(
            r#"
            UPDATE {}
            SET status = 'cancelled',
                updated_at = NOW()
            WHERE id = $1
              AND status = 'active'
            "#,
            table
        ))
        .bind(booking_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to cancel booking: {}", e);
            AppError::Database(format!("Failed to cancel booking: {}", e))
        })?;

        Ok(())
    }

    async fn lock_hotel_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking_id: Uuid,
    ) -> AppResult<HotelBooking> {
        let row = sqlx::query_as::<Postgres, HotelBookingRow>(
            r#"
            SELECT id, user_id, hotel_id, check_in, check_out,
                   status, payment, created_at, updated_at
            FROM hotel_bookings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to lock hotel booking: {}", e);
            AppError::Database(format!("Failed to lock booking: {}", e))
        })?
        .ok_or_else(|| AppError::BookingNotFound(booking_id.to_string()))?;

        Ok(row.into())
    }

    async fn lock_tour_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking_id: Uuid,
    ) -> AppResult<TourBooking> {
        let row = sqlx::query_as::<Postgres, TourBookingRow>(
            r#"
            SELECT id, user_id, tour_id, tour_start, tour_end,
                   status, payment, created_at, updated_at
            FROM tour_bookings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to lock tour booking: {}", e);
            AppError::Database(format!("Failed to lock booking: {}", e))
        })?
        .ok_or_else(|| AppError::BookingNotFound(booking_id.to_string()))?;

        Ok(row.into())
    }

    async fn lock_package_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking_id: Uuid,
    ) -> AppResult<PackageBooking> {
        let row = sqlx::query_as::<Postgres, PackageBookingRow>(
            r#"
            SELECT id, user_id, hotel_id, check_in, check_out,
                   tour_id, tour_start, tour_end,
                   status, payment, created_at, updated_at
            FROM package_bookings
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to lock package booking: {}", e);
            AppError::Database(format!("Failed to lock booking: {}", e))
        })?
        .ok_or_else(|| AppError::BookingNotFound(booking_id.to_string()))?;

        Ok(row.into())
    }

    async fn insert_hotel_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking: &HotelBooking,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO hotel_bookings (
                id, user_id, hotel_id, check_in, check_out,
                status, payment, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.hotel_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.status.to_string())
        .bind(booking.payment.to_string())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to create hotel booking: {}", e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(())
    }

    async fn insert_tour_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking: &TourBooking,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tour_bookings (
                id, user_id, tour_id, tour_start, tour_end,
                status, payment, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.tour_id)
        .bind(booking.tour_start)
        .bind(booking.tour_end)
        .bind(booking.status.to_string())
        .bind(booking.payment.to_string())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to create tour booking: {}", e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(())
    }

    async fn insert_package_booking(
        tx: &mut Transaction<'static, Postgres>,
        booking: &PackageBooking,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO package_bookings (
                id, user_id, hotel_id, check_in, check_out,
                tour_id, tour_start, tour_end,
                status, payment, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.hotel_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.tour_id)
        .bind(booking.tour_start)
        .bind(booking.tour_end)
        .bind(booking.status.to_string())
        .bind(booking.payment.to_string())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to create package booking: {}", e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(())
    }

    async fn touch_hotel_booking_dates(
        tx: &mut Transaction<'static, Postgres>,
        booking_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<DateTime<Utc>> {
        sqlx::query_scalar::<Postgres, DateTime<Utc>>(
            r#"
            UPDATE hotel_bookings
            SET check_in = $2,
                check_out = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(booking_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to update hotel booking: {}", e);
            AppError::Database(format!("Failed to update booking: {}", e))
        })
    }

    async fn touch_tour_booking_dates(
        tx: &mut Transaction<'static, Postgres>,
        booking_id: Uuid,
        tour_start: NaiveDate,
        tour_end: NaiveDate,
    ) -> AppResult<DateTime<Utc>> {
        sqlx::query_scalar::<Postgres, DateTime<Utc>>(
            r#"
            UPDATE tour_bookings
            SET tour_start = $2,
                tour_end = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING updated_at
            "#,
        )
        .bind(booking_id)
        .bind(tour_start)
        .bind(tour_end)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            error!("Failed to update tour booking: {}", e);
            AppError::Database(format!("Failed to update booking: {}", e))
        })
    }
}

// ==================== Row mapping ====================

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
            room_type: RoomType::from_str(&row.room_type).unwrap_or(RoomType::Single),
            cost: row.cost,
            available_spaces: row.available_spaces,
        }
    }
}

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

#[derive(Debug, sqlx::FromRow)]
struct HotelBookingRow {
    id: Uuid,
    user_id: Uuid,
    hotel_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HotelBookingRow> for HotelBooking {
    fn from(row: HotelBookingRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            hotel_id: row.hotel_id,
            check_in: row.check_in,
            check_out: row.check_out,
            status: BookingStatus::from_str(&row.status).unwrap_or_default(),
            payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TourBookingRow {
    id: Uuid,
    user_id: Uuid,
    tour_id: Uuid,
    tour_start: NaiveDate,
    tour_end: NaiveDate,
    status: String,
    payment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TourBookingRow> for TourBooking {
    fn from(row: TourBookingRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            tour_id: row.tour_id,
            tour_start: row.tour_start,
            tour_end: row.tour_end,
            status: BookingStatus::from_str(&row.status).unwrap_or_default(),
            payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PackageBookingRow {
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
}

impl From<PackageBookingRow> for PackageBooking {
    fn from(row: PackageBookingRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            hotel_id: row.hotel_id,
            check_in: row.check_in,
            check_out: row.check_out,
            tour_id: row.tour_id,
            tour_start: row.tour_start,
            tour_end: row.tour_end,
            status: BookingStatus::from_str(&row.status).unwrap_or_default(),
            payment: PaymentStatus::from_str(&row.payment).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reversed_window_rejected() {
        let result =
            BookingEngine::validate_window(date(2024, 6, 10), date(2024, 6, 5), "stay");
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_single_day_window_accepted() {
        // A one-day tour has equal start and end dates
        assert!(BookingEngine::validate_window(date(2024, 6, 10), date(2024, 6, 10), "tour").is_ok());
    }

    #[test]
    fn test_ownership_check() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        assert!(BookingEngine::check_owner(owner, owner, booking_id).is_ok());
        assert!(matches!(
            BookingEngine::check_owner(owner, stranger, booking_id),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_cancelled_booking_rejected_for_edit() {
        let booking_id = Uuid::new_v4();
        assert!(BookingEngine::check_active(BookingStatus::Active, booking_id).is_ok());
        assert!(matches!(
            BookingEngine::check_active(BookingStatus::Cancelled, booking_id),
            Err(AppError::BookingCancelled(_))
        ));
    }

    #[test]
    fn test_booking_row_mapping() {
        let row = HotelBookingRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            hotel_id: Uuid::new_v4(),
            check_in: date(2024, 3, 1),
            check_out: date(2024, 3, 5),
            status: "cancelled".to_string(),
            payment: "paid".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let booking: HotelBooking = row.into();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.payment, PaymentStatus::Paid);
    }
}
