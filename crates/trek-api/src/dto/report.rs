//! Staff report DTOs
//!
//! The report shows every booking across all travelers, cancelled rows
//! included, with the owner's identity joined in.

use chrono::NaiveDate;
use serde::Serialize;
use trek_core::models::{HotelBookingDetail, PackageBookingDetail, TourBookingDetail};
use uuid::Uuid;

fn traveler_fields(
    traveler: &Option<trek_core::models::Traveler>,
) -> (String, String, Option<Uuid>) {
    match traveler {
        Some(t) => (t.full_name(), t.passport_number.clone(), Some(t.customer_number)),
        None => (String::new(), String::new(), None),
    }
}

/// Hotel booking row in the staff report
#[derive(Debug, Clone, Serialize)]
pub struct HotelReportRow {
    pub booking_id: Uuid,
    pub traveler_name: String,
    pub passport_number: String,
    pub customer_number: Option<Uuid>,
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub payment: String,
}

impl From<HotelBookingDetail> for HotelReportRow {
    fn from(detail: HotelBookingDetail) -> Self {
        let (traveler_name, passport_number, customer_number) =
            traveler_fields(&detail.traveler);

        Self {
            booking_id: detail.booking.id,
            traveler_name,
            passport_number,
            customer_number,
            hotel_name: detail.hotel.name,
            room_type: detail.hotel.room_type.to_string(),
            check_in: detail.booking.check_in,
            check_out: detail.booking.check_out,
            status: detail.booking.status.to_string(),
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// Tour booking row in the staff report
#[derive(Debug, Clone, Serialize)]
pub struct TourReportRow {
    pub booking_id: Uuid,
    pub traveler_name: String,
    pub passport_number: String,
    pub customer_number: Option<Uuid>,
    pub tour_name: String,
    pub tour_start: NaiveDate,
    pub tour_end: NaiveDate,
    pub status: String,
    pub payment: String,
}

impl From<TourBookingDetail> for TourReportRow {
    fn from(detail: TourBookingDetail) -> Self {
        let (traveler_name, passport_number, customer_number) =
            traveler_fields(&detail.traveler);

        Self {
            booking_id: detail.booking.id,
            traveler_name,
            passport_number,
            customer_number,
            tour_name: detail.tour.name,
            tour_start: detail.booking.tour_start,
            tour_end: detail.booking.tour_end,
            status: detail.booking.status.to_string(),
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// Package booking row in the staff report
#[derive(Debug, Clone, Serialize)]
pub struct PackageReportRow {
    pub booking_id: Uuid,
    pub traveler_name: String,
    pub passport_number: String,
    pub customer_number: Option<Uuid>,
    pub hotel_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub tour_name: String,
    pub tour_start: NaiveDate,
    pub tour_end: NaiveDate,
    pub status: String,
    pub payment: String,
}

impl From<PackageBookingDetail> for PackageReportRow {
    fn from(detail: PackageBookingDetail) -> Self {
        let (traveler_name, passport_number, customer_number) =
            traveler_fields(&detail.traveler);

        Self {
            booking_id: detail.booking.id,
            traveler_name,
            passport_number,
            customer_number,
            hotel_name: detail.hotel.name,
            check_in: detail.booking.check_in,
            check_out: detail.booking.check_out,
            tour_name: detail.tour.name,
            tour_start: detail.booking.tour_start,
            tour_end: detail.booking.tour_end,
            status: detail.booking.status.to_string(),
            payment: detail.booking.payment.to_string(),
        }
    }
}

/// Full staff report, grouped by booking kind
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub hotel_bookings: Vec<HotelReportRow>,
    pub tour_bookings: Vec<TourReportRow>,
    pub package_bookings: Vec<PackageReportRow>,

    /// Total rows across all three ledgers
    pub total: usize,
}

impl ReportResponse {
    pub fn new(
        hotel_bookings: Vec<HotelReportRow>,
        tour_bookings: Vec<TourReportRow>,
        package_bookings: Vec<PackageReportRow>,
    ) -> Self {
        let total = hotel_bookings.len() + tour_bookings.len() + package_bookings.len();
        Self {
            hotel_bookings,
            tour_bookings,
            package_bookings,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trek_core::models::{
        BookingStatus, Hotel, HotelBooking, PaymentStatus, RoomType, Traveler,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_report_row_keeps_cancelled_status() {
        let traveler = Traveler {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Quispe".to_string(),
            passport_number: "P1234567".to_string(),
            customer_number: Uuid::new_v4(),
        };

        let hotel = Hotel {
            id: Uuid::new_v4(),
            name: "Andes Lodge".to_string(),
            location: "Cusco".to_string(),
            room_type: RoomType::Double,
            cost: dec!(120.00),
            available_spaces: 5,
        };

        let mut booking = HotelBooking::new(
            traveler.id,
            hotel.id,
            date(2024, 7, 1),
            date(2024, 7, 4),
        );
        booking.status = BookingStatus::Cancelled;
        booking.payment = PaymentStatus::Paid;

        let row = HotelReportRow::from(HotelBookingDetail {
            booking,
            hotel,
            traveler: Some(traveler),
        });

        assert_eq!(row.traveler_name, "Ana Quispe");
        assert_eq!(row.status, "cancelled");
        assert_eq!(row.payment, "paid");
    }

    #[test]
    fn test_report_total_counts_all_ledgers() {
        let report = ReportResponse::new(vec![], vec![], vec![]);
        assert_eq!(report.total, 0);
    }
}
