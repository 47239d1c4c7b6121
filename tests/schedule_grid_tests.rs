//! Grid placement properties exercised through the public crate API.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use acs_rust::api::{BookingId, StaffId};
use acs_rust::models::booking::{Booking, BookingStatus};
use acs_rust::models::resource::ResourceId;
use acs_rust::services::{
    bookings_for_resource, grid_position, place_bookings, GRID_SPAN_HOURS, GRID_START_HOUR,
};

fn utc(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
}

fn booking(start: DateTime<Utc>, end: DateTime<Utc>, instructor: StaffId) -> Booking {
    Booking {
        id: BookingId::generate(),
        start,
        end,
        status: BookingStatus::Confirmed,
        maintenance: false,
        instructor_id: Some(instructor),
        member_id: None,
        aircraft_id: None,
        comments: None,
        flight_type: None,
        created_at: start,
        updated_at: start,
    }
}

#[test]
fn test_quarter_hour_resolution() {
    // Every 15-minute slot in the window maps back to its exact fraction.
    for quarter in 0u32..(12 * 4) {
        let minutes = quarter * 15;
        let start = utc(1, 8 + minutes / 60, minutes % 60);
        let end = utc(1, 8 + (minutes + 15) / 60, (minutes + 15) % 60);
        let p = grid_position(start, end);

        let expected_left = (quarter as f64 * 0.25 / GRID_SPAN_HOURS) * 100.0;
        assert!(
            (p.left_pct - expected_left).abs() < 1e-9,
            "quarter {}: left {} != {}",
            quarter,
            p.left_pct,
            expected_left
        );
        let expected_width = (0.25 / GRID_SPAN_HOURS) * 100.0;
        assert!((p.width_pct - expected_width).abs() < 1e-9);
    }
}

#[test]
fn test_left_plus_width_never_exceeds_window_for_in_window_bookings() {
    for start_h in 8u32..19 {
        for end_h in (start_h + 1)..=19 {
            let p = grid_position(utc(1, start_h, 0), utc(1, end_h, 0));
            assert!(p.left_pct >= 0.0);
            assert!(p.left_pct + p.width_pct <= 100.0 + 1e-9);
        }
    }
}

#[test]
fn test_window_constants() {
    assert_eq!(GRID_START_HOUR, 8.0);
    assert_eq!(GRID_SPAN_HOURS, 12.0);
}

#[test]
fn test_filter_and_placement_compose() {
    let jane = StaffId::generate();
    let john = StaffId::generate();
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let bookings = vec![
        booking(utc(1, 9, 0), utc(1, 10, 30), jane),
        booking(utc(1, 9, 0), utc(1, 10, 30), john),
        booking(utc(2, 9, 0), utc(2, 10, 30), jane),
    ];

    let filtered: Vec<_> = bookings_for_resource(&bookings, ResourceId::Staff(jane), day).collect();
    assert_eq!(filtered.len(), 1);

    let placed: Vec<_> = place_bookings(&bookings, ResourceId::Staff(jane), day).collect();
    assert_eq!(placed.len(), 1);
    let (placed_booking, placement) = &placed[0];
    assert_eq!(placed_booking.id, bookings[0].id);
    assert!((placement.left_pct - 100.0 / 12.0).abs() < 1e-9);
    assert!((placement.width_pct - 12.5).abs() < 1e-9);
}
