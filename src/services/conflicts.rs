//! Overlap detection for a resource's day lane.
//!
//! The grid itself draws overlapping bookings on top of each other without
//! complaint; this scan reports the overlaps so the surrounding UI can flag
//! them. Writes are never rejected on overlap.

use chrono::NaiveDate;

use crate::models::booking::{Booking, BookingStatus};
use crate::models::resource::ResourceId;
use crate::routes::schedule::ConflictRecord;
use crate::services::timeline::bookings_for_resource;

/// Find every overlapping pair of bookings on one resource lane for a day.
///
/// Ranges are treated as half-open `[start, end)`: back-to-back bookings do
/// not conflict. Canceled bookings never conflict. Pairs are reported once,
/// in input order.
pub fn find_conflicts(
    bookings: &[Booking],
    resource: ResourceId,
    day: NaiveDate,
) -> Vec<ConflictRecord> {
    let lane: Vec<&Booking> = bookings_for_resource(bookings, resource, day)
        .filter(|b| b.status != BookingStatus::Canceled)
        .collect();

    let mut conflicts = Vec::new();
    for (i, first) in lane.iter().enumerate() {
        for second in &lane[i + 1..] {
            if first.start < second.end && second.start < first.end {
                conflicts.push(ConflictRecord {
                    kind: resource.kind(),
                    resource_id: resource.uuid(),
                    first: first.id,
                    second: second.id,
                    overlap_start: first.start.max(second.start),
                    overlap_end: first.end.min(second.end),
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BookingId, StaffId};
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
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
    fn test_no_conflicts_when_disjoint() {
        let instructor = StaffId::generate();
        let bookings = vec![
            booking(utc(1, 9, 0), utc(1, 10, 0), instructor),
            booking(utc(1, 10, 0), utc(1, 11, 0), instructor),
        ];
        // Back-to-back is not a conflict (half-open ranges).
        assert!(find_conflicts(&bookings, ResourceId::Staff(instructor), day()).is_empty());
    }

    #[test]
    fn test_overlap_reported_once() {
        let instructor = StaffId::generate();
        let bookings = vec![
            booking(utc(1, 9, 0), utc(1, 11, 0), instructor),
            booking(utc(1, 10, 0), utc(1, 12, 0), instructor),
        ];
        let conflicts = find_conflicts(&bookings, ResourceId::Staff(instructor), day());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].first, bookings[0].id);
        assert_eq!(conflicts[0].second, bookings[1].id);
        assert_eq!(conflicts[0].overlap_start, utc(1, 10, 0));
        assert_eq!(conflicts[0].overlap_end, utc(1, 11, 0));
    }

    #[test]
    fn test_canceled_bookings_do_not_conflict() {
        let instructor = StaffId::generate();
        let mut canceled = booking(utc(1, 9, 0), utc(1, 11, 0), instructor);
        canceled.status = BookingStatus::Canceled;
        let bookings = vec![canceled, booking(utc(1, 10, 0), utc(1, 12, 0), instructor)];
        assert!(find_conflicts(&bookings, ResourceId::Staff(instructor), day()).is_empty());
    }

    #[test]
    fn test_three_way_overlap_reports_all_pairs() {
        let instructor = StaffId::generate();
        let bookings = vec![
            booking(utc(1, 9, 0), utc(1, 12, 0), instructor),
            booking(utc(1, 10, 0), utc(1, 13, 0), instructor),
            booking(utc(1, 11, 0), utc(1, 14, 0), instructor),
        ];
        let conflicts = find_conflicts(&bookings, ResourceId::Staff(instructor), day());
        assert_eq!(conflicts.len(), 3);
    }

    #[test]
    fn test_other_day_not_scanned() {
        let instructor = StaffId::generate();
        let bookings = vec![
            booking(utc(2, 9, 0), utc(2, 11, 0), instructor),
            booking(utc(2, 10, 0), utc(2, 12, 0), instructor),
        ];
        assert!(find_conflicts(&bookings, ResourceId::Staff(instructor), day()).is_empty());
    }
}
