//! Resource timeline layout for the day schedule grid.
//!
//! The grid covers a fixed 08:00-20:00 window split into 12 hour columns.
//! Placement maps a booking's start/end timestamps onto horizontal
//! percentages of that window. Everything here is a pure function over an
//! already-fetched booking list; fetching and lane assembly live in the
//! service layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::booking::{Booking, BookingStatus};
use crate::models::resource::ResourceId;
use crate::models::time::{falls_on_day, fractional_hour};
use crate::routes::schedule::BlockColor;

/// First hour column of the grid (08:00).
pub const GRID_START_HOUR: f64 = 8.0;

/// Width of the grid in hours (08:00 through 20:00).
pub const GRID_SPAN_HOURS: f64 = 12.0;

/// Hour labels for the grid header: 8 AM through 7 PM.
pub fn hour_labels() -> Vec<u32> {
    (8..20).collect()
}

/// Horizontal placement of a booking block, as percentages of the grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotPlacement {
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Compute the grid placement for a time range.
///
/// No clamping is applied: a booking starting before 08:00 yields a negative
/// `left_pct`, and one running past 20:00 overflows 100. The fixed-window
/// grid accepts both.
pub fn grid_position(start: DateTime<Utc>, end: DateTime<Utc>) -> SlotPlacement {
    let start_hour = fractional_hour(start);
    let end_hour = fractional_hour(end);

    SlotPlacement {
        left_pct: ((start_hour - GRID_START_HOUR) / GRID_SPAN_HOURS) * 100.0,
        width_pct: ((end_hour - start_hour) / GRID_SPAN_HOURS) * 100.0,
    }
}

/// Bookings occupying a resource's lane on the given day, in input order.
///
/// A booking is on the lane iff its start timestamp falls on `day` (UTC
/// calendar date) and it references the resource. A booking that starts
/// before midnight and ends after belongs only to its start day; the
/// following day's lane does not show the tail.
pub fn bookings_for_resource<'a>(
    bookings: &'a [Booking],
    resource: ResourceId,
    day: NaiveDate,
) -> impl Iterator<Item = &'a Booking> {
    bookings
        .iter()
        .filter(move |b| falls_on_day(b.start, day) && b.is_for_resource(resource))
}

/// Lazily place a resource's bookings for a day onto the grid.
///
/// Order-preserving; overlapping bookings are not deduplicated or stacked.
/// The caller draws later entries on top of earlier ones.
pub fn place_bookings<'a>(
    bookings: &'a [Booking],
    resource: ResourceId,
    day: NaiveDate,
) -> impl Iterator<Item = (&'a Booking, SlotPlacement)> {
    bookings_for_resource(bookings, resource, day).map(|b| (b, grid_position(b.start, b.end)))
}

/// Block color for a booking status.
pub fn status_color(status: BookingStatus) -> BlockColor {
    match status {
        BookingStatus::CheckedOut => BlockColor::Orange,
        BookingStatus::Confirmed => BlockColor::Blue,
        BookingStatus::Unconfirmed => BlockColor::LightBlue,
        BookingStatus::Complete => BlockColor::Green,
        BookingStatus::Canceled => BlockColor::Red,
    }
}

/// Block label: the member's name, suffixed for in-flight and unconfirmed
/// bookings. `member_name` is empty when no member is bound or the member
/// record could not be resolved.
pub fn block_label(status: BookingStatus, member_name: &str) -> String {
    let suffix = match status {
        BookingStatus::CheckedOut => " (Flying)",
        BookingStatus::Unconfirmed => " (Unconfirmed)",
        _ => "",
    };
    if member_name.is_empty() && suffix.is_empty() {
        String::new()
    } else if member_name.is_empty() {
        suffix.trim_start().to_string()
    } else {
        format!("{}{}", member_name, suffix)
    }
}
