use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{BookingId, BookingStatus};
use crate::models::resource::ResourceKind;

// =========================================================
// Day schedule types
// =========================================================

/// Display color of a booking block, keyed by status.
///
/// Every status maps to exactly one color; statuses are a closed enum, so
/// there is no catch-all entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockColor {
    Orange,
    Blue,
    LightBlue,
    Green,
    Red,
}

/// A booking placed on the 08:00-20:00 grid of one resource lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedBooking {
    pub booking_id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub maintenance: bool,
    pub color: BlockColor,
    /// Member name, with a parenthetical suffix for checked-out and
    /// unconfirmed bookings. Empty when no member is bound or the member
    /// record is missing.
    pub label: String,
    /// Left edge as a percentage of the grid width. May be negative for
    /// bookings starting before 08:00.
    pub left_pct: f64,
    /// Width as a percentage of the grid width. `left_pct + width_pct` may
    /// exceed 100 for bookings running past 20:00.
    pub width_pct: f64,
}

/// One resource row of the day grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLane {
    pub kind: ResourceKind,
    pub resource_id: Uuid,
    pub label: String,
    pub bookings: Vec<PlacedBooking>,
}

/// Full day schedule view: staff lanes followed by aircraft lanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScheduleData {
    pub date: NaiveDate,
    /// Hour labels for the grid header (8 through 19).
    pub hours: Vec<u32>,
    pub staff: Vec<ResourceLane>,
    pub aircraft: Vec<ResourceLane>,
}

/// A pair of bookings occupying the same lane at overlapping times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub kind: ResourceKind,
    pub resource_id: Uuid,
    pub first: BookingId,
    pub second: BookingId,
    pub overlap_start: DateTime<Utc>,
    pub overlap_end: DateTime<Utc>,
}

/// Route function name constant for the day schedule
pub const GET_DAY_SCHEDULE: &str = "day_schedule";

/// Route function name constant for day conflicts
pub const GET_DAY_CONFLICTS: &str = "day_conflicts";
