use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, FlightType};

// =========================================================
// Completed flight history types
// =========================================================

/// One completed flight, as shown in the member and aircraft history tables.
///
/// Names are resolved at assembly time; a dangling reference degrades to
/// `None` rather than failing the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightHistoryEntry {
    pub booking_id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_type: Option<FlightType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Route function name constant for member flight history
pub const GET_MEMBER_FLIGHTS: &str = "member_flight_history";

/// Route function name constant for aircraft flight history
pub const GET_AIRCRAFT_FLIGHTS: &str = "aircraft_flight_history";
