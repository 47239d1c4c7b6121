//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most view-model DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Day schedule
    BlockColor, ConflictRecord, DayScheduleData, PlacedBooking, ResourceLane,
    // Defects
    DefectRecord,
    // Directory
    AircraftInfo, MemberInfo, StaffInfo,
    // Flight history
    FlightHistoryEntry,
};
pub use crate::db::services::CreateBooking;
pub use crate::models::booking::{BookingAction, UpdateBooking};
pub use crate::models::resource::{DefectStatus, NewDefect, NewMember, UpdateMember};

/// Request body for a booking status action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingActionRequest {
    /// The transition to apply
    pub action: BookingAction,
}

/// Request body for setting a defect's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectStatusRequest {
    pub status: DefectStatus,
}

/// Query parameters for member search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemberSearchQuery {
    /// Name fragment to search for
    pub q: String,
    /// Maximum number of results (clamped server-side)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// Booking list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    /// Bookings sorted ascending by start time
    pub bookings: Vec<crate::models::booking::Booking>,
    /// Total count
    pub total: usize,
}
