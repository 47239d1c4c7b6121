//! Booking entity and its status machine.
//!
//! A booking reserves an instructor, an aircraft, or both, for a member over
//! a time range. Its lifecycle is a small forward-only state machine driven
//! entirely by explicit user actions; there are no timer-driven transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::{AircraftId, BookingId, MemberId, StaffId};
use crate::models::resource::ResourceId;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Unconfirmed,
    Confirmed,
    CheckedOut,
    Complete,
    Canceled,
}

impl BookingStatus {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
            Self::CheckedOut => "checked-out",
            Self::Complete => "complete",
            Self::Canceled => "canceled",
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Canceled)
    }

    /// Actions that may legally be applied in this state.
    pub fn allowed_actions(&self) -> &'static [BookingAction] {
        match self {
            Self::Unconfirmed => &[BookingAction::Confirm, BookingAction::Cancel],
            Self::Confirmed => &[
                BookingAction::CheckOut,
                BookingAction::Complete,
                BookingAction::Cancel,
            ],
            Self::CheckedOut => &[BookingAction::CheckIn],
            Self::Complete | Self::Canceled => &[],
        }
    }

    /// Apply an action, yielding the successor state.
    ///
    /// Illegal combinations return the `(state, action)` pair so callers can
    /// report the rejected transition without issuing any write.
    pub fn apply(&self, action: BookingAction) -> Result<BookingStatus, TransitionError> {
        let next = match (self, action) {
            (Self::Unconfirmed, BookingAction::Confirm) => Self::Confirmed,
            (Self::Unconfirmed, BookingAction::Cancel) => Self::Canceled,
            (Self::Confirmed, BookingAction::CheckOut) => Self::CheckedOut,
            (Self::Confirmed, BookingAction::Complete) => Self::Complete,
            (Self::Confirmed, BookingAction::Cancel) => Self::Canceled,
            (Self::CheckedOut, BookingAction::CheckIn) => Self::Complete,
            (from, action) => return Err(TransitionError { from: *from, action }),
        };
        Ok(next)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(Self::Unconfirmed),
            "confirmed" => Ok(Self::Confirmed),
            "checked-out" => Ok(Self::CheckedOut),
            "complete" => Ok(Self::Complete),
            "canceled" => Ok(Self::Canceled),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// User action driving a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    Confirm,
    Cancel,
    CheckOut,
    CheckIn,
    Complete,
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::CheckOut => "check_out",
            Self::CheckIn => "check_in",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action} a booking in status '{from}'")]
pub struct TransitionError {
    pub from: BookingStatus,
    pub action: BookingAction,
}

/// Category of flight a booking is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightType {
    AeroclubDual,
    AeroclubSolo,
    TrialFlight,
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AeroclubDual => "aeroclub_dual",
            Self::AeroclubSolo => "aeroclub_solo",
            Self::TrialFlight => "trial_flight",
        }
    }
}

impl FromStr for FlightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aeroclub_dual" => Ok(Self::AeroclubDual),
            "aeroclub_solo" => Ok(Self::AeroclubSolo),
            "trial_flight" => Ok(Self::TrialFlight),
            other => Err(format!("Unknown flight type: {}", other)),
        }
    }
}

/// A reservation of club resources over a time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    /// Non-flight use of the aircraft (maintenance block).
    pub maintenance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<StaffId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_id: Option<AircraftId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_type: Option<FlightType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking occupies the given resource's lane.
    pub fn is_for_resource(&self, resource: ResourceId) -> bool {
        match resource {
            ResourceId::Staff(id) => self.instructor_id == Some(id),
            ResourceId::Aircraft(id) => self.aircraft_id == Some(id),
        }
    }
}

/// Insert payload for a booking. Validation happens in the service layer
/// before this reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub maintenance: bool,
    pub instructor_id: Option<StaffId>,
    pub member_id: Option<MemberId>,
    pub aircraft_id: Option<AircraftId>,
    pub comments: Option<String>,
    pub flight_type: Option<FlightType>,
}

/// Full-replace update payload for a booking's editable fields.
///
/// Status is deliberately absent: status only moves through
/// [`BookingStatus::apply`] via the action endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub maintenance: bool,
    pub instructor_id: Option<StaffId>,
    pub member_id: Option<MemberId>,
    pub aircraft_id: Option<AircraftId>,
    pub comments: Option<String>,
    pub flight_type: Option<FlightType>,
}
