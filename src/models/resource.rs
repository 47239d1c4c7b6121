//! Bookable resources (staff, aircraft), member profiles, and aircraft
//! defect records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::{AircraftId, DefectId, MemberId, StaffId};

/// Active/inactive flag shared by staff, aircraft and member records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for ActiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown record status: {}", other)),
        }
    }
}

/// Kind of bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Staff,
    Aircraft,
}

/// Typed reference to a bookable resource.
///
/// A booking occupies a staff lane when its `instructor_id` matches, and an
/// aircraft lane when its `aircraft_id` matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ResourceId {
    Staff(StaffId),
    Aircraft(AircraftId),
}

impl ResourceId {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Staff(_) => ResourceKind::Staff,
            Self::Aircraft(_) => ResourceKind::Aircraft,
        }
    }

    pub fn uuid(&self) -> uuid::Uuid {
        match self {
            Self::Staff(id) => id.value(),
            Self::Aircraft(id) => id.value(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staff(id) => write!(f, "staff:{}", id),
            Self::Aircraft(id) => write!(f, "aircraft:{}", id),
        }
    }
}

/// An instructor or other bookable staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub status: ActiveStatus,
    #[serde(default)]
    pub qualifications: Vec<String>,
}

/// A club aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    pub registration: String,
    pub model: String,
    pub status: ActiveStatus,
    pub engine_count: i32,
    /// Shown on the public availability board.
    pub is_online: bool,
    pub for_hire: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
}

impl Aircraft {
    /// Lane label, e.g. "C172 - G-ABCD".
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.model, self.registration)
    }
}

/// A club member (customer profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: ActiveStatus,
}

/// Insert payload for a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: ActiveStatus,
}

/// Full-replace update payload for a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: ActiveStatus,
}

/// Lifecycle of an aircraft defect report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectStatus {
    Open,
    InProgress,
    Closed,
}

impl DefectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for DefectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(format!("Unknown defect status: {}", other)),
        }
    }
}

/// A reported fault against an aircraft, independent of booking state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftDefect {
    pub id: DefectId,
    pub aircraft_id: AircraftId,
    pub description: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub status: DefectStatus,
}

/// Insert payload for a defect report. New reports always start `open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDefect {
    pub aircraft_id: AircraftId,
    pub description: String,
    pub reported_by: String,
}
