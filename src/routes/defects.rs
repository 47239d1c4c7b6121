use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AircraftId, DefectId};
use crate::models::resource::{AircraftDefect, DefectStatus};

// =========================================================
// Aircraft defect listing types
// =========================================================

/// Defect listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefectRecord {
    pub id: DefectId,
    pub aircraft_id: AircraftId,
    pub description: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub status: DefectStatus,
}

impl From<&AircraftDefect> for DefectRecord {
    fn from(defect: &AircraftDefect) -> Self {
        Self {
            id: defect.id,
            aircraft_id: defect.aircraft_id,
            description: defect.description.clone(),
            reported_by: defect.reported_by.clone(),
            reported_at: defect.reported_at,
            status: defect.status,
        }
    }
}

/// Route function name constant for defect listing
pub const LIST_DEFECTS: &str = "list_defects";

/// Route function name constant for per-aircraft defects
pub const GET_AIRCRAFT_DEFECTS: &str = "defects_for_aircraft";
