use serde::{Deserialize, Serialize};

use crate::api::{AircraftId, MemberId, StaffId};
use crate::models::resource::{ActiveStatus, Aircraft, Member, Staff};

// =========================================================
// Resource and member directory listings
// =========================================================

/// Staff listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffInfo {
    pub id: StaffId,
    pub name: String,
    pub status: ActiveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<&Staff> for StaffInfo {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id,
            name: staff.name.clone(),
            status: staff.status,
            role: staff.role.clone(),
        }
    }
}

/// Aircraft listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftInfo {
    pub id: AircraftId,
    pub registration: String,
    pub model: String,
    pub status: ActiveStatus,
    pub is_online: bool,
}

impl From<&Aircraft> for AircraftInfo {
    fn from(aircraft: &Aircraft) -> Self {
        Self {
            id: aircraft.id,
            registration: aircraft.registration.clone(),
            model: aircraft.model.clone(),
            status: aircraft.status,
            is_online: aircraft.is_online,
        }
    }
}

/// Member search/listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInfo {
    pub id: MemberId,
    pub name: String,
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
        }
    }
}

/// Route function name constant for staff listing
pub const LIST_STAFF: &str = "list_staff";

/// Route function name constant for aircraft listing
pub const LIST_AIRCRAFT: &str = "list_aircraft";

/// Route function name constant for member search
pub const SEARCH_MEMBERS: &str = "search_members";

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_staff_info_from_staff() {
        let staff = Staff {
            id: StaffId::new(Uuid::nil()),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            role: Some("Instructor".to_string()),
            status: ActiveStatus::Active,
            qualifications: vec!["FI".to_string()],
        };
        let info = StaffInfo::from(&staff);
        assert_eq!(info.name, "Jane Doe");
        assert_eq!(info.role.as_deref(), Some("Instructor"));
    }

    #[test]
    fn test_const_values() {
        assert_eq!(LIST_STAFF, "list_staff");
        assert_eq!(LIST_AIRCRAFT, "list_aircraft");
        assert_eq!(SEARCH_MEMBERS, "search_members");
    }
}
