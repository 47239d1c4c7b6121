//! Public API surface for the Rust backend.
//!
//! This file consolidates the identifier newtypes and re-exports the DTO
//! types used by the HTTP API. All types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::routes::defects::DefectRecord;
pub use crate::routes::directory::AircraftInfo;
pub use crate::routes::directory::MemberInfo;
pub use crate::routes::directory::StaffInfo;
pub use crate::routes::history::FlightHistoryEntry;
pub use crate::routes::schedule::BlockColor;
pub use crate::routes::schedule::ConflictRecord;
pub use crate::routes::schedule::DayScheduleData;
pub use crate::routes::schedule::PlacedBooking;
pub use crate::routes::schedule::ResourceLane;

pub use crate::models::booking::{
    Booking, BookingAction, BookingStatus, FlightType, NewBooking, UpdateBooking,
};
pub use crate::models::resource::{
    ActiveStatus, Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember,
    ResourceId, ResourceKind, Staff, UpdateMember,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

/// Staff identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub Uuid);

/// Aircraft identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AircraftId(pub Uuid);

/// Member identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

/// Aircraft defect identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DefectId(pub Uuid);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: Uuid) -> Self {
                $name(value)
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                $name(Uuid::new_v4())
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

impl_id!(BookingId);
impl_id!(StaffId);
impl_id!(AircraftId);
impl_id!(MemberId);
impl_id!(DefectId);
