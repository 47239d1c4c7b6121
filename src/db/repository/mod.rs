//! Repository trait definitions.
//!
//! The traits are split by concern so fakes and partial implementations can
//! pick what they need; `FullRepository` is the supertrait the application
//! holds. All methods are async and object-safe via `async_trait`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{AircraftId, BookingId, DefectId, MemberId, StaffId};
use crate::models::booking::{Booking, BookingStatus, NewBooking, UpdateBooking};
use crate::models::resource::{
    Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember, Staff, UpdateMember,
};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Booking record store.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings, sorted ascending by start time (ties by id for a
    /// stable order).
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>>;

    /// Bookings whose start timestamp falls on the given UTC calendar day.
    async fn bookings_on_day(&self, day: NaiveDate) -> RepositoryResult<Vec<Booking>>;

    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking>;

    async fn insert_booking(&self, new: NewBooking) -> RepositoryResult<Booking>;

    /// Replace the editable fields of a booking. Status is not touched.
    async fn update_booking(&self, id: BookingId, update: UpdateBooking)
        -> RepositoryResult<Booking>;

    /// Write a new status. Callers are responsible for having consulted the
    /// status machine; this is a plain store operation.
    async fn set_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking>;
}

/// Read-mostly directory of bookable resources.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// All staff, sorted by name.
    async fn list_staff(&self) -> RepositoryResult<Vec<Staff>>;

    async fn get_staff(&self, id: StaffId) -> RepositoryResult<Staff>;

    /// All aircraft, sorted by model then registration.
    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>>;

    async fn get_aircraft(&self, id: AircraftId) -> RepositoryResult<Aircraft>;
}

/// Member profile store.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members, sorted by name.
    async fn list_members(&self) -> RepositoryResult<Vec<Member>>;

    async fn get_member(&self, id: MemberId) -> RepositoryResult<Member>;

    /// Case-insensitive substring search on member name, returning at most
    /// `limit` matches sorted by name.
    async fn search_members(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Member>>;

    async fn insert_member(&self, new: NewMember) -> RepositoryResult<Member>;

    async fn update_member(&self, id: MemberId, update: UpdateMember)
        -> RepositoryResult<Member>;
}

/// Aircraft defect store.
#[async_trait]
pub trait DefectRepository: Send + Sync {
    /// All defects, newest report first.
    async fn list_defects(&self) -> RepositoryResult<Vec<AircraftDefect>>;

    /// Defects for one aircraft, newest report first.
    async fn defects_for_aircraft(
        &self,
        aircraft_id: AircraftId,
    ) -> RepositoryResult<Vec<AircraftDefect>>;

    async fn insert_defect(&self, new: NewDefect) -> RepositoryResult<AircraftDefect>;

    async fn set_defect_status(
        &self,
        id: DefectId,
        status: DefectStatus,
    ) -> RepositoryResult<AircraftDefect>;
}

/// Everything the application needs from a storage backend.
#[async_trait]
pub trait FullRepository:
    BookingRepository + DirectoryRepository + MemberRepository + DefectRepository
{
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
