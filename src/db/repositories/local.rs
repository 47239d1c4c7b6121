//! In-memory repository for unit testing and local development.
//!
//! Backed by `parking_lot` locks over plain hash maps. This is the reference
//! implementation the service tests run against; the sorting contracts match
//! the Postgres implementation exactly.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::api::{AircraftId, BookingId, DefectId, MemberId, StaffId};
use crate::db::repository::{
    BookingRepository, DefectRepository, DirectoryRepository, ErrorContext, FullRepository,
    MemberRepository, RepositoryError, RepositoryResult,
};
use crate::models::booking::{Booking, BookingStatus, NewBooking, UpdateBooking};
use crate::models::resource::{
    Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember, Staff, UpdateMember,
};

/// In-memory implementation of all repository traits.
#[derive(Default)]
pub struct LocalRepository {
    bookings: RwLock<HashMap<BookingId, Booking>>,
    staff: RwLock<HashMap<StaffId, Staff>>,
    aircraft: RwLock<HashMap<AircraftId, Aircraft>>,
    members: RwLock<HashMap<MemberId, Member>>,
    defects: RwLock<HashMap<DefectId, AircraftDefect>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a staff record, returning it. Test/dev convenience.
    pub fn add_staff(&self, staff: Staff) -> Staff {
        self.staff.write().insert(staff.id, staff.clone());
        staff
    }

    /// Seed an aircraft record, returning it. Test/dev convenience.
    pub fn add_aircraft(&self, aircraft: Aircraft) -> Aircraft {
        self.aircraft.write().insert(aircraft.id, aircraft.clone());
        aircraft
    }

    fn not_found(entity: &str, id: impl ToString) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("{} not found", entity),
            ErrorContext::default()
                .with_entity(entity)
                .with_entity_id(id),
        )
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self.bookings.read().values().cloned().collect();
        bookings.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn bookings_on_day(&self, day: NaiveDate) -> RepositoryResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .values()
            .filter(|b| b.start.date_naive() == day)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        Ok(bookings)
    }

    async fn get_booking(&self, id: BookingId) -> RepositoryResult<Booking> {
        self.bookings
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("booking", id))
    }

    async fn insert_booking(&self, new: NewBooking) -> RepositoryResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: BookingId::generate(),
            start: new.start,
            end: new.end,
            status: new.status,
            maintenance: new.maintenance,
            instructor_id: new.instructor_id,
            member_id: new.member_id,
            aircraft_id: new.aircraft_id,
            comments: new.comments,
            flight_type: new.flight_type,
            created_at: now,
            updated_at: now,
        };
        self.bookings.write().insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(
        &self,
        id: BookingId,
        update: UpdateBooking,
    ) -> RepositoryResult<Booking> {
        let mut bookings = self.bookings.write();
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("booking", id))?;
        booking.start = update.start;
        booking.end = update.end;
        booking.maintenance = update.maintenance;
        booking.instructor_id = update.instructor_id;
        booking.member_id = update.member_id;
        booking.aircraft_id = update.aircraft_id;
        booking.comments = update.comments;
        booking.flight_type = update.flight_type;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn set_booking_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        let mut bookings = self.bookings.write();
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("booking", id))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }
}

#[async_trait]
impl DirectoryRepository for LocalRepository {
    async fn list_staff(&self) -> RepositoryResult<Vec<Staff>> {
        let mut staff: Vec<Staff> = self.staff.read().values().cloned().collect();
        staff.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(staff)
    }

    async fn get_staff(&self, id: StaffId) -> RepositoryResult<Staff> {
        self.staff
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("staff", id))
    }

    async fn list_aircraft(&self) -> RepositoryResult<Vec<Aircraft>> {
        let mut aircraft: Vec<Aircraft> = self.aircraft.read().values().cloned().collect();
        aircraft.sort_by(|a, b| {
            a.model
                .cmp(&b.model)
                .then(a.registration.cmp(&b.registration))
        });
        Ok(aircraft)
    }

    async fn get_aircraft(&self, id: AircraftId) -> RepositoryResult<Aircraft> {
        self.aircraft
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("aircraft", id))
    }
}

#[async_trait]
impl MemberRepository for LocalRepository {
    async fn list_members(&self) -> RepositoryResult<Vec<Member>> {
        let mut members: Vec<Member> = self.members.read().values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }

    async fn get_member(&self, id: MemberId) -> RepositoryResult<Member> {
        self.members
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found("member", id))
    }

    async fn search_members(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Member>> {
        let needle = query.to_lowercase();
        let mut matches: Vec<Member> = self
            .members
            .read()
            .values()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn insert_member(&self, new: NewMember) -> RepositoryResult<Member> {
        let member = Member {
            id: MemberId::generate(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            status: new.status,
        };
        self.members.write().insert(member.id, member.clone());
        Ok(member)
    }

    async fn update_member(
        &self,
        id: MemberId,
        update: UpdateMember,
    ) -> RepositoryResult<Member> {
        let mut members = self.members.write();
        let member = members
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("member", id))?;
        member.name = update.name;
        member.email = update.email;
        member.phone = update.phone;
        member.status = update.status;
        Ok(member.clone())
    }
}

#[async_trait]
impl DefectRepository for LocalRepository {
    async fn list_defects(&self) -> RepositoryResult<Vec<AircraftDefect>> {
        let mut defects: Vec<AircraftDefect> = self.defects.read().values().cloned().collect();
        defects.sort_by(|a, b| b.reported_at.cmp(&a.reported_at).then(a.id.cmp(&b.id)));
        Ok(defects)
    }

    async fn defects_for_aircraft(
        &self,
        aircraft_id: AircraftId,
    ) -> RepositoryResult<Vec<AircraftDefect>> {
        let mut defects: Vec<AircraftDefect> = self
            .defects
            .read()
            .values()
            .filter(|d| d.aircraft_id == aircraft_id)
            .cloned()
            .collect();
        defects.sort_by(|a, b| b.reported_at.cmp(&a.reported_at).then(a.id.cmp(&b.id)));
        Ok(defects)
    }

    async fn insert_defect(&self, new: NewDefect) -> RepositoryResult<AircraftDefect> {
        let defect = AircraftDefect {
            id: DefectId::generate(),
            aircraft_id: new.aircraft_id,
            description: new.description,
            reported_by: new.reported_by,
            reported_at: Utc::now(),
            status: DefectStatus::Open,
        };
        self.defects.write().insert(defect.id, defect.clone());
        Ok(defect)
    }

    async fn set_defect_status(
        &self,
        id: DefectId,
        status: DefectStatus,
    ) -> RepositoryResult<AircraftDefect> {
        let mut defects = self.defects.write();
        let defect = defects
            .get_mut(&id)
            .ok_or_else(|| Self::not_found("defect", id))?;
        defect.status = status;
        Ok(defect.clone())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
