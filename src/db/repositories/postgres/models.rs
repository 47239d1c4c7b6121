use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{aircraft, aircraft_defects, bookings, members, staff};
use crate::api::{AircraftId, BookingId, DefectId, MemberId, StaffId};
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::booking::{Booking, NewBooking};
use crate::models::resource::{Aircraft, AircraftDefect, Member, NewMember, Staff};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub maintenance: bool,
    pub instructor_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
    pub aircraft_id: Option<Uuid>,
    pub comments: Option<String>,
    pub flight_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRow {
    /// Convert a stored row into the domain type. A status or flight type
    /// the enum does not know is corrupt data, surfaced as an internal error.
    pub fn into_domain(self) -> RepositoryResult<Booking> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;
        let flight_type = self
            .flight_type
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: String| RepositoryError::internal(e))?;
        Ok(Booking {
            id: BookingId::new(self.id),
            start: self.start_at,
            end: self.end_at,
            status,
            maintenance: self.maintenance,
            instructor_id: self.instructor_id.map(StaffId::new),
            member_id: self.member_id.map(MemberId::new),
            aircraft_id: self.aircraft_id.map(AircraftId::new),
            comments: self.comments,
            flight_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub maintenance: bool,
    pub instructor_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
    pub aircraft_id: Option<Uuid>,
    pub comments: Option<String>,
    pub flight_type: Option<String>,
}

impl NewBookingRow {
    pub fn from_domain(new: &NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_at: new.start,
            end_at: new.end,
            status: new.status.as_str().to_string(),
            maintenance: new.maintenance,
            instructor_id: new.instructor_id.map(|id| id.value()),
            member_id: new.member_id.map(|id| id.value()),
            aircraft_id: new.aircraft_id.map(|id| id.value()),
            comments: new.comments.clone(),
            flight_type: new.flight_type.map(|t| t.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StaffRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: String,
    pub qualifications: Vec<String>,
}

impl StaffRow {
    pub fn into_domain(self) -> RepositoryResult<Staff> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;
        Ok(Staff {
            id: StaffId::new(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            status,
            qualifications: self.qualifications,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = aircraft)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AircraftRow {
    pub id: Uuid,
    pub registration: String,
    pub model: String,
    pub status: String,
    pub engine_count: i32,
    pub is_online: bool,
    pub for_hire: bool,
    pub total_hours: Option<f64>,
}

impl AircraftRow {
    pub fn into_domain(self) -> RepositoryResult<Aircraft> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;
        Ok(Aircraft {
            id: AircraftId::new(self.id),
            registration: self.registration,
            model: self.model,
            status,
            engine_count: self.engine_count,
            is_online: self.is_online,
            for_hire: self.for_hire,
            total_hours: self.total_hours,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
}

impl MemberRow {
    pub fn into_domain(self) -> RepositoryResult<Member> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;
        Ok(Member {
            id: MemberId::new(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            status,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub struct NewMemberRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
}

impl NewMemberRow {
    pub fn from_domain(new: &NewMember) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            status: new.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = aircraft_defects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DefectRow {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub description: String,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub status: String,
}

impl DefectRow {
    pub fn into_domain(self) -> RepositoryResult<AircraftDefect> {
        let status = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;
        Ok(AircraftDefect {
            id: DefectId::new(self.id),
            aircraft_id: AircraftId::new(self.aircraft_id),
            description: self.description,
            reported_by: self.reported_by,
            reported_at: self.reported_at,
            status,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = aircraft_defects)]
pub struct NewDefectRow {
    pub id: Uuid,
    pub aircraft_id: Uuid,
    pub description: String,
    pub reported_by: String,
    pub status: String,
}
