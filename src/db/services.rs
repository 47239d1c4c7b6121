//! Service layer: high-level operations over a repository.
//!
//! These functions work with any `FullRepository` implementation and hold
//! the business rules: booking validation, the status machine hookup, and
//! assembly of the day schedule view. Handlers and bindings should call
//! these rather than the repository directly.
//!
//! Validation always runs before any write; a rejected request never
//! reaches the repository.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{AircraftId, BookingId, DefectId, MemberId, StaffId};
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::booking::{
    Booking, BookingAction, BookingStatus, FlightType, NewBooking, UpdateBooking,
};
use crate::models::resource::{
    Aircraft, AircraftDefect, DefectStatus, Member, NewDefect, NewMember, ResourceId, Staff,
    UpdateMember,
};
use crate::routes::history::FlightHistoryEntry;
use crate::routes::schedule::{ConflictRecord, DayScheduleData, PlacedBooking, ResourceLane};
use crate::services::conflicts::find_conflicts;
use crate::services::timeline::{block_label, hour_labels, place_bookings, status_color};

/// Hard cap on member search results.
pub const MEMBER_SEARCH_LIMIT: usize = 5;

/// Request payload for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub instructor_id: Option<StaffId>,
    #[serde(default)]
    pub member_id: Option<MemberId>,
    #[serde(default)]
    pub aircraft_id: Option<AircraftId>,
    #[serde(default)]
    pub maintenance: bool,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub flight_type: Option<FlightType>,
    /// Create directly in `confirmed` instead of `unconfirmed`.
    #[serde(default)]
    pub confirm: bool,
}

// ==================== Health ====================

/// Verify the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Bookings ====================

/// All bookings, sorted ascending by start time.
pub async fn list_bookings(repo: &dyn FullRepository) -> RepositoryResult<Vec<Booking>> {
    repo.list_bookings().await
}

pub async fn get_booking(repo: &dyn FullRepository, id: BookingId) -> RepositoryResult<Booking> {
    repo.get_booking(id).await
}

/// Validate and store a new booking.
///
/// The initial status is `unconfirmed`, or `confirmed` when the request
/// carries the explicit confirm flag. Exactly one insert is issued.
pub async fn create_booking(
    repo: &dyn FullRepository,
    request: CreateBooking,
) -> RepositoryResult<Booking> {
    validate_booking(
        repo,
        request.start,
        request.end,
        request.instructor_id,
        request.aircraft_id,
        request.member_id,
    )
    .await?;

    let status = if request.confirm {
        BookingStatus::Confirmed
    } else {
        BookingStatus::Unconfirmed
    };

    let booking = repo
        .insert_booking(NewBooking {
            start: request.start,
            end: request.end,
            status,
            maintenance: request.maintenance,
            instructor_id: request.instructor_id,
            member_id: request.member_id,
            aircraft_id: request.aircraft_id,
            comments: request.comments,
            flight_type: request.flight_type,
        })
        .await?;

    log::info!("Created booking {} ({})", booking.id, booking.status);
    Ok(booking)
}

/// Validate and replace a booking's editable fields. Status is untouched;
/// use [`apply_booking_action`] for lifecycle changes.
pub async fn update_booking(
    repo: &dyn FullRepository,
    id: BookingId,
    update: UpdateBooking,
) -> RepositoryResult<Booking> {
    validate_booking(
        repo,
        update.start,
        update.end,
        update.instructor_id,
        update.aircraft_id,
        update.member_id,
    )
    .await?;

    repo.update_booking(id, update).await
}

/// Drive a booking through its status machine.
///
/// Loads the current record, checks the transition, and issues exactly one
/// status write for a legal action. An illegal action is a validation error
/// and no write happens; a failed write surfaces the repository error and
/// the stored record keeps its last known-good state.
pub async fn apply_booking_action(
    repo: &dyn FullRepository,
    id: BookingId,
    action: BookingAction,
) -> RepositoryResult<Booking> {
    let booking = repo.get_booking(id).await?;
    let next = booking
        .status
        .apply(action)
        .map_err(|e| RepositoryError::validation(e.to_string()))?;

    let updated = repo.set_booking_status(id, next).await?;
    log::info!(
        "Booking {} transitioned {} -> {}",
        id,
        booking.status,
        updated.status
    );
    Ok(updated)
}

async fn validate_booking(
    repo: &dyn FullRepository,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    instructor_id: Option<StaffId>,
    aircraft_id: Option<AircraftId>,
    member_id: Option<MemberId>,
) -> RepositoryResult<()> {
    if end <= start {
        return Err(RepositoryError::validation(
            "End time must be after start time",
        ));
    }

    if instructor_id.is_none() && aircraft_id.is_none() {
        return Err(RepositoryError::validation(
            "Select at least an instructor or an aircraft",
        ));
    }

    if let Some(id) = instructor_id {
        repo.get_staff(id).await.map_err(|e| reference_error(e, "instructor", id))?;
    }
    if let Some(id) = aircraft_id {
        repo.get_aircraft(id)
            .await
            .map_err(|e| reference_error(e, "aircraft", id))?;
    }
    if let Some(id) = member_id {
        repo.get_member(id).await.map_err(|e| reference_error(e, "member", id))?;
    }

    Ok(())
}

/// A dangling reference in a write request is the caller's mistake, not a
/// missing-resource lookup: report it as a validation failure.
fn reference_error(err: RepositoryError, entity: &str, id: impl std::fmt::Display) -> RepositoryError {
    match err {
        RepositoryError::NotFound { .. } => {
            RepositoryError::validation(format!("Unknown {}: {}", entity, id))
        }
        other => other,
    }
}

// ==================== Day schedule ====================

/// Assemble the day schedule view: one lane per active staff member and
/// active aircraft, each with its bookings placed on the 08:00-20:00 grid.
pub async fn day_schedule(
    repo: &dyn FullRepository,
    date: NaiveDate,
) -> RepositoryResult<DayScheduleData> {
    let staff = repo.list_staff().await?;
    let aircraft = repo.list_aircraft().await?;
    let bookings = repo.bookings_on_day(date).await?;
    let member_names = member_name_index(repo).await?;

    let staff_lanes = staff
        .iter()
        .filter(|s| s.status.is_active())
        .map(|s| ResourceLane {
            kind: crate::models::resource::ResourceKind::Staff,
            resource_id: s.id.value(),
            label: s.name.clone(),
            bookings: lane_bookings(&bookings, ResourceId::Staff(s.id), date, &member_names),
        })
        .collect();

    let aircraft_lanes = aircraft
        .iter()
        .filter(|a| a.status.is_active())
        .map(|a| ResourceLane {
            kind: crate::models::resource::ResourceKind::Aircraft,
            resource_id: a.id.value(),
            label: a.display_name(),
            bookings: lane_bookings(&bookings, ResourceId::Aircraft(a.id), date, &member_names),
        })
        .collect();

    Ok(DayScheduleData {
        date,
        hours: hour_labels(),
        staff: staff_lanes,
        aircraft: aircraft_lanes,
    })
}

fn lane_bookings(
    bookings: &[Booking],
    resource: ResourceId,
    date: NaiveDate,
    member_names: &HashMap<MemberId, String>,
) -> Vec<PlacedBooking> {
    place_bookings(bookings, resource, date)
        .map(|(booking, placement)| {
            let member_name = booking
                .member_id
                .and_then(|id| member_names.get(&id).cloned())
                .unwrap_or_default();
            PlacedBooking {
                booking_id: booking.id,
                start: booking.start,
                end: booking.end,
                status: booking.status,
                maintenance: booking.maintenance,
                color: status_color(booking.status),
                label: block_label(booking.status, &member_name),
                left_pct: placement.left_pct,
                width_pct: placement.width_pct,
            }
        })
        .collect()
}

async fn member_name_index(
    repo: &dyn FullRepository,
) -> RepositoryResult<HashMap<MemberId, String>> {
    Ok(repo
        .list_members()
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect())
}

/// Overlap report for every active lane of the day.
pub async fn day_conflicts(
    repo: &dyn FullRepository,
    date: NaiveDate,
) -> RepositoryResult<Vec<ConflictRecord>> {
    let staff = repo.list_staff().await?;
    let aircraft = repo.list_aircraft().await?;
    let bookings = repo.bookings_on_day(date).await?;

    let mut conflicts = Vec::new();
    for s in staff.iter().filter(|s| s.status.is_active()) {
        conflicts.extend(find_conflicts(&bookings, ResourceId::Staff(s.id), date));
    }
    for a in aircraft.iter().filter(|a| a.status.is_active()) {
        conflicts.extend(find_conflicts(&bookings, ResourceId::Aircraft(a.id), date));
    }
    Ok(conflicts)
}

// ==================== Directory ====================

pub async fn list_staff(repo: &dyn FullRepository) -> RepositoryResult<Vec<Staff>> {
    repo.list_staff().await
}

pub async fn list_aircraft(repo: &dyn FullRepository) -> RepositoryResult<Vec<Aircraft>> {
    repo.list_aircraft().await
}

// ==================== Members ====================

pub async fn list_members(repo: &dyn FullRepository) -> RepositoryResult<Vec<Member>> {
    repo.list_members().await
}

pub async fn get_member(repo: &dyn FullRepository, id: MemberId) -> RepositoryResult<Member> {
    repo.get_member(id).await
}

/// Name search for the booking form's member picker. Queries shorter than
/// two characters yield nothing, and the limit is clamped to
/// [`MEMBER_SEARCH_LIMIT`] regardless of what the caller asks for.
pub async fn search_members(
    repo: &dyn FullRepository,
    query: &str,
    limit: usize,
) -> RepositoryResult<Vec<Member>> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Ok(Vec::new());
    }
    let limit = limit.min(MEMBER_SEARCH_LIMIT);
    repo.search_members(query, limit).await
}

pub async fn create_member(
    repo: &dyn FullRepository,
    new: NewMember,
) -> RepositoryResult<Member> {
    if new.name.trim().is_empty() {
        return Err(RepositoryError::validation("Member name must not be empty"));
    }
    repo.insert_member(new).await
}

pub async fn update_member(
    repo: &dyn FullRepository,
    id: MemberId,
    update: UpdateMember,
) -> RepositoryResult<Member> {
    if update.name.trim().is_empty() {
        return Err(RepositoryError::validation("Member name must not be empty"));
    }
    repo.update_member(id, update).await
}

// ==================== Defects ====================

pub async fn list_defects(repo: &dyn FullRepository) -> RepositoryResult<Vec<AircraftDefect>> {
    repo.list_defects().await
}

pub async fn defects_for_aircraft(
    repo: &dyn FullRepository,
    aircraft_id: AircraftId,
) -> RepositoryResult<Vec<AircraftDefect>> {
    repo.defects_for_aircraft(aircraft_id).await
}

/// Record a new defect against an aircraft. The aircraft must exist; new
/// reports always start `open`.
pub async fn report_defect(
    repo: &dyn FullRepository,
    new: NewDefect,
) -> RepositoryResult<AircraftDefect> {
    if new.description.trim().is_empty() {
        return Err(RepositoryError::validation(
            "Defect description must not be empty",
        ));
    }
    repo.get_aircraft(new.aircraft_id)
        .await
        .map_err(|e| reference_error(e, "aircraft", new.aircraft_id))?;
    repo.insert_defect(new).await
}

pub async fn set_defect_status(
    repo: &dyn FullRepository,
    id: DefectId,
    status: DefectStatus,
) -> RepositoryResult<AircraftDefect> {
    repo.set_defect_status(id, status).await
}

// ==================== Flight history ====================

/// Completed flights for a member, newest first. Maintenance blocks are not
/// flights and are excluded.
pub async fn member_flight_history(
    repo: &dyn FullRepository,
    member_id: MemberId,
) -> RepositoryResult<Vec<FlightHistoryEntry>> {
    // Surface a proper not-found for an unknown member rather than an
    // empty history.
    repo.get_member(member_id).await?;
    let bookings = repo.list_bookings().await?;
    let completed = bookings
        .into_iter()
        .filter(|b| {
            b.status == BookingStatus::Complete && !b.maintenance && b.member_id == Some(member_id)
        })
        .collect();
    flight_history_entries(repo, completed).await
}

/// Completed flights on an aircraft, newest first.
pub async fn aircraft_flight_history(
    repo: &dyn FullRepository,
    aircraft_id: AircraftId,
) -> RepositoryResult<Vec<FlightHistoryEntry>> {
    repo.get_aircraft(aircraft_id).await?;
    let bookings = repo.list_bookings().await?;
    let completed = bookings
        .into_iter()
        .filter(|b| {
            b.status == BookingStatus::Complete
                && !b.maintenance
                && b.aircraft_id == Some(aircraft_id)
        })
        .collect();
    flight_history_entries(repo, completed).await
}

async fn flight_history_entries(
    repo: &dyn FullRepository,
    mut bookings: Vec<Booking>,
) -> RepositoryResult<Vec<FlightHistoryEntry>> {
    bookings.sort_by(|a, b| b.start.cmp(&a.start));

    let member_names = member_name_index(repo).await?;
    let staff_names: HashMap<StaffId, String> = repo
        .list_staff()
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let aircraft_labels: HashMap<AircraftId, String> = repo
        .list_aircraft()
        .await?
        .into_iter()
        .map(|a| (a.id, a.display_name()))
        .collect();

    Ok(bookings
        .into_iter()
        .map(|b| FlightHistoryEntry {
            booking_id: b.id,
            start: b.start,
            end: b.end,
            flight_type: b.flight_type,
            member_name: b.member_id.and_then(|id| member_names.get(&id).cloned()),
            instructor_name: b.instructor_id.and_then(|id| staff_names.get(&id).cloned()),
            aircraft_label: b.aircraft_id.and_then(|id| aircraft_labels.get(&id).cloned()),
            comments: b.comments,
        })
        .collect())
}
