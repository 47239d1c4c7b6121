//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Authorization: every `/v1` endpoint requires a
//! valid bearer token; reads need `booking.view`, writes the specific
//! permission noted on each handler. Member and defect mutations ride on
//! `booking.edit` (the policy vocabulary is the booking permission set).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use super::auth::{permissions, CurrentUser};
use super::dto::{
    AircraftInfo, BookingActionRequest, BookingListResponse, CreateBooking, DefectRecord,
    DefectStatusRequest, HealthResponse, MemberInfo, MemberSearchQuery, NewDefect, NewMember,
    StaffInfo, UpdateBooking, UpdateMember,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AircraftId, BookingId, DefectId, MemberId};
use crate::db::services as db_services;
use crate::models::booking::{Booking, BookingAction};
use crate::models::resource::Member;
use crate::routes::history::FlightHistoryEntry;
use crate::routes::schedule::{ConflictRecord, DayScheduleData};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the storage
/// backend is accessible. Unauthenticated.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Bookings
// =============================================================================

/// GET /v1/bookings
///
/// List all bookings, sorted ascending by start time.
pub async fn list_bookings(
    user: CurrentUser,
    State(state): State<AppState>,
) -> HandlerResult<BookingListResponse> {
    user.require(permissions::BOOKING_VIEW)?;
    let bookings = db_services::list_bookings(state.repository.as_ref()).await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

/// POST /v1/bookings
///
/// Create a booking. Requires `booking.create`; creating directly in the
/// confirmed state additionally requires `booking.confirm`.
pub async fn create_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<CreateBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    user.require(permissions::BOOKING_CREATE)?;
    if request.confirm {
        user.require(permissions::BOOKING_CONFIRM)?;
    }

    let booking = db_services::create_booking(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /v1/bookings/{booking_id}
pub async fn get_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> HandlerResult<Booking> {
    user.require(permissions::BOOKING_VIEW)?;
    let booking =
        db_services::get_booking(state.repository.as_ref(), BookingId::new(booking_id)).await?;
    Ok(Json(booking))
}

/// PUT /v1/bookings/{booking_id}
///
/// Replace a booking's editable fields. Status moves only through the
/// action endpoint.
pub async fn update_booking(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBooking>,
) -> HandlerResult<Booking> {
    user.require(permissions::BOOKING_EDIT)?;
    let booking = db_services::update_booking(
        state.repository.as_ref(),
        BookingId::new(booking_id),
        request,
    )
    .await?;
    Ok(Json(booking))
}

/// POST /v1/bookings/{booking_id}/actions
///
/// Apply a status action. Confirm and cancel require `booking.confirm`;
/// the flight flow (check out, check in, complete) requires `booking.edit`.
pub async fn booking_action(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<BookingActionRequest>,
) -> HandlerResult<Booking> {
    match request.action {
        BookingAction::Confirm | BookingAction::Cancel => {
            user.require(permissions::BOOKING_CONFIRM)?
        }
        BookingAction::CheckOut | BookingAction::CheckIn | BookingAction::Complete => {
            user.require(permissions::BOOKING_EDIT)?
        }
    }

    let booking = db_services::apply_booking_action(
        state.repository.as_ref(),
        BookingId::new(booking_id),
        request.action,
    )
    .await?;
    Ok(Json(booking))
}

// =============================================================================
// Day schedule
// =============================================================================

/// GET /v1/schedule/{date}
///
/// Day schedule grid for the given date (YYYY-MM-DD): one lane per active
/// staff member and aircraft with placed booking blocks.
pub async fn get_day_schedule(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> HandlerResult<DayScheduleData> {
    user.require(permissions::BOOKING_VIEW)?;
    let data = db_services::day_schedule(state.repository.as_ref(), date).await?;
    Ok(Json(data))
}

/// GET /v1/schedule/{date}/conflicts
///
/// Overlapping bookings per lane for the given date.
pub async fn get_day_conflicts(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> HandlerResult<Vec<ConflictRecord>> {
    user.require(permissions::BOOKING_VIEW)?;
    let conflicts = db_services::day_conflicts(state.repository.as_ref(), date).await?;
    Ok(Json(conflicts))
}

// =============================================================================
// Directory
// =============================================================================

/// GET /v1/staff
pub async fn list_staff(
    user: CurrentUser,
    State(state): State<AppState>,
) -> HandlerResult<Vec<StaffInfo>> {
    user.require(permissions::BOOKING_VIEW)?;
    let staff = db_services::list_staff(state.repository.as_ref()).await?;
    Ok(Json(staff.iter().map(StaffInfo::from).collect()))
}

/// GET /v1/aircraft
pub async fn list_aircraft(
    user: CurrentUser,
    State(state): State<AppState>,
) -> HandlerResult<Vec<AircraftInfo>> {
    user.require(permissions::BOOKING_VIEW)?;
    let aircraft = db_services::list_aircraft(state.repository.as_ref()).await?;
    Ok(Json(aircraft.iter().map(AircraftInfo::from).collect()))
}

// =============================================================================
// Members
// =============================================================================

/// GET /v1/members
pub async fn list_members(
    user: CurrentUser,
    State(state): State<AppState>,
) -> HandlerResult<Vec<Member>> {
    user.require(permissions::BOOKING_VIEW)?;
    let members = db_services::list_members(state.repository.as_ref()).await?;
    Ok(Json(members))
}

/// GET /v1/members/search?q=...
///
/// Name search for the booking form's member picker. Returns at most a
/// handful of matches.
pub async fn search_members(
    user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<MemberSearchQuery>,
) -> HandlerResult<Vec<MemberInfo>> {
    user.require(permissions::BOOKING_VIEW)?;
    let limit = query.limit.unwrap_or(db_services::MEMBER_SEARCH_LIMIT);
    let members =
        db_services::search_members(state.repository.as_ref(), &query.q, limit).await?;
    Ok(Json(members.iter().map(MemberInfo::from).collect()))
}

/// GET /v1/members/{member_id}
pub async fn get_member(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> HandlerResult<Member> {
    user.require(permissions::BOOKING_VIEW)?;
    let member =
        db_services::get_member(state.repository.as_ref(), MemberId::new(member_id)).await?;
    Ok(Json(member))
}

/// POST /v1/members
pub async fn create_member(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<NewMember>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    user.require(permissions::BOOKING_EDIT)?;
    let member = db_services::create_member(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /v1/members/{member_id}
pub async fn update_member(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    Json(request): Json<UpdateMember>,
) -> HandlerResult<Member> {
    user.require(permissions::BOOKING_EDIT)?;
    let member = db_services::update_member(
        state.repository.as_ref(),
        MemberId::new(member_id),
        request,
    )
    .await?;
    Ok(Json(member))
}

/// GET /v1/members/{member_id}/flights
///
/// Completed flights for a member, newest first.
pub async fn member_flights(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> HandlerResult<Vec<FlightHistoryEntry>> {
    user.require(permissions::BOOKING_VIEW)?;
    let history =
        db_services::member_flight_history(state.repository.as_ref(), MemberId::new(member_id))
            .await?;
    Ok(Json(history))
}

// =============================================================================
// Aircraft defects & history
// =============================================================================

/// GET /v1/aircraft/{aircraft_id}/flights
///
/// Completed flights on an aircraft, newest first.
pub async fn aircraft_flights(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
) -> HandlerResult<Vec<FlightHistoryEntry>> {
    user.require(permissions::BOOKING_VIEW)?;
    let history = db_services::aircraft_flight_history(
        state.repository.as_ref(),
        AircraftId::new(aircraft_id),
    )
    .await?;
    Ok(Json(history))
}

/// GET /v1/defects
pub async fn list_defects(
    user: CurrentUser,
    State(state): State<AppState>,
) -> HandlerResult<Vec<DefectRecord>> {
    user.require(permissions::BOOKING_VIEW)?;
    let defects = db_services::list_defects(state.repository.as_ref()).await?;
    Ok(Json(defects.iter().map(DefectRecord::from).collect()))
}

/// GET /v1/aircraft/{aircraft_id}/defects
pub async fn aircraft_defects(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(aircraft_id): Path<Uuid>,
) -> HandlerResult<Vec<DefectRecord>> {
    user.require(permissions::BOOKING_VIEW)?;
    let defects = db_services::defects_for_aircraft(
        state.repository.as_ref(),
        AircraftId::new(aircraft_id),
    )
    .await?;
    Ok(Json(defects.iter().map(DefectRecord::from).collect()))
}

/// POST /v1/defects
pub async fn report_defect(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<NewDefect>,
) -> Result<(StatusCode, Json<DefectRecord>), AppError> {
    user.require(permissions::BOOKING_EDIT)?;
    let defect = db_services::report_defect(state.repository.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(DefectRecord::from(&defect))))
}

/// PUT /v1/defects/{defect_id}/status
pub async fn set_defect_status(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(defect_id): Path<Uuid>,
    Json(request): Json<DefectStatusRequest>,
) -> HandlerResult<DefectRecord> {
    user.require(permissions::BOOKING_EDIT)?;
    let defect = db_services::set_defect_status(
        state.repository.as_ref(),
        DefectId::new(defect_id),
        request.status,
    )
    .await?;
    Ok(Json(DefectRecord::from(&defect)))
}
