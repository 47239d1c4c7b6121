#[cfg(test)]
mod tests {
    use crate::api::{AircraftId, BookingId, MemberId, StaffId};
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{MemberRepository, RepositoryError};
    use crate::db::services;
    use crate::db::services::CreateBooking;
    use crate::models::booking::{BookingAction, BookingStatus};
    use crate::models::resource::{
        ActiveStatus, Aircraft, DefectStatus, NewDefect, NewMember, Staff,
    };
    use crate::routes::schedule::BlockColor;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn utc(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, mi, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn staff(name: &str, status: ActiveStatus) -> Staff {
        Staff {
            id: StaffId::generate(),
            name: name.to_string(),
            email: format!("{}@aeroclub.example", name.to_lowercase().replace(' ', ".")),
            phone: None,
            role: Some("Instructor".to_string()),
            status,
            qualifications: vec![],
        }
    }

    fn aircraft(registration: &str, model: &str, status: ActiveStatus) -> Aircraft {
        Aircraft {
            id: AircraftId::generate(),
            registration: registration.to_string(),
            model: model.to_string(),
            status,
            engine_count: 1,
            is_online: true,
            for_hire: true,
            total_hours: None,
        }
    }

    fn request(start: DateTime<Utc>, end: DateTime<Utc>, instructor: Option<StaffId>) -> CreateBooking {
        CreateBooking {
            start,
            end,
            instructor_id: instructor,
            member_id: None,
            aircraft_id: None,
            maintenance: false,
            comments: None,
            flight_type: None,
            confirm: false,
        }
    }

    async fn seed_member(repo: &LocalRepository, name: &str) -> MemberId {
        repo.insert_member(NewMember {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            status: ActiveStatus::Active,
        })
        .await
        .unwrap()
        .id
    }

    // ==================== Booking creation ====================

    #[tokio::test]
    async fn test_create_booking_defaults_unconfirmed() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));

        let booking = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id)),
        )
        .await
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Unconfirmed);
    }

    #[tokio::test]
    async fn test_create_booking_with_confirm_flag() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));

        let mut req = request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id));
        req.confirm = true;
        let booking = services::create_booking(&repo, req).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_time_range() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));

        let err = services::create_booking(
            &repo,
            request(utc(1, 10, 0), utc(1, 9, 0), Some(instructor.id)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        // Nothing was written
        assert!(services::list_bookings(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_equal_start_end() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let err = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 9, 0), Some(instructor.id)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_resources() {
        let repo = LocalRepository::new();
        // No instructor and no aircraft is invalid regardless of times.
        let err = services::create_booking(&repo, request(utc(1, 9, 0), utc(1, 10, 0), None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(services::list_bookings(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_instructor() {
        let repo = LocalRepository::new();
        let err = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 10, 0), Some(StaffId::generate())),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_member() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let mut req = request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id));
        req.member_id = Some(MemberId::generate());
        let err = services::create_booking(&repo, req).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    // ==================== Status actions ====================

    #[tokio::test]
    async fn test_confirm_then_check_out_then_check_in() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let booking = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id)),
        )
        .await
        .unwrap();

        let confirmed =
            services::apply_booking_action(&repo, booking.id, BookingAction::Confirm)
                .await
                .unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let flying =
            services::apply_booking_action(&repo, booking.id, BookingAction::CheckOut)
                .await
                .unwrap();
        assert_eq!(flying.status, BookingStatus::CheckedOut);

        let complete =
            services::apply_booking_action(&repo, booking.id, BookingAction::CheckIn)
                .await
                .unwrap();
        assert_eq!(complete.status, BookingStatus::Complete);
    }

    #[tokio::test]
    async fn test_cancel_from_unconfirmed() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let booking = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id)),
        )
        .await
        .unwrap();

        let canceled = services::apply_booking_action(&repo, booking.id, BookingAction::Cancel)
            .await
            .unwrap();
        assert_eq!(canceled.status, BookingStatus::Canceled);
    }

    #[tokio::test]
    async fn test_illegal_action_leaves_record_untouched() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let booking = services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 10, 0), Some(instructor.id)),
        )
        .await
        .unwrap();

        // check_out is not legal from unconfirmed
        let err =
            services::apply_booking_action(&repo, booking.id, BookingAction::CheckOut)
                .await
                .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));

        let unchanged = services::get_booking(&repo, booking.id).await.unwrap();
        assert_eq!(unchanged.status, BookingStatus::Unconfirmed);
        assert_eq!(unchanged.updated_at, booking.updated_at);
    }

    #[tokio::test]
    async fn test_action_on_missing_booking_is_not_found() {
        let repo = LocalRepository::new();
        let err =
            services::apply_booking_action(&repo, BookingId::generate(), BookingAction::Confirm)
                .await
                .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    // ==================== Day schedule ====================

    #[tokio::test]
    async fn test_day_schedule_lanes_and_placement() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let plane = repo.add_aircraft(aircraft("G-ABCD", "C172", ActiveStatus::Active));
        let member_id = seed_member(&repo, "Sam Pilot").await;

        let mut req = request(utc(1, 9, 0), utc(1, 10, 30), Some(instructor.id));
        req.aircraft_id = Some(plane.id);
        req.member_id = Some(member_id);
        services::create_booking(&repo, req).await.unwrap();

        let schedule = services::day_schedule(&repo, day()).await.unwrap();
        assert_eq!(schedule.hours, (8..20).collect::<Vec<u32>>());
        assert_eq!(schedule.staff.len(), 1);
        assert_eq!(schedule.aircraft.len(), 1);
        assert_eq!(schedule.aircraft[0].label, "C172 - G-ABCD");

        // The booking references both resources, so it appears in both lanes.
        let placed = &schedule.staff[0].bookings[0];
        assert!((placed.left_pct - 100.0 / 12.0).abs() < 1e-9);
        assert!((placed.width_pct - 12.5).abs() < 1e-9);
        assert_eq!(placed.color, BlockColor::LightBlue);
        assert_eq!(placed.label, "Sam Pilot (Unconfirmed)");
        assert_eq!(schedule.aircraft[0].bookings.len(), 1);
    }

    #[tokio::test]
    async fn test_day_schedule_excludes_inactive_resources() {
        let repo = LocalRepository::new();
        repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        repo.add_staff(staff("Old Timer", ActiveStatus::Inactive));
        repo.add_aircraft(aircraft("G-WREK", "PA28", ActiveStatus::Inactive));

        let schedule = services::day_schedule(&repo, day()).await.unwrap();
        assert_eq!(schedule.staff.len(), 1);
        assert_eq!(schedule.staff[0].label, "Jane Doe");
        assert!(schedule.aircraft.is_empty());
    }

    #[tokio::test]
    async fn test_day_schedule_missing_member_degrades_to_bare_label() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        // Insert directly through the repository so the dangling member
        // reference bypasses creation-time validation.
        use crate::db::repository::BookingRepository;
        repo.insert_booking(crate::models::booking::NewBooking {
            start: utc(1, 9, 0),
            end: utc(1, 10, 0),
            status: BookingStatus::Confirmed,
            maintenance: false,
            instructor_id: Some(instructor.id),
            member_id: Some(MemberId::generate()),
            aircraft_id: None,
            comments: None,
            flight_type: None,
        })
        .await
        .unwrap();

        let schedule = services::day_schedule(&repo, day()).await.unwrap();
        let placed = &schedule.staff[0].bookings[0];
        // Confirmed bookings carry no suffix, so the label is empty.
        assert_eq!(placed.label, "");
        assert_eq!(placed.color, BlockColor::Blue);
    }

    #[tokio::test]
    async fn test_day_schedule_idempotent_without_writes() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        for hour in [14, 9, 11] {
            services::create_booking(
                &repo,
                request(utc(1, hour, 0), utc(1, hour + 1, 0), Some(instructor.id)),
            )
            .await
            .unwrap();
        }

        let first = services::day_schedule(&repo, day()).await.unwrap();
        let second = services::day_schedule(&repo, day()).await.unwrap();
        let ids = |s: &crate::routes::schedule::DayScheduleData| {
            s.staff[0]
                .bookings
                .iter()
                .map(|b| (b.booking_id, b.left_pct, b.width_pct))
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_day_conflicts_reports_overlap() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        services::create_booking(
            &repo,
            request(utc(1, 9, 0), utc(1, 11, 0), Some(instructor.id)),
        )
        .await
        .unwrap();
        services::create_booking(
            &repo,
            request(utc(1, 10, 0), utc(1, 12, 0), Some(instructor.id)),
        )
        .await
        .unwrap();

        let conflicts = services::day_conflicts(&repo, day()).await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].overlap_start, utc(1, 10, 0));
        assert_eq!(conflicts[0].overlap_end, utc(1, 11, 0));
    }

    // ==================== Members ====================

    #[tokio::test]
    async fn test_search_members_clamps_limit() {
        let repo = LocalRepository::new();
        for i in 0..10 {
            seed_member(&repo, &format!("Member {:02}", i)).await;
        }

        let results = services::search_members(&repo, "member", 50).await.unwrap();
        assert_eq!(results.len(), services::MEMBER_SEARCH_LIMIT);
    }

    #[tokio::test]
    async fn test_search_members_short_query_yields_nothing() {
        let repo = LocalRepository::new();
        seed_member(&repo, "Sam Pilot").await;

        assert!(services::search_members(&repo, "S", 5).await.unwrap().is_empty());
        assert!(services::search_members(&repo, "  ", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_member_rejects_blank_name() {
        let repo = LocalRepository::new();
        let err = services::create_member(
            &repo,
            NewMember {
                name: "   ".to_string(),
                email: "x@example.com".to_string(),
                phone: None,
                status: ActiveStatus::Active,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    // ==================== Defects ====================

    #[tokio::test]
    async fn test_report_defect_requires_known_aircraft() {
        let repo = LocalRepository::new();
        let err = services::report_defect(
            &repo,
            NewDefect {
                aircraft_id: AircraftId::generate(),
                description: "Flat tyre".to_string(),
                reported_by: "Jane".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_defect_lifecycle() {
        let repo = LocalRepository::new();
        let plane = repo.add_aircraft(aircraft("G-ABCD", "C172", ActiveStatus::Active));
        let defect = services::report_defect(
            &repo,
            NewDefect {
                aircraft_id: plane.id,
                description: "Flat tyre".to_string(),
                reported_by: "Jane".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(defect.status, DefectStatus::Open);

        let in_progress =
            services::set_defect_status(&repo, defect.id, DefectStatus::InProgress)
                .await
                .unwrap();
        assert_eq!(in_progress.status, DefectStatus::InProgress);

        let listed = services::defects_for_aircraft(&repo, plane.id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    // ==================== Flight history ====================

    #[tokio::test]
    async fn test_member_flight_history_completed_only() {
        let repo = LocalRepository::new();
        let instructor = repo.add_staff(staff("Jane Doe", ActiveStatus::Active));
        let member_id = seed_member(&repo, "Sam Pilot").await;

        // One completed flight and one still confirmed; only the completed
        // one is history.
        for (hour, complete) in [(9, true), (11, false)] {
            let mut req = request(utc(1, hour, 0), utc(1, hour + 1, 0), Some(instructor.id));
            req.member_id = Some(member_id);
            let booking = services::create_booking(&repo, req).await.unwrap();
            services::apply_booking_action(&repo, booking.id, BookingAction::Confirm)
                .await
                .unwrap();
            if complete {
                services::apply_booking_action(&repo, booking.id, BookingAction::Complete)
                    .await
                    .unwrap();
            }
        }

        let history = services::member_flight_history(&repo, member_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].member_name.as_deref(), Some("Sam Pilot"));
        assert_eq!(history[0].instructor_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_aircraft_flight_history_newest_first() {
        let repo = LocalRepository::new();
        let plane = repo.add_aircraft(aircraft("G-ABCD", "C172", ActiveStatus::Active));

        for d in [1, 3, 2] {
            let mut req = request(utc(d, 9, 0), utc(d, 10, 0), None);
            req.aircraft_id = Some(plane.id);
            req.confirm = true;
            let booking = services::create_booking(&repo, req).await.unwrap();
            services::apply_booking_action(&repo, booking.id, BookingAction::Complete)
                .await
                .unwrap();
        }

        let history = services::aircraft_flight_history(&repo, plane.id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].start >= w[1].start));
        assert_eq!(history[0].aircraft_label.as_deref(), Some("C172 - G-ABCD"));
    }

    #[tokio::test]
    async fn test_history_for_unknown_member_is_not_found() {
        let repo = LocalRepository::new();
        let err = services::member_flight_history(&repo, MemberId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
