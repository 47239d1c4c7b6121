#[cfg(test)]
mod tests {
    use crate::models::booking::{BookingAction, BookingStatus};

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(BookingStatus::Unconfirmed.as_str(), "unconfirmed");
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(BookingStatus::CheckedOut.as_str(), "checked-out");
        assert_eq!(BookingStatus::Complete.as_str(), "complete");
        assert_eq!(BookingStatus::Canceled.as_str(), "canceled");
    }

    #[test]
    fn test_status_serde_roundtrip() {
        for status in [
            BookingStatus::Unconfirmed,
            BookingStatus::Confirmed,
            BookingStatus::CheckedOut,
            BookingStatus::Complete,
            BookingStatus::Canceled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: BookingStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_unconfirmed_confirm() {
        let next = BookingStatus::Unconfirmed
            .apply(BookingAction::Confirm)
            .unwrap();
        assert_eq!(next, BookingStatus::Confirmed);
    }

    #[test]
    fn test_unconfirmed_cancel() {
        let next = BookingStatus::Unconfirmed
            .apply(BookingAction::Cancel)
            .unwrap();
        assert_eq!(next, BookingStatus::Canceled);
    }

    #[test]
    fn test_unconfirmed_rejects_everything_else() {
        for action in [
            BookingAction::CheckOut,
            BookingAction::CheckIn,
            BookingAction::Complete,
        ] {
            let err = BookingStatus::Unconfirmed.apply(action).unwrap_err();
            assert_eq!(err.from, BookingStatus::Unconfirmed);
            assert_eq!(err.action, action);
        }
    }

    #[test]
    fn test_confirmed_transitions() {
        assert_eq!(
            BookingStatus::Confirmed
                .apply(BookingAction::CheckOut)
                .unwrap(),
            BookingStatus::CheckedOut
        );
        assert_eq!(
            BookingStatus::Confirmed
                .apply(BookingAction::Complete)
                .unwrap(),
            BookingStatus::Complete
        );
        assert_eq!(
            BookingStatus::Confirmed
                .apply(BookingAction::Cancel)
                .unwrap(),
            BookingStatus::Canceled
        );
        assert!(BookingStatus::Confirmed
            .apply(BookingAction::Confirm)
            .is_err());
        assert!(BookingStatus::Confirmed
            .apply(BookingAction::CheckIn)
            .is_err());
    }

    #[test]
    fn test_checked_out_only_checks_in() {
        assert_eq!(
            BookingStatus::CheckedOut
                .apply(BookingAction::CheckIn)
                .unwrap(),
            BookingStatus::Complete
        );
        for action in [
            BookingAction::Confirm,
            BookingAction::Cancel,
            BookingAction::CheckOut,
            BookingAction::Complete,
        ] {
            assert!(BookingStatus::CheckedOut.apply(action).is_err());
        }
    }

    #[test]
    fn test_terminal_states_reject_all_actions() {
        for status in [BookingStatus::Complete, BookingStatus::Canceled] {
            assert!(status.is_terminal());
            assert!(status.allowed_actions().is_empty());
            for action in [
                BookingAction::Confirm,
                BookingAction::Cancel,
                BookingAction::CheckOut,
                BookingAction::CheckIn,
                BookingAction::Complete,
            ] {
                assert!(status.apply(action).is_err());
            }
        }
    }

    #[test]
    fn test_allowed_actions_match_apply() {
        let all_actions = [
            BookingAction::Confirm,
            BookingAction::Cancel,
            BookingAction::CheckOut,
            BookingAction::CheckIn,
            BookingAction::Complete,
        ];
        for status in [
            BookingStatus::Unconfirmed,
            BookingStatus::Confirmed,
            BookingStatus::CheckedOut,
            BookingStatus::Complete,
            BookingStatus::Canceled,
        ] {
            for action in all_actions {
                let listed = status.allowed_actions().contains(&action);
                assert_eq!(
                    listed,
                    status.apply(action).is_ok(),
                    "allowed_actions disagrees with apply for {:?}/{:?}",
                    status,
                    action
                );
            }
        }
    }

    #[test]
    fn test_no_reverse_transitions() {
        // Once confirmed or later, a booking never returns to an earlier
        // state except via cancellation.
        assert!(BookingStatus::Confirmed
            .allowed_actions()
            .iter()
            .all(|a| {
                let next = BookingStatus::Confirmed.apply(*a).unwrap();
                next != BookingStatus::Unconfirmed
            }));
        assert!(BookingStatus::CheckedOut
            .allowed_actions()
            .iter()
            .all(|a| {
                let next = BookingStatus::CheckedOut.apply(*a).unwrap();
                next != BookingStatus::Unconfirmed && next != BookingStatus::Confirmed
            }));
    }

    #[test]
    fn test_transition_error_message() {
        let err = BookingStatus::Canceled
            .apply(BookingAction::Confirm)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot confirm a booking in status 'canceled'"
        );
    }

    #[test]
    fn test_action_serde() {
        assert_eq!(
            serde_json::to_string(&BookingAction::CheckOut).unwrap(),
            "\"check_out\""
        );
        let action: BookingAction = serde_json::from_str("\"check_in\"").unwrap();
        assert_eq!(action, BookingAction::CheckIn);
    }
}
