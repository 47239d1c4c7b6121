#[cfg(test)]
mod tests {
    use crate::api::{AircraftId, BookingId, MemberId, StaffId};
    use uuid::Uuid;

    #[test]
    fn test_id_new_and_value() {
        let raw = Uuid::new_v4();
        let id = BookingId::new(raw);
        assert_eq!(id.value(), raw);
        assert_eq!(Uuid::from(id), raw);
    }

    #[test]
    fn test_id_display_matches_uuid() {
        let raw = Uuid::new_v4();
        assert_eq!(StaffId::new(raw).to_string(), raw.to_string());
    }

    #[test]
    fn test_id_generate_is_unique() {
        assert_ne!(MemberId::generate(), MemberId::generate());
    }

    #[test]
    fn test_id_serde_is_bare_uuid() {
        let raw = Uuid::new_v4();
        let id = AircraftId::new(raw);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", raw));
        let back: AircraftId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_distinct_id_types_hash_and_ord() {
        use std::collections::HashSet;
        let a = BookingId::generate();
        let b = BookingId::generate();
        let set: HashSet<BookingId> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.min(b).min(a), a.min(b));
    }
}
