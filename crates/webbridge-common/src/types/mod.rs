mod core;

pub use self::core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_copy_and_equality() {
        let r = Rect::new(10, 20, 800, 600);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(0, 0, 1920, 1080);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"x":0,"y":0,"width":1920,"height":1080}"#);
    }

    #[test]
    fn rect_negative_size_is_invalid() {
        assert!(Rect::new(-5, -5, 0, 0).has_valid_size());
        assert!(!Rect::new(0, 0, -1, 10).has_valid_size());
        assert!(!Rect::new(0, 0, 10, -1).has_valid_size());
    }

    #[test]
    fn instance_id_display() {
        assert_eq!(InstanceId(42).to_string(), "instance-42");
    }

    #[test]
    fn instance_ids_order_numerically() {
        let mut ids = vec![InstanceId(3), InstanceId(1), InstanceId(2)];
        ids.sort();
        assert_eq!(ids, vec![InstanceId(1), InstanceId(2), InstanceId(3)]);
    }

    #[test]
    fn lifecycle_forward_path() {
        use InstanceState::*;
        assert!(Uninitialized.can_transition_to(Created));
        assert!(Created.can_transition_to(Active));
        assert!(Active.can_transition_to(Navigating));
        assert!(Navigating.can_transition_to(Active));
        assert!(Active.can_transition_to(Destroyed));
    }

    #[test]
    fn lifecycle_rejects_skips_and_resurrection() {
        use InstanceState::*;
        assert!(!Uninitialized.can_transition_to(Active));
        assert!(!Created.can_transition_to(Navigating));
        assert!(!Destroyed.can_transition_to(Active));
        assert!(!Destroyed.can_transition_to(Destroyed));
        assert!(Destroyed.is_terminal());
        assert!(!Active.is_terminal());
    }

    #[test]
    fn instance_state_serializes_lowercase() {
        let json = serde_json::to_string(&InstanceState::Navigating).unwrap();
        assert_eq!(json, "\"navigating\"");
    }
}
