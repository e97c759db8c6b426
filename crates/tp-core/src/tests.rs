//! Unit tests for tp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, RoadId};

    #[test]
    fn index_is_inner_value() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(RoadId(0).index(), 0);
    }

    #[test]
    fn invalid_sorts_after_every_real_index() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert!(RoadId(1_000_000) < RoadId::INVALID);
    }

    #[test]
    fn display_names_the_table() {
        assert_eq!(NodeId(7).to_string(), "node #7");
        assert_eq!(RoadId(3).to_string(), "road #3");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(31.25, 29.96);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((b.distance(a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_detected() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::TimeOfDay;

    #[test]
    fn column_indices_follow_all_order() {
        for (i, t) in TimeOfDay::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("morning".parse::<TimeOfDay>().unwrap(), TimeOfDay::Morning);
        assert_eq!(" Night ".parse::<TimeOfDay>().unwrap(), TimeOfDay::Night);
        assert_eq!("EVENING".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
    }

    #[test]
    fn parse_rejects_unknown_period() {
        assert!("midnight".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(TimeOfDay::Afternoon.to_string(), "Afternoon");
    }
}

#[cfg(test)]
mod error {
    use crate::CoreError;

    #[test]
    fn every_variant_carries_its_message() {
        for err in [CoreError::Config("bad slots".into()), CoreError::Parse("bad period".into())] {
            let detail = match &err {
                CoreError::Config(msg) | CoreError::Parse(msg) => msg.clone(),
            };
            assert!(err.to_string().ends_with(&detail));
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, PlannerConfig, RoadNameLookup, SnapshotKey};

    #[test]
    fn defaults_are_reference_constants() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.congestion.min_factor, 0.5);
        assert_eq!(cfg.congestion.max_factor, 2.0);
        assert_eq!(cfg.congestion.lookup, RoadNameLookup::AsTraversed);
        assert_eq!(cfg.cache.key, SnapshotKey::Contents);
        assert_eq!(cfg.transit.time_slots, 6);
        assert_eq!(cfg.transit.transfer_penalty, 5.0);
        assert_eq!(cfg.maintenance.cost_factor, 10.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn inverted_congestion_bounds_rejected() {
        let mut cfg = PlannerConfig::default();
        cfg.congestion.min_factor = 3.0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_slots_rejected() {
        let mut cfg = PlannerConfig::default();
        cfg.transit.time_slots = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_cost_factor_rejected() {
        let mut cfg = PlannerConfig::default();
        cfg.maintenance.cost_factor = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let cfg: PlannerConfig =
            serde_json::from_str(r#"{ "transit": { "time_slots": 12 } }"#).unwrap();
        assert_eq!(cfg.transit.time_slots, 12);
        assert_eq!(cfg.transit.transfer_penalty, 5.0);
        assert_eq!(cfg.congestion.max_factor, 2.0);
    }
}
