//! Unit tests for strides-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, OsmId, StreetId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(StreetId(100) > StreetId(99));
    }

    #[test]
    fn checked_conversion_rejects_overflow() {
        assert_eq!(StreetId::try_from(u32::MAX as usize).unwrap(), StreetId(u32::MAX));
        assert!(NodeId::try_from(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(OsmId(9_038_489_299).to_string(), "9038489299");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(13.7563, 100.5018);
        assert_eq!(p.haversine_km(p), 0.0);
        assert_eq!(p.planar_km(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(13.0, 100.0);
        let b = GeoPoint::new(14.0, 100.0);
        let precise = a.haversine_km(b);
        assert!((precise - 111.195).abs() < 0.05, "got {precise}");
        assert!((a.planar_km(b) - 111.0).abs() < 1e-9);
    }

    #[test]
    fn planar_overestimates_east_west_at_latitude() {
        // At 60° a degree of longitude is ~55.6 km; the planar model ignores
        // the cos(lat) shrink.
        let a = GeoPoint::new(60.0, 10.0);
        let b = GeoPoint::new(60.0, 11.0);
        assert!(a.planar_km(b) > 1.9 * a.haversine_km(b));
    }
}

#[cfg(test)]
mod distance {
    use proptest::prelude::*;

    use crate::{DistanceFn, DistanceMetric, GeoPoint, GeodesicDistance, PlanarDistance};

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-80.0f64..80.0, -179.0f64..179.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    #[test]
    fn metric_dispatches_to_provider() {
        let a = GeoPoint::new(30.26, -97.74);
        let b = GeoPoint::new(30.28, -97.73);
        assert_eq!(DistanceMetric::Planar.distance_km(a, b), PlanarDistance.distance_km(a, b));
        assert_eq!(
            DistanceMetric::Geodesic.distance_km(a, b),
            GeodesicDistance.distance_km(a, b)
        );
    }

    #[test]
    fn providers_agree_at_city_scale_near_equator() {
        let a = GeoPoint::new(13.75, 100.50);
        let b = GeoPoint::new(13.76, 100.51);
        let planar = PlanarDistance.distance_km(a, b);
        let precise = GeodesicDistance.distance_km(a, b);
        assert!((planar - precise).abs() / precise < 0.03, "{planar} vs {precise}");
    }

    #[test]
    fn metric_parses_aliases() {
        assert_eq!("planar".parse::<DistanceMetric>().unwrap(), DistanceMetric::Planar);
        assert_eq!("Precise".parse::<DistanceMetric>().unwrap(), DistanceMetric::Geodesic);
        assert!("manhattan".parse::<DistanceMetric>().is_err());
        assert_eq!(DistanceMetric::Geodesic.to_string(), "geodesic");
    }

    proptest! {
        #[test]
        fn symmetric_and_non_negative(p in point(), q in point()) {
            for metric in [DistanceMetric::Planar, DistanceMetric::Geodesic] {
                let pq = metric.distance_km(p, q);
                let qp = metric.distance_km(q, p);
                prop_assert!(pq >= 0.0);
                prop_assert!((pq - qp).abs() <= 1e-9 * pq.max(1.0));
            }
        }

        #[test]
        fn identity_is_zero(p in point()) {
            prop_assert_eq!(PlanarDistance.distance_km(p, p), 0.0);
            prop_assert_eq!(GeodesicDistance.distance_km(p, p), 0.0);
        }
    }
}

#[cfg(test)]
mod config {
    use crate::config::{DEFAULT_BRANCH_BUDGET, DEFAULT_TAIL_TRIM};
    use crate::{DistanceMetric, OsmId, RouteConfig, StartPoint, UnnamedPolicy};

    fn cfg() -> RouteConfig {
        RouteConfig::new(StartPoint::Node(OsmId(1)), 20.0)
    }

    #[test]
    fn defaults() {
        let c = cfg();
        assert_eq!(c.branch_budget, DEFAULT_BRANCH_BUDGET);
        assert_eq!(c.tail_trim, DEFAULT_TAIL_TRIM);
        assert_eq!(c.metric, DistanceMetric::Planar);
        assert_eq!(c.unnamed, UnnamedPolicy::Walkable);
        assert!(!c.hot_spot_bias);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn budget_moves_headroom() {
        let c = cfg().with_branch_budget(2);
        assert_eq!(c.branch_budget, 2);
        assert!(c.max_branch_budget >= 2);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_target() {
        let mut c = cfg();
        c.target_km = 0.0;
        assert!(c.validate().is_err());
        c.target_km = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_budget_and_inverted_cap() {
        let mut c = cfg();
        c.branch_budget = 0;
        assert!(c.validate().is_err());

        let mut c = cfg();
        c.max_branch_budget = c.branch_budget - 1;
        assert!(c.validate().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_config {
    use crate::{DistanceMetric, GeoPoint, RouteConfig, StartPoint};

    #[test]
    fn minimal_file_fills_defaults() {
        let json = r#"{ "start": { "node": 702209198 }, "target_km": 8.0, "metric": "geodesic" }"#;
        let c: RouteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.start, StartPoint::Node(crate::OsmId(702_209_198)));
        assert_eq!(c.metric, DistanceMetric::Geodesic);
        assert_eq!(c.branch_budget, 8);
        assert_eq!(c.tail_trim, 3);
    }

    #[test]
    fn coordinate_start() {
        let json = r#"{ "start": { "coordinate": { "lat": 13.75, "lon": 100.5 } }, "target_km": 5 }"#;
        let c: RouteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.start, StartPoint::Coordinate(GeoPoint::new(13.75, 100.5)));
    }
}
