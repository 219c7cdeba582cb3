//! Unit tests for rb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ArbiterId, BodyId, HashId, ShapeId};

    #[test]
    fn index_roundtrip() {
        let id = BodyId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(BodyId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(BodyId(0) < BodyId(1));
        assert!(ShapeId(100) > ShapeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(BodyId::INVALID.0, u32::MAX);
        assert_eq!(ArbiterId::INVALID.0, u32::MAX);
        assert_eq!(HashId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(BodyId(7).to_string(), "BodyId(7)");
        assert_eq!(ShapeId(3).to_string(), "ShapeId(3)");
    }
}

#[cfg(test)]
mod math {
    use crate::{Aabb, Vec2};

    #[test]
    fn dot_and_length() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.dot(v), 25.0);
        assert_eq!(v.length_sq(), 25.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);
        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let rot = Vec2::for_angle(std::f32::consts::FRAC_PI_2);
        let v = Vec2::new(1.0, 0.0).rotate(rot);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn aabb_intersections() {
        let a = Aabb::new(0.0, 0.0, 2.0, 2.0);
        let b = Aabb::new(1.0, 1.0, 3.0, 3.0);
        let c = Aabb::new(5.0, 5.0, 6.0, 6.0);
        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
        // touching edges count as intersecting
        let d = Aabb::new(2.0, 0.0, 4.0, 2.0);
        assert!(a.intersects(d));
    }

    #[test]
    fn aabb_for_circle() {
        let bb = Aabb::for_circle(Vec2::new(1.0, 2.0), 0.5);
        assert_eq!(bb, Aabb::new(0.5, 1.5, 1.5, 2.5));
    }

    #[test]
    fn aabb_containment() {
        let outer = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let inner = Aabb::new(2.0, 2.0, 3.0, 3.0);
        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, SpaceConfig, Vec2};

    #[test]
    fn default_disables_sleeping() {
        let cfg = SpaceConfig::default();
        assert!(!cfg.sleeping_enabled());
        cfg.validate().unwrap();
    }

    #[test]
    fn finite_threshold_enables_sleeping() {
        let cfg = SpaceConfig {
            sleep_time_threshold: 0.5,
            ..Default::default()
        };
        assert!(cfg.sleeping_enabled());
        cfg.validate().unwrap();
    }

    #[test]
    fn negative_threshold_rejected() {
        let cfg = SpaceConfig {
            idle_speed_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NegativeThreshold { what: "idle_speed_threshold", .. })
        ));
    }

    #[test]
    fn nan_threshold_rejected() {
        let cfg = SpaceConfig {
            sleep_time_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotANumber { .. })));
    }

    #[test]
    fn non_finite_gravity_rejected() {
        let cfg = SpaceConfig {
            gravity: Vec2::new(0.0, f32::NEG_INFINITY),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonFiniteGravity { .. })));
    }
}
