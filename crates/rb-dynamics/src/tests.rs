//! Unit tests for the simulation object model.

#[cfg(test)]
mod body {
    use rb_core::Vec2;

    use crate::{Body, ComponentNode};

    #[test]
    fn classification_predicates() {
        let mut dynamic = Body::new_dynamic(1.0, 1.0);
        assert!(!dynamic.is_static());
        assert!(dynamic.is_rogue(), "a body is rogue until added to a space");
        dynamic.in_space = true;
        assert!(!dynamic.is_rogue());

        let fixed = Body::new_static();
        assert!(fixed.is_static());
        assert!(!fixed.is_rogue());
    }

    #[test]
    fn sleeping_follows_ring_membership() {
        let mut body = Body::new_dynamic(1.0, 1.0);
        assert!(!body.is_sleeping());
        body.node.next = Some(rb_core::BodyId(0));
        assert!(body.is_sleeping());
        body.node = ComponentNode::cleared(0.25);
        assert!(!body.is_sleeping());
        assert_eq!(body.node.idle_time, 0.25);
    }

    #[test]
    fn kinetic_energy_linear_and_angular() {
        let mut body = Body::new_dynamic(2.0, 3.0);
        body.velocity = Vec2::new(3.0, 4.0); // |v|² = 25
        body.angular_velocity = 2.0; // ω² = 4
        assert_eq!(body.kinetic_energy(), 2.0 * 25.0 + 3.0 * 4.0);
    }

    #[test]
    fn static_body_at_rest_has_zero_energy() {
        // Infinite mass times zero speed must short-circuit to 0, not NaN.
        let fixed = Body::new_static();
        assert_eq!(fixed.kinetic_energy(), 0.0);
    }

    #[test]
    #[should_panic(expected = "mass must be finite and positive")]
    fn zero_mass_rejected() {
        Body::new_dynamic(0.0, 1.0);
    }
}

#[cfg(test)]
mod shape {
    use rb_core::{Aabb, BodyId, Vec2};

    use crate::{Shape, ShapeKind};

    #[test]
    fn circle_bb_follows_body_and_offset() {
        let mut shape = Shape::new(
            BodyId(0),
            ShapeKind::Circle { radius: 1.0 },
            Vec2::new(2.0, 0.0),
        );
        let bb = shape.update(Vec2::new(10.0, 5.0), Vec2::for_angle(0.0));
        assert_eq!(bb, Aabb::new(11.0, 4.0, 13.0, 6.0));
        assert_eq!(shape.bb, bb);
    }

    #[test]
    fn circle_offset_rotates_with_body() {
        let mut shape = Shape::new(
            BodyId(0),
            ShapeKind::Circle { radius: 0.5 },
            Vec2::new(1.0, 0.0),
        );
        // Quarter turn: the offset (1, 0) lands at (0, 1).
        let bb = shape.update(Vec2::ZERO, Vec2::for_angle(std::f32::consts::FRAC_PI_2));
        assert!((bb.l - -0.5).abs() < 1e-6);
        assert!((bb.t - 1.5).abs() < 1e-6);
    }

    #[test]
    fn rect_bb_is_conservative_under_rotation() {
        let mut shape = Shape::new(
            BodyId(0),
            ShapeKind::Rect { half_w: 2.0, half_h: 1.0 },
            Vec2::ZERO,
        );
        let upright = shape.update(Vec2::ZERO, Vec2::for_angle(0.0));
        assert_eq!(upright, Aabb::new(-2.0, -1.0, 2.0, 1.0));

        // 45° — the conservative box spans (|c| + |s|) * extents.
        let tilted = shape.update(Vec2::ZERO, Vec2::for_angle(std::f32::consts::FRAC_PI_4));
        let expect = (2.0_f32 + 1.0) * std::f32::consts::FRAC_1_SQRT_2;
        assert!((tilted.r - expect).abs() < 1e-5);
        assert!((tilted.t - expect).abs() < 1e-5);
    }

    #[test]
    #[should_panic(expected = "radius must be finite and positive")]
    fn degenerate_circle_rejected() {
        Shape::new(BodyId(0), ShapeKind::Circle { radius: 0.0 }, Vec2::ZERO);
    }
}

#[cfg(test)]
mod arbiter {
    use rb_core::{ArbiterId, BodyId, ShapeId, Vec2};

    use crate::{Arbiter, Contact, ContactStorage, ShapePair};

    fn pair_arbiter() -> Arbiter {
        Arbiter::new(ShapeId(0), ShapeId(1), BodyId(10), BodyId(20))
    }

    #[test]
    fn shape_pair_is_symmetric() {
        assert_eq!(
            ShapePair::new(ShapeId(3), ShapeId(8)),
            ShapePair::new(ShapeId(8), ShapeId(3)),
        );
    }

    #[test]
    fn next_link_selected_by_side() {
        let mut arb = pair_arbiter();
        arb.set_next_for(BodyId(10), Some(ArbiterId(1)));
        arb.set_next_for(BodyId(20), Some(ArbiterId(2)));
        assert_eq!(arb.next_for(BodyId(10)), Some(ArbiterId(1)));
        assert_eq!(arb.next_for(BodyId(20)), Some(ArbiterId(2)));
        assert_eq!(arb.next_a, Some(ArbiterId(1)));
        assert_eq!(arb.next_b, Some(ArbiterId(2)));
    }

    #[test]
    fn other_body() {
        let arb = pair_arbiter();
        assert_eq!(arb.other_body(BodyId(10)), BodyId(20));
        assert_eq!(arb.other_body(BodyId(20)), BodyId(10));
    }

    #[test]
    fn storage_lengths() {
        let arena = ContactStorage::Arena { start: 4, len: 2 };
        assert_eq!(arena.len(), 2);
        assert!(!arena.is_owned());

        let owned = ContactStorage::Owned(
            vec![Contact::new(Vec2::ZERO, Vec2::new(0.0, 1.0), -0.01)].into_boxed_slice(),
        );
        assert_eq!(owned.len(), 1);
        assert!(owned.is_owned());

        assert!(ContactStorage::EMPTY.is_empty());
    }
}

#[cfg(test)]
mod constraint {
    use rb_core::{BodyId, ConstraintId};

    use crate::Constraint;

    #[test]
    fn link_selection_mirrors_arbiters() {
        let mut joint = Constraint::new(BodyId(1), BodyId(2));
        joint.set_next_for(BodyId(1), Some(ConstraintId(7)));
        assert_eq!(joint.next_for(BodyId(1)), Some(ConstraintId(7)));
        assert_eq!(joint.next_for(BodyId(2)), None);
        assert_eq!(joint.other_body(BodyId(1)), BodyId(2));
    }

    #[test]
    #[should_panic(expected = "distinct bodies")]
    fn self_joint_rejected() {
        Constraint::new(BodyId(3), BodyId(3));
    }
}
