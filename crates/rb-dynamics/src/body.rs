//! Rigid bodies and the per-body sleep bookkeeping record.

use rb_core::{ArbiterId, BodyId, ConstraintId, ShapeId, Vec2};

// ── ComponentNode ─────────────────────────────────────────────────────────────

/// Per-body record for the sleep engine: a disjoint-set-forest node, a link
/// in the component ring, and the idle-time accumulator.
///
/// - `parent` — DSF parent; `None` means this body is a forest root.
/// - `next` — the next body in this component's circular chain; `None` means
///   the body is not threaded into any ring.
/// - `rank` — union-by-rank tag, meaningful on roots only.
/// - `idle_time` — seconds this body has stayed below the kinetic threshold.
///
/// The forest (`parent`/`rank`) is rebuilt from scratch every step; the ring
/// (`next`) persists only on sleeping components so a later wake can walk
/// the whole component.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ComponentNode {
    pub parent:    Option<BodyId>,
    pub next:      Option<BodyId>,
    pub rank:      u32,
    pub idle_time: f32,
}

impl ComponentNode {
    /// A fully cleared node keeping only `idle_time`.
    #[inline]
    pub fn cleared(idle_time: f32) -> Self {
        Self { parent: None, next: None, rank: 0, idle_time }
    }
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// Whether a body is simulated or an immovable part of the scenery.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Integrated, collides, participates in sleep components.
    Dynamic,
    /// Infinite mass; never moves, never joins a component.
    Static,
}

/// A rigid body.
///
/// Lives in the space's body arena and is addressed by [`BodyId`].  A
/// *dynamic* body that has been added to the space is either **active**
/// (present in the space's live-body list) or **sleeping** (parked in a
/// sleeping component).  A dynamic body that was never added is **rogue**:
/// it can still be referenced by constraints and arbiters, and doing so
/// keeps its neighbors permanently awake.
#[derive(Debug)]
pub struct Body {
    pub kind: BodyKind,

    /// Mass; `f32::INFINITY` for static bodies.
    pub mass: f32,
    /// Moment of inertia; `f32::INFINITY` for static bodies.
    pub moment: f32,

    pub position:         Vec2,
    /// Orientation in radians.
    pub angle:            f32,
    pub velocity:         Vec2,
    pub angular_velocity: f32,

    /// Shapes attached to this body, in attachment order.
    pub shapes: Vec<ShapeId>,

    /// Head of the intrusive per-body arbiter list.  Rebuilt every step by
    /// the component processor; retained across a sleep so activation can
    /// restore the saved contacts.
    pub arbiter_head: Option<ArbiterId>,

    /// Head of the intrusive per-body constraint list.
    pub constraint_head: Option<ConstraintId>,

    /// `true` once the body has been added to a space.  Dynamic bodies with
    /// `in_space == false` are rogue.
    pub in_space: bool,

    /// Sleep-engine bookkeeping.
    pub node: ComponentNode,
}

impl Body {
    /// Create a dynamic body.
    ///
    /// # Panics
    ///
    /// Panics if `mass` or `moment` is not finite and positive.
    pub fn new_dynamic(mass: f32, moment: f32) -> Self {
        assert!(mass.is_finite() && mass > 0.0, "dynamic body mass must be finite and positive");
        assert!(
            moment.is_finite() && moment > 0.0,
            "dynamic body moment must be finite and positive"
        );
        Self::new(BodyKind::Dynamic, mass, moment)
    }

    /// Create an immovable static body.
    pub fn new_static() -> Self {
        Self::new(BodyKind::Static, f32::INFINITY, f32::INFINITY)
    }

    fn new(kind: BodyKind, mass: f32, moment: f32) -> Self {
        Self {
            kind,
            mass,
            moment,
            position:         Vec2::ZERO,
            angle:            0.0,
            velocity:         Vec2::ZERO,
            angular_velocity: 0.0,
            shapes:           Vec::new(),
            arbiter_head:     None,
            constraint_head:  None,
            in_space:         false,
            node:             ComponentNode::default(),
        }
    }

    // ── Classification predicates ─────────────────────────────────────────

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// A dynamic body that was never added to a space.
    #[inline]
    pub fn is_rogue(&self) -> bool {
        !self.is_static() && !self.in_space
    }

    /// `true` while the body is parked in a sleeping component.
    ///
    /// The canonical test is ring membership: a dynamic body has `node.next`
    /// set exactly when it is threaded into a sleeping component's ring.
    /// (The component processor also threads rings transiently, but it
    /// consults this predicate only before assembly begins and clears every
    /// surviving ring before returning.)
    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.node.next.is_some()
    }

    // ── Kinematics ────────────────────────────────────────────────────────

    /// The unit rotation vector for the body's current angle.
    #[inline]
    pub fn rotation(&self) -> Vec2 {
        Vec2::for_angle(self.angle)
    }

    /// Kinetic energy in the unhalved `m·|v|² + i·ω²` form the idle test
    /// compares against.  The zero-speed operands are short-circuited so a
    /// motionless static body (infinite mass) yields `0`, not `0 × ∞ = NaN`.
    pub fn kinetic_energy(&self) -> f32 {
        let vsq = self.velocity.length_sq();
        let wsq = self.angular_velocity * self.angular_velocity;
        (if vsq != 0.0 { vsq * self.mass } else { 0.0 })
            + (if wsq != 0.0 { wsq * self.moment } else { 0.0 })
    }
}
