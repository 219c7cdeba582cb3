//! Constraints — the joint edges of the body graph.
//!
//! The solver payload (anchors, stiffness, impulse state) is the solver's
//! business; for component building a constraint is the pair of bodies it
//! couples plus its two intrusive per-body links, mirroring the arbiter
//! layout.

use rb_core::{BodyId, ConstraintId};

/// An algebraic coupling between two bodies.
#[derive(Debug)]
pub struct Constraint {
    pub a: BodyId,
    pub b: BodyId,

    /// Next constraint in `a`'s per-body list.
    pub next_a: Option<ConstraintId>,
    /// Next constraint in `b`'s per-body list.
    pub next_b: Option<ConstraintId>,
}

impl Constraint {
    /// # Panics
    ///
    /// Panics if `a == b` — a self-joint couples nothing.
    pub fn new(a: BodyId, b: BodyId) -> Self {
        assert!(a != b, "constraint endpoints must be distinct bodies");
        Self { a, b, next_a: None, next_b: None }
    }

    /// The endpoint that is not `body`.
    #[inline]
    pub fn other_body(&self, body: BodyId) -> BodyId {
        debug_assert!(body == self.a || body == self.b);
        if self.a == body { self.b } else { self.a }
    }

    /// The intrusive link out of this constraint for `body`'s list.
    #[inline]
    pub fn next_for(&self, body: BodyId) -> Option<ConstraintId> {
        if self.a == body { self.next_a } else { self.next_b }
    }

    /// Set the intrusive link for `body`'s side.
    #[inline]
    pub fn set_next_for(&mut self, body: BodyId, next: Option<ConstraintId>) {
        if self.a == body {
            self.next_a = next;
        } else {
            self.next_b = next;
        }
    }
}
