//! Arbiters — persistent contact pairs — and their contact storage.
//!
//! # Contact custody
//!
//! While an arbiter's bodies are simulated, its contacts live in the space's
//! per-step contact buffer and the arbiter holds an `Arena { start, len }`
//! slice handle.  When both bodies go to sleep the contacts are copied into
//! an `Owned` heap block that survives buffer resets, so the solver's
//! accumulated impulses are intact for warm-starting when the pair wakes.
//! The tagged [`ContactStorage`] makes every custody transition explicit at
//! the type level.

use rb_core::{ArbiterId, BodyId, ShapeId, Vec2};

// ── Contact ───────────────────────────────────────────────────────────────────

/// One contact point of an arbiter, including the accumulated impulses the
/// solver warm-starts from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Contact {
    /// World-space contact point.
    pub point: Vec2,
    /// Collision normal, from shape `a` toward shape `b`.
    pub normal: Vec2,
    /// Penetration distance (negative when overlapping).
    pub dist: f32,
    /// Accumulated normal impulse from the previous solve.
    pub jn_acc: f32,
    /// Accumulated tangent (friction) impulse from the previous solve.
    pub jt_acc: f32,
}

impl Contact {
    /// Fresh contact with zeroed impulse accumulators.
    pub fn new(point: Vec2, normal: Vec2, dist: f32) -> Self {
        Self { point, normal, dist, jn_acc: 0.0, jt_acc: 0.0 }
    }
}

// ── ContactStorage ────────────────────────────────────────────────────────────

/// Where an arbiter's contacts currently live.
#[derive(Debug)]
pub enum ContactStorage {
    /// A slice of the space-owned per-step contact buffer (active custody).
    Arena { start: usize, len: usize },
    /// A private heap block owned by the arbiter (sleeping custody).
    Owned(Box<[Contact]>),
}

impl ContactStorage {
    /// Empty arena storage — the state of a freshly created arbiter before
    /// its first contact pass.
    pub const EMPTY: ContactStorage = ContactStorage::Arena { start: 0, len: 0 };

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ContactStorage::Arena { len, .. } => *len,
            ContactStorage::Owned(block) => block.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, ContactStorage::Owned(_))
    }
}

// ── ShapePair ─────────────────────────────────────────────────────────────────

/// Unordered fingerprint of two shape identities — the contact-set key.
///
/// Construction normalizes the order, so `new(a, b) == new(b, a)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapePair(ShapeId, ShapeId);

impl ShapePair {
    #[inline]
    pub fn new(a: ShapeId, b: ShapeId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

// ── Arbiter ───────────────────────────────────────────────────────────────────

/// A persistent contact pair between two shapes.
///
/// Threaded into *both* endpoint bodies' arbiter lists via `next_a`/`next_b`;
/// [`next_for`](Self::next_for) picks the link matching the body a traversal
/// is walking.
#[derive(Debug)]
pub struct Arbiter {
    pub shape_a: ShapeId,
    pub shape_b: ShapeId,
    /// Owning body of `shape_a` (cached to avoid a shape-arena hop).
    pub body_a: BodyId,
    /// Owning body of `shape_b`.
    pub body_b: BodyId,

    /// Next arbiter in `body_a`'s per-body list.
    pub next_a: Option<ArbiterId>,
    /// Next arbiter in `body_b`'s per-body list.
    pub next_b: Option<ArbiterId>,

    pub contacts: ContactStorage,
}

impl Arbiter {
    pub fn new(shape_a: ShapeId, shape_b: ShapeId, body_a: BodyId, body_b: BodyId) -> Self {
        Self {
            shape_a,
            shape_b,
            body_a,
            body_b,
            next_a: None,
            next_b: None,
            contacts: ContactStorage::EMPTY,
        }
    }

    /// The contact-set key for this pair.
    #[inline]
    pub fn pair(&self) -> ShapePair {
        ShapePair::new(self.shape_a, self.shape_b)
    }

    /// The endpoint that is not `body`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `body` is one of the two endpoints.
    #[inline]
    pub fn other_body(&self, body: BodyId) -> BodyId {
        debug_assert!(body == self.body_a || body == self.body_b);
        if self.body_a == body { self.body_b } else { self.body_a }
    }

    /// The intrusive link out of this arbiter for `body`'s list.
    #[inline]
    pub fn next_for(&self, body: BodyId) -> Option<ArbiterId> {
        if self.body_a == body { self.next_a } else { self.next_b }
    }

    /// Set the intrusive link for `body`'s side.
    #[inline]
    pub fn set_next_for(&mut self, body: BodyId, next: Option<ArbiterId>) {
        if self.body_a == body {
            self.next_a = next;
        } else {
            self.next_b = next;
        }
    }
}
