//! The `Space` — owner of every simulation structure.
//!
//! # Index structures at a glance
//!
//! | Field             | Holds                                             |
//! |-------------------|---------------------------------------------------|
//! | `active_bodies`   | Dynamic bodies currently simulated                |
//! | `sleeping_roots`  | One root per sleeping component                   |
//! | `roused`          | Wake requests deferred while `locked`             |
//! | `active_shapes`   | Shapes of active bodies (refreshed every step)    |
//! | `static_shapes`   | Shapes of static **and sleeping** bodies          |
//! | `live_arbiters`   | Contact pairs the solver consumes this step       |
//! | `live_constraints`| Joints the solver consumes this step              |
//! | `contact_set`     | Unordered shape pair → its persistent arbiter     |
//!
//! A dynamic body is in exactly one of four states — active, sleeping,
//! rogue (created but never added), static — and the sleep engine in
//! [`sleep`][crate::sleep] is the only code that moves bodies between the
//! first two.

use rustc_hash::FxHashMap;

use rb_core::{ArbiterId, BodyId, ConstraintId, HashId, ShapeId, SpaceConfig, Vec2};
use rb_dynamics::{Arbiter, Body, Constraint, Contact, ContactStorage, Shape, ShapeKind, ShapePair};
use rb_spatial::ShapeIndex;

use crate::{ContactBuffer, SpaceEvent};

/// The simulation container.  Construct via
/// [`SpaceBuilder`][crate::SpaceBuilder].
pub struct Space {
    pub config: SpaceConfig,

    // ── Object arenas (indexed by the typed ids) ──────────────────────────
    pub(crate) bodies:      Vec<Body>,
    pub(crate) shapes:      Vec<Shape>,
    pub(crate) arbiters:    Vec<Arbiter>,
    pub(crate) constraints: Vec<Constraint>,

    // ── Live structures ───────────────────────────────────────────────────
    pub(crate) active_bodies:    Vec<BodyId>,
    pub(crate) roused:           Vec<BodyId>,
    pub(crate) sleeping_roots:   Vec<BodyId>,
    pub(crate) live_arbiters:    Vec<ArbiterId>,
    pub(crate) live_constraints: Vec<ConstraintId>,
    pub(crate) contact_set:      FxHashMap<ShapePair, ArbiterId>,
    pub(crate) contact_buffer:   ContactBuffer,
    pub(crate) active_shapes:    ShapeIndex,
    pub(crate) static_shapes:    ShapeIndex,
    pub(crate) shape_by_hash:    FxHashMap<HashId, ShapeId>,

    pub(crate) locked:      bool,
    pub(crate) next_hashid: u64,
    pub(crate) events:      Vec<SpaceEvent>,
}

impl Space {
    pub(crate) fn with_config(config: SpaceConfig) -> Self {
        Self {
            config,
            bodies:           Vec::new(),
            shapes:           Vec::new(),
            arbiters:         Vec::new(),
            constraints:      Vec::new(),
            active_bodies:    Vec::new(),
            roused:           Vec::new(),
            sleeping_roots:   Vec::new(),
            live_arbiters:    Vec::new(),
            live_constraints: Vec::new(),
            contact_set:      FxHashMap::default(),
            contact_buffer:   ContactBuffer::new(),
            active_shapes:    ShapeIndex::new(),
            static_shapes:    ShapeIndex::new(),
            shape_by_hash:    FxHashMap::default(),
            locked:           false,
            next_hashid:      0,
            events:           Vec::new(),
        }
    }

    // ── Body assembly ─────────────────────────────────────────────────────

    /// Register a dynamic body in the arena **without** adding it to the
    /// simulation.  The body is rogue until [`add_body`](Self::add_body) —
    /// constraints and contacts may reference it, and doing so keeps its
    /// neighbors awake.
    pub fn new_rogue_body(&mut self, mass: f32, moment: f32) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::new_dynamic(mass, moment));
        id
    }

    /// Register an immovable static body.
    pub fn add_static_body(&mut self) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::new_static());
        id
    }

    /// Add a previously created rogue body to the simulation.
    ///
    /// # Panics
    ///
    /// Panics if the space is locked, the body is static, or it was already
    /// added.
    pub fn add_body(&mut self, body: BodyId) {
        assert!(!self.locked, "bodies cannot be added while the space is locked");
        let b = &mut self.bodies[body.index()];
        assert!(!b.is_static(), "static bodies are not simulated; do not add them to the live list");
        assert!(!b.in_space, "body was already added to the space");
        b.in_space = true;
        self.active_bodies.push(body);
    }

    /// Create a dynamic body and add it in one call.
    pub fn add_dynamic_body(&mut self, mass: f32, moment: f32) -> BodyId {
        let id = self.new_rogue_body(mass, moment);
        self.add_body(id);
        id
    }

    /// Attach a collider to `body` and index it.
    ///
    /// The shape receives a fresh stable `hashid` and an AABB computed from
    /// the body's current transform.  Shapes of static bodies go to the
    /// static index; shapes of dynamic bodies (added or rogue) go to the
    /// active index.
    ///
    /// # Panics
    ///
    /// Panics if the space is locked or the body is sleeping.
    pub fn attach_shape(&mut self, body: BodyId, kind: ShapeKind, offset: Vec2) -> ShapeId {
        assert!(!self.locked, "shapes cannot be attached while the space is locked");
        assert!(
            !self.bodies[body.index()].is_sleeping(),
            "shapes cannot be attached to a sleeping body; activate it first"
        );

        let id = ShapeId(self.shapes.len() as u32);
        let mut shape = Shape::new(body, kind, offset);
        shape.hashid = HashId(self.next_hashid);
        self.next_hashid += 1;

        let (pos, rot, is_static) = {
            let b = &self.bodies[body.index()];
            (b.position, b.rotation(), b.is_static())
        };
        let bb = shape.update(pos, rot);

        if is_static {
            self.static_shapes.insert(shape.hashid, bb);
        } else {
            self.active_shapes.insert(shape.hashid, bb);
        }
        self.shape_by_hash.insert(shape.hashid, id);
        self.bodies[body.index()].shapes.push(id);
        self.shapes.push(shape);
        id
    }

    /// Add a joint between `a` and `b`, threading it onto both bodies'
    /// intrusive constraint lists and the live list.
    ///
    /// # Panics
    ///
    /// Panics if the space is locked or `a == b`.
    pub fn add_constraint(&mut self, a: BodyId, b: BodyId) -> ConstraintId {
        assert!(!self.locked, "constraints cannot be added while the space is locked");
        let id = ConstraintId(self.constraints.len() as u32);
        let mut constraint = Constraint::new(a, b);

        constraint.next_a = self.bodies[a.index()].constraint_head.replace(id);
        constraint.next_b = self.bodies[b.index()].constraint_head.replace(id);

        self.constraints.push(constraint);
        self.live_constraints.push(id);
        id
    }

    // ── Contact injection (the narrowphase hand-off) ──────────────────────

    /// Record this step's contact geometry for a shape pair, creating the
    /// pair's persistent arbiter on first touch.
    ///
    /// On a refresh the accumulated impulses of the previous contacts are
    /// carried over by contact index, so the solver keeps its warm-start
    /// data across frames.  A refresh that does not change the contact count
    /// overwrites the existing buffer slice in place.
    ///
    /// # Panics
    ///
    /// Panics if the space is locked, the shapes share a body, or the pair's
    /// arbiter is in sleeping custody (wake the bodies first).
    pub fn notify_contact(
        &mut self,
        shape_a:  ShapeId,
        shape_b:  ShapeId,
        contacts: &[Contact],
    ) -> ArbiterId {
        assert!(!self.locked, "contacts must be injected while the space is unlocked");
        let body_a = self.shapes[shape_a.index()].body;
        let body_b = self.shapes[shape_b.index()].body;
        assert!(body_a != body_b, "a shape pair must span two distinct bodies");

        let pair = ShapePair::new(shape_a, shape_b);
        match self.contact_set.get(&pair).copied() {
            Some(id) => {
                self.refresh_arbiter(id, contacts);
                id
            }
            None => {
                let id = ArbiterId(self.arbiters.len() as u32);
                let mut arb = Arbiter::new(shape_a, shape_b, body_a, body_b);
                let (start, len) = self.contact_buffer.push_slice(contacts);
                arb.contacts = ContactStorage::Arena { start, len };
                self.arbiters.push(arb);
                self.contact_set.insert(pair, id);
                self.live_arbiters.push(id);
                id
            }
        }
    }

    fn refresh_arbiter(&mut self, id: ArbiterId, contacts: &[Contact]) {
        let (old_start, old_len) = match self.arbiters[id.index()].contacts {
            ContactStorage::Arena { start, len } => (start, len),
            ContactStorage::Owned(_) => {
                panic!("cannot refresh contacts of a sleeping pair; activate the bodies first")
            }
        };

        // Carry the previous accumulated impulses over by position.
        let mut fresh: Vec<Contact> = contacts.to_vec();
        {
            let old = self.contact_buffer.slice(old_start, old_len);
            for (new, prev) in fresh.iter_mut().zip(old) {
                new.jn_acc = prev.jn_acc;
                new.jt_acc = prev.jt_acc;
            }
        }

        if fresh.len() == old_len {
            self.contact_buffer.write_in_place(old_start, &fresh);
        } else {
            let (start, len) = self.contact_buffer.push_slice(&fresh);
            self.arbiters[id.index()].contacts = ContactStorage::Arena { start, len };
        }

        // An arbiter restored from sleep sits in the contact set but not in
        // the live list until its pair is touched again — this is that touch.
        if !self.live_arbiters.contains(&id) {
            self.live_arbiters.push(id);
        }
    }

    // ── Lock control ──────────────────────────────────────────────────────

    /// Mark a step or query as in progress.  While locked, wake requests
    /// defer to the roused queue instead of restructuring the space.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Clear the lock.  The caller is expected to follow up with
    /// [`drain_roused`][Self::drain_roused].
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Take all residency-transition events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SpaceEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    /// Mutable body access for the embedder (integrator, solver, tests).
    /// After moving a body, refresh its colliders via
    /// [`reindex_body_shapes`](Self::reindex_body_shapes).
    #[inline]
    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.index()]
    }

    #[inline]
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }

    #[inline]
    pub fn arbiter(&self, id: ArbiterId) -> &Arbiter {
        &self.arbiters[id.index()]
    }

    #[inline]
    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.index()]
    }

    /// The contacts of an arbiter, wherever they currently live.
    pub fn contacts(&self, id: ArbiterId) -> &[Contact] {
        match &self.arbiters[id.index()].contacts {
            ContactStorage::Arena { start, len } => self.contact_buffer.slice(*start, *len),
            ContactStorage::Owned(block) => block,
        }
    }

    /// Mutable contact access — the solver writes accumulated impulses here.
    pub fn contacts_mut(&mut self, id: ArbiterId) -> &mut [Contact] {
        match &mut self.arbiters[id.index()].contacts {
            ContactStorage::Arena { start, len } => self.contact_buffer.slice_mut(*start, *len),
            ContactStorage::Owned(block) => block,
        }
    }

    /// The persistent arbiter for a shape pair, if one exists.
    pub fn arbiter_for(&self, a: ShapeId, b: ShapeId) -> Option<ArbiterId> {
        self.contact_set.get(&ShapePair::new(a, b)).copied()
    }

    pub fn active_bodies(&self) -> &[BodyId] {
        &self.active_bodies
    }

    pub fn sleeping_roots(&self) -> &[BodyId] {
        &self.sleeping_roots
    }

    pub fn roused(&self) -> &[BodyId] {
        &self.roused
    }

    pub fn live_arbiters(&self) -> &[ArbiterId] {
        &self.live_arbiters
    }

    pub fn live_constraints(&self) -> &[ConstraintId] {
        &self.live_constraints
    }

    pub fn active_shapes(&self) -> &ShapeIndex {
        &self.active_shapes
    }

    pub fn static_shapes(&self) -> &ShapeIndex {
        &self.static_shapes
    }

    /// Watermark of the contact arena (for custody diagnostics).
    pub fn contact_watermark(&self) -> usize {
        self.contact_buffer.watermark()
    }

    // ── Shape maintenance ─────────────────────────────────────────────────

    /// Refresh the cached AABBs of `body`'s shapes and re-home them in the
    /// index they live in.  Call after teleporting a body by hand.
    pub fn reindex_body_shapes(&mut self, body: BodyId) {
        let (pos, rot) = {
            let b = &self.bodies[body.index()];
            (b.position, b.rotation())
        };
        let shape_ids = self.bodies[body.index()].shapes.clone();
        for sid in shape_ids {
            let bb = self.shapes[sid.index()].update(pos, rot);
            let hashid = self.shapes[sid.index()].hashid;
            if self.active_shapes.contains(hashid) {
                self.active_shapes.reindex(hashid, bb);
            } else {
                self.static_shapes.reindex(hashid, bb);
            }
        }
    }
}
