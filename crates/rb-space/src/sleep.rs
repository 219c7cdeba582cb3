//! The sleep/wake component engine.
//!
//! # How a step decides who sleeps
//!
//! Bodies connected by arbiters or constraints form *components*, rebuilt
//! from scratch every step with a disjoint-set forest embedded in each
//! body's [`ComponentNode`].  Each component is then threaded into a
//! circular ring hanging off its forest root, and judged as a whole: if
//! every member has been idle for `sleep_time_threshold` seconds the entire
//! component is deactivated and the root parked in `sleeping_roots`;
//! otherwise every member is re-published to the live-body list.
//!
//! Sleeping components keep their rings and parent chains intact, so waking
//! any member — explicitly, or because a new graph edge touches it — can
//! reactivate the whole component atomically by walking the ring.
//!
//! # Re-entrancy
//!
//! Wake requests arriving while the space is locked (solver callbacks) are
//! deferred to the `roused` queue and replayed by
//! [`drain_roused`][Space::drain_roused] at the one safe point after the
//! step unlocks.  The queue is the *only* structure the activation path
//! touches while locked.

use rb_core::{ArbiterId, BodyId, HashId, ShapeId};
use rb_dynamics::{ComponentNode, ContactStorage};

use crate::{Space, SpaceEvent};

impl Space {
    // ── Disjoint-set forest ───────────────────────────────────────────────

    /// The forest root of `body`'s component, with full path compression.
    ///
    /// Iterative two-pass: walk up to find the root, then rewrite every
    /// visited parent pointer so pathological chains cannot recurse deep.
    pub(crate) fn find_root(&mut self, body: BodyId) -> BodyId {
        let mut root = body;
        while let Some(parent) = self.bodies[root.index()].node.parent {
            root = parent;
        }
        let mut walk = body;
        while walk != root {
            let parent = self.bodies[walk.index()].node.parent.unwrap();
            self.bodies[walk.index()].node.parent = Some(root);
            walk = parent;
        }
        root
    }

    /// Union by rank.  Equal ranks attach `b_root` under `a_root` and bump
    /// `a_root`'s rank.
    fn merge_roots(&mut self, a_root: BodyId, b_root: BodyId) {
        let a_rank = self.bodies[a_root.index()].node.rank;
        let b_rank = self.bodies[b_root.index()].node.rank;
        if a_rank < b_rank {
            self.bodies[a_root.index()].node.parent = Some(b_root);
        } else if a_rank > b_rank {
            self.bodies[b_root.index()].node.parent = Some(a_root);
        } else if a_root != b_root {
            self.bodies[b_root.index()].node.parent = Some(a_root);
            self.bodies[a_root.index()].node.rank += 1;
        }
    }

    // ── Activation ────────────────────────────────────────────────────────

    /// Make `body` part of the active simulation.
    ///
    /// While the space is locked the request is queued to `roused` and
    /// replayed by [`drain_roused`](Self::drain_roused) — no other structure
    /// changes.  Unlocked, a request against a body that is still parked in
    /// a sleeping component wakes that whole component, and a request
    /// against a body that is already live is a no-op (waking one member of
    /// a component activates its siblings, so a later direct request for a
    /// sibling must not restore it twice).  Otherwise the body itself is
    /// restored: re-listed, shapes migrated to the active index, saved
    /// contacts copied back into the contact buffer, constraints
    /// re-registered.
    pub fn activate_body(&mut self, body: BodyId) {
        if self.locked {
            // Replayed by drain_roused once the space unlocks.
            self.roused.push(body);
            return;
        }
        if self.bodies[body.index()].is_sleeping() {
            // A raw wake request against a parked body: the component wakes
            // as a unit.  component_activate clears each member's node
            // before re-entering here, so this cannot loop.
            let root = self.find_root(body);
            self.component_activate(root);
            return;
        }
        if self.active_bodies.contains(&body) {
            // Already restored, directly or via a sibling's wake.
            return;
        }
        self.active_bodies.push(body);

        // Shapes: static index → active index, keeping the cached boxes.
        let shape_ids = self.bodies[body.index()].shapes.clone();
        for sid in shape_ids {
            let hashid = self.shapes[sid.index()].hashid;
            self.static_shapes.remove(hashid);
            self.active_shapes.insert(hashid, self.shapes[sid.index()].bb);
        }

        // Arbiters: restore the saved contacts into the live buffer.  The
        // primary-side test makes each pair restore exactly once even when
        // both endpoints wake in the same pass.
        let mut cursor = self.bodies[body.index()].arbiter_head;
        while let Some(aid) = cursor {
            cursor = self.arbiters[aid.index()].next_for(body);

            let primary = {
                let arb = &self.arbiters[aid.index()];
                arb.body_a == body || self.bodies[arb.body_a.index()].is_static()
            };
            if !primary {
                continue;
            }

            let storage =
                std::mem::replace(&mut self.arbiters[aid.index()].contacts, ContactStorage::EMPTY);
            let block = match storage {
                ContactStorage::Owned(block) => block,
                arena => {
                    // Already in live custody — nothing to restore.
                    self.arbiters[aid.index()].contacts = arena;
                    continue;
                }
            };
            let (start, len) = self.contact_buffer.push_slice(&block);
            self.arbiters[aid.index()].contacts = ContactStorage::Arena { start, len };
            let pair = self.arbiters[aid.index()].pair();
            self.contact_set.insert(pair, aid);
            // `block` drops here, releasing the private copy.
        }

        // Constraints: re-register with the solver, once per pair.
        let mut cursor = self.bodies[body.index()].constraint_head;
        while let Some(cid) = cursor {
            cursor = self.constraints[cid.index()].next_for(body);
            let primary = {
                let c = &self.constraints[cid.index()];
                c.a == body || self.bodies[c.a.index()].is_static()
            };
            if primary {
                self.live_constraints.push(cid);
            }
        }
    }

    /// Replay every deferred wake request.  Required after each unlock.
    ///
    /// A body can be queued more than once (a raw request plus a component
    /// walk); replaying is harmless because
    /// [`activate_body`](Self::activate_body) ignores bodies that are
    /// already live.
    pub fn drain_roused(&mut self) {
        assert!(!self.locked, "the roused queue can only be drained while the space is unlocked");
        let queued = std::mem::take(&mut self.roused);
        for body in queued {
            self.activate_body(body);
        }
    }

    // ── Deactivation ──────────────────────────────────────────────────────

    /// Remove `body` from active simulation structures.  The live-body list
    /// is *not* touched here — the component processor rebuilds it, and the
    /// explicit sleep call deletes the entry itself.
    pub(crate) fn deactivate_body(&mut self, body: BodyId) {
        // Shapes: active index → static index, keeping the cached boxes.
        let shape_ids = self.bodies[body.index()].shapes.clone();
        for sid in shape_ids {
            let hashid = self.shapes[sid.index()].hashid;
            self.active_shapes.remove(hashid);
            self.static_shapes.insert(hashid, self.shapes[sid.index()].bb);
        }

        // Arbiters: detach from the solver and save the contacts to a
        // private block so the warm-start impulses survive the sleep.
        let mut cursor = self.bodies[body.index()].arbiter_head;
        while let Some(aid) = cursor {
            cursor = self.arbiters[aid.index()].next_for(body);

            let primary = {
                let arb = &self.arbiters[aid.index()];
                arb.body_a == body || self.bodies[arb.body_a.index()].is_static()
            };
            if !primary {
                continue;
            }

            let pair = self.arbiters[aid.index()].pair();
            self.contact_set.remove(&pair);
            if let Some(pos) = self.live_arbiters.iter().position(|&l| l == aid) {
                self.live_arbiters.remove(pos);
            }

            let storage =
                std::mem::replace(&mut self.arbiters[aid.index()].contacts, ContactStorage::EMPTY);
            let block = match storage {
                ContactStorage::Arena { start, len } => {
                    self.contact_buffer.slice(start, len).to_vec().into_boxed_slice()
                }
                ContactStorage::Owned(block) => block,
            };
            self.arbiters[aid.index()].contacts = ContactStorage::Owned(block);
        }

        // Constraints: withdraw from the solver, once per pair.
        let mut cursor = self.bodies[body.index()].constraint_head;
        while let Some(cid) = cursor {
            cursor = self.constraints[cid.index()].next_for(body);
            let primary = {
                let c = &self.constraints[cid.index()];
                c.a == body || self.bodies[c.a.index()].is_static()
            };
            if primary {
                if let Some(pos) = self.live_constraints.iter().position(|&l| l == cid) {
                    self.live_constraints.remove(pos);
                }
            }
        }
    }

    // ── Component wake ────────────────────────────────────────────────────

    /// Wake the sleeping component parked under `root`, atomically.
    ///
    /// Walks the ring, clearing each member's node *before* activating it.
    /// Safe to call while the space is locked: the ring traversal completes
    /// and every member lands in the roused queue.
    pub(crate) fn component_activate(&mut self, root: BodyId) {
        if !self.bodies[root.index()].is_sleeping() {
            return;
        }
        assert!(
            self.bodies[root.index()].in_space,
            "cannot activate a body that was never added to a space"
        );

        let mut woken = 0usize;
        let mut body = root;
        loop {
            let next = self.bodies[body.index()].node.next.expect("sleeping component ring is broken");
            self.bodies[body.index()].node = ComponentNode::default();
            self.activate_body(body);
            woken += 1;
            body = next;
            if body == root {
                break;
            }
        }

        let pos = self
            .sleeping_roots
            .iter()
            .position(|&r| r == root)
            .expect("sleeping component root was not parked");
        self.sleeping_roots.remove(pos);
        self.events.push(SpaceEvent::ComponentWoken { root, bodies: woken });
    }

    /// Wake `body`'s whole component.  No-op on an active (or rogue) body.
    pub fn activate(&mut self, body: BodyId) {
        let root = self.find_root(body);
        self.component_activate(root);
    }

    /// Wake every body whose indexed shape overlaps `shape`'s cached AABB.
    ///
    /// Queries both indices — the interesting hits are sleeping neighbors,
    /// whose shapes live in the static index.  Each touched body is woken
    /// once; hits on `shape` itself and on static bodies are no-ops by way
    /// of [`activate`](Self::activate).
    pub fn activate_shapes_touching(&mut self, shape: ShapeId) {
        let probe = self.shapes[shape.index()].hashid;
        let bb = self.shapes[shape.index()].bb;

        let mut hits: Vec<HashId> = Vec::new();
        self.active_shapes.query(bb, |h| hits.push(h));
        self.static_shapes.query(bb, |h| hits.push(h));

        let mut touched: Vec<BodyId> = Vec::new();
        for hashid in hits {
            if hashid == probe {
                continue;
            }
            let sid = self.shape_by_hash[&hashid];
            let body = self.shapes[sid.index()].body;
            if self.bodies[body.index()].is_static() || touched.contains(&body) {
                continue;
            }
            touched.push(body);
        }
        for body in touched {
            self.activate(body);
        }
    }

    // ── Explicit sleep ────────────────────────────────────────────────────

    /// Put `body` to sleep as its own singleton component.
    ///
    /// # Panics
    ///
    /// See [`sleep_with_group`](Self::sleep_with_group).
    pub fn sleep(&mut self, body: BodyId) {
        self.sleep_with_group(body, None);
    }

    /// Put `body` to sleep, joining `group`'s sleeping component if one is
    /// given.  No-op if `body` is already sleeping.
    ///
    /// # Panics
    ///
    /// - `body` is static or rogue.
    /// - `body` was never added to a space.
    /// - the space is locked.
    /// - `group` is not itself sleeping.
    pub fn sleep_with_group(&mut self, body: BodyId, group: Option<BodyId>) {
        {
            let b = &self.bodies[body.index()];
            assert!(
                !b.is_static() && !b.is_rogue(),
                "rogue and static bodies cannot be put to sleep"
            );
            assert!(b.in_space, "cannot put a body to sleep that has not been added to a space");
        }
        assert!(
            !self.locked,
            "bodies cannot be put to sleep during a query or step; use a post-step callback"
        );
        if let Some(g) = group {
            assert!(
                self.bodies[g.index()].is_sleeping(),
                "cannot use a non-sleeping body as a group identifier"
            );
        }
        if self.bodies[body.index()].is_sleeping() {
            return;
        }

        // Refresh the cached AABBs so the shapes migrate with accurate boxes.
        let (pos, rot) = {
            let b = &self.bodies[body.index()];
            (b.position, b.rotation())
        };
        let shape_ids = self.bodies[body.index()].shapes.clone();
        for sid in shape_ids {
            self.shapes[sid.index()].update(pos, rot);
        }

        self.deactivate_body(body);

        match group {
            Some(g) => {
                // Splice in right after the group's root.
                let root = self.find_root(g);
                let former = self.bodies[root.index()].node.next;
                debug_assert!(former.is_some(), "group root is not threaded into a ring");
                self.bodies[body.index()].node = ComponentNode {
                    parent:    Some(root),
                    next:      former,
                    rank:      0,
                    idle_time: 0.0,
                };
                self.bodies[root.index()].node.next = Some(body);
            }
            None => {
                // A singleton component: the ring is a self-loop.
                self.bodies[body.index()].node = ComponentNode {
                    parent:    None,
                    next:      Some(body),
                    rank:      0,
                    idle_time: 0.0,
                };
                self.sleeping_roots.push(body);
                self.events.push(SpaceEvent::ComponentSlept { root: body, bodies: 1 });
            }
        }

        let listed = self
            .active_bodies
            .iter()
            .position(|&b| b == body)
            .expect("sleeping body was missing from the live-body list");
        self.active_bodies.remove(listed);
    }

    // ── Component processor ───────────────────────────────────────────────

    /// Rebuild components from this step's graph edges and migrate each one
    /// to where it belongs.  Runs unlocked, before the solver pass.
    pub fn process_components(&mut self, dt: f32) {
        assert!(!self.locked, "components cannot be processed while the space is locked");

        let mut rogue_scratch: Vec<BodyId> = Vec::new();
        let mut components:    Vec<BodyId> = Vec::with_capacity(self.sleeping_roots.len());

        let dv = self.config.idle_speed_threshold;
        let dvsq = if dv != 0.0 {
            dv * dv
        } else {
            self.config.gravity.length_sq() * dt * dt
        };

        // ── Phase 1: idle update & arbiter-list reset ─────────────────────
        for i in 0..self.active_bodies.len() {
            let id = self.active_bodies[i];
            let body = &mut self.bodies[id.index()];
            let thresh = if dvsq != 0.0 { body.mass * dvsq } else { 0.0 };
            body.node.idle_time = if body.kinetic_energy() > thresh {
                0.0
            } else {
                body.node.idle_time + dt
            };
            body.arbiter_head = None;
        }

        // ── Phase 2: forest build over arbiters ───────────────────────────
        //
        // Touching a sleeping component wakes it mid-build; its bodies are
        // appended to `active_bodies` and picked up by the later phases.
        let mut i = 0;
        while i < self.live_arbiters.len() {
            let aid = self.live_arbiters[i];
            let (a, b) = {
                let arb = &self.arbiters[aid.index()];
                (arb.body_a, arb.body_b)
            };
            self.merge_bodies(&mut rogue_scratch, a, b);
            self.push_body_arbiter(a, aid);
            self.push_body_arbiter(b, aid);
            i += 1;
        }

        // ── Phase 3: forest build over constraints ────────────────────────
        //
        // Length re-read on purpose: waking a component re-registers its
        // constraints, and those edges must still merge this step.
        let mut i = 0;
        while i < self.live_constraints.len() {
            let cid = self.live_constraints[i];
            let (a, b) = {
                let c = &self.constraints[cid.index()];
                (c.a, c.b)
            };
            self.merge_bodies(&mut rogue_scratch, a, b);
            i += 1;
        }

        // ── Phase 4: ring assembly ────────────────────────────────────────
        let mut i = 0;
        while i < self.active_bodies.len() {
            let id = self.active_bodies[i];
            self.add_to_component(id, &mut components);
            i += 1;
        }
        for i in 0..rogue_scratch.len() {
            let id = rogue_scratch[i];
            self.add_to_component(id, &mut components);
        }

        // ── Phase 5: verdict & migration ──────────────────────────────────
        let threshold = self.config.sleep_time_threshold;
        let mut new_bodies: Vec<BodyId> = Vec::with_capacity(self.active_bodies.len());

        for i in 0..components.len() {
            let root = components[i];
            if self.component_has_motion(root, threshold) {
                // Re-publish, preserving idle time; rogues stay unlisted.
                let mut body = root;
                loop {
                    let next = self.bodies[body.index()].node.next.unwrap();
                    if !self.bodies[body.index()].is_rogue() {
                        new_bodies.push(body);
                    }
                    let idle = self.bodies[body.index()].node.idle_time;
                    self.bodies[body.index()].node = ComponentNode::cleared(idle);
                    body = next;
                    if body == root {
                        break;
                    }
                }
            } else {
                // Deactivate the whole component; the ring stays threaded so
                // a future wake can walk it.
                let mut count = 0usize;
                let mut body = root;
                loop {
                    let next = self.bodies[body.index()].node.next.unwrap();
                    self.deactivate_body(body);
                    self.bodies[body.index()].node.idle_time = 0.0;
                    count += 1;
                    body = next;
                    if body == root {
                        break;
                    }
                }
                self.sleeping_roots.push(root);
                self.events.push(SpaceEvent::ComponentSlept { root, bodies: count });
            }
        }

        self.active_bodies = new_bodies;
    }

    /// `true` if any ring member still counts as moving.  Rogue members
    /// count as moving unconditionally — a component they touch never
    /// sleeps, whatever the threshold.
    fn component_has_motion(&self, root: BodyId, threshold: f32) -> bool {
        let mut body = root;
        loop {
            let b = &self.bodies[body.index()];
            if b.is_rogue() || b.node.idle_time < threshold {
                return true;
            }
            body = b.node.next.unwrap();
            if body == root {
                return false;
            }
        }
    }

    /// Merge the endpoints of one graph edge into the forest.
    ///
    /// Edges to static bodies are transparent.  An edge touching a sleeping
    /// component wakes it before the union.  Rogue endpoints are collected
    /// for ring assembly and pin their neighbor's idle time at zero.
    fn merge_bodies(&mut self, rogue_scratch: &mut Vec<BodyId>, a: BodyId, b: BodyId) {
        if self.bodies[a.index()].is_static() || self.bodies[b.index()].is_static() {
            return;
        }

        let a_root = self.find_root(a);
        let b_root = self.find_root(b);

        if self.bodies[a_root.index()].is_sleeping() || self.bodies[b_root.index()].is_sleeping() {
            self.component_activate(a_root);
            self.component_activate(b_root);
        }

        if self.bodies[a.index()].is_rogue() {
            rogue_scratch.push(a);
            self.bodies[b.index()].node.idle_time = 0.0;
        }
        if self.bodies[b.index()].is_rogue() {
            rogue_scratch.push(b);
            self.bodies[a.index()].node.idle_time = 0.0;
        }

        self.merge_roots(a_root, b_root);
    }

    /// Thread `body` into its component's ring, discovering the component on
    /// first contact.
    fn add_to_component(&mut self, body: BodyId, components: &mut Vec<BodyId>) {
        // Already threaded (or sleeping, which cannot happen here).
        if self.bodies[body.index()].node.next.is_some() {
            return;
        }
        let root = self.find_root(body);

        if self.bodies[root.index()].node.next.is_none() {
            components.push(root);
            if body == root {
                // Singleton: the ring is an explicit self-loop.
                self.bodies[root.index()].node.next = Some(root);
            } else {
                self.bodies[body.index()].node.next = Some(root);
                self.bodies[root.index()].node.next = Some(body);
            }
        } else if body != root {
            // Splice in right after the root.
            let after = self.bodies[root.index()].node.next;
            self.bodies[body.index()].node.next = after;
            self.bodies[root.index()].node.next = Some(body);
        }
    }

    /// Prepend `arb` to `body`'s per-step arbiter list through the link for
    /// `body`'s side.  Static and rogue bodies carry no list.
    fn push_body_arbiter(&mut self, body: BodyId, aid: ArbiterId) {
        let b = &self.bodies[body.index()];
        if b.is_static() || b.is_rogue() {
            return;
        }
        let head = b.arbiter_head;
        self.arbiters[aid.index()].set_next_for(body, head);
        self.bodies[body.index()].arbiter_head = Some(aid);
    }
}
