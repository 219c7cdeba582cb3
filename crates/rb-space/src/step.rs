//! The step driver.
//!
//! Deliberately thin: collision detection and constraint solving belong to
//! the embedder, which injects their results through
//! [`notify_contact`][crate::Space::notify_contact] and
//! [`contacts_mut`][crate::Space::contacts_mut] between steps.  What the
//! driver does own is the fixed ordering the sleep engine depends on —
//! component processing before the locked window, roused-queue draining
//! right after it.

use crate::Space;

impl Space {
    /// Advance the simulation by `dt` seconds.
    ///
    /// 1. Process sleep components (skipped entirely when sleeping is
    ///    disabled, i.e. `sleep_time_threshold` is infinite).
    /// 2. Lock; integrate gravity into every active body and refresh its
    ///    colliders in the active index.
    /// 3. Unlock and replay any wake requests deferred during the locked
    ///    window.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is not positive or the space is already locked.
    pub fn step(&mut self, dt: f32) {
        assert!(dt > 0.0 && dt.is_finite(), "step dt must be positive and finite");
        assert!(!self.locked, "cannot step a locked space");

        if self.config.sleeping_enabled() {
            self.process_components(dt);
        }

        self.locked = true;

        let gravity = self.config.gravity;
        for i in 0..self.active_bodies.len() {
            let id = self.active_bodies[i];
            let body = &mut self.bodies[id.index()];
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;
        }

        // Re-home every active collider under its fresh transform.  The
        // static index is untouched: static scenery does not move and
        // sleeping bodies were re-homed when they went down.
        for i in 0..self.active_bodies.len() {
            let id = self.active_bodies[i];
            let (pos, rot) = {
                let b = &self.bodies[id.index()];
                (b.position, b.rotation())
            };
            let shape_ids = self.bodies[id.index()].shapes.clone();
            for sid in shape_ids {
                let bb = self.shapes[sid.index()].update(pos, rot);
                let hashid = self.shapes[sid.index()].hashid;
                self.active_shapes.reindex(hashid, bb);
            }
        }

        self.locked = false;
        self.drain_roused();
    }
}
