//! stack — smallest demo of the sleep/wake engine.
//!
//! A three-ball stack rests on a static floor.  After half a second of
//! simulated stillness the whole stack is put to sleep as one component;
//! a probe shape dropped on top then wakes it atomically.  Collision
//! detection and solving are stubbed with hand-fed resting contacts, the
//! same way an embedding engine hands its narrowphase results to the space.

use anyhow::Result;

use rb_core::{BodyId, ShapeId, Vec2};
use rb_dynamics::{Contact, ShapeKind};
use rb_space::{Space, SpaceBuilder, SpaceEvent};

// ── Constants ─────────────────────────────────────────────────────────────────

const DT:           f32   = 1.0 / 60.0;
const FRAMES:       usize = 60; // one simulated second
const BALL_RADIUS:  f32   = 0.5;
const STACK_HEIGHT: usize = 3;

fn main() -> Result<()> {
    let mut space = SpaceBuilder::new()
        .gravity(Vec2::new(0.0, -10.0))
        .sleep_time_threshold(0.5)
        .build()?;

    // ── Scene: static floor + ball stack ──────────────────────────────────
    let floor = space.add_static_body();
    let floor_shape =
        space.attach_shape(floor, ShapeKind::Rect { half_w: 10.0, half_h: 0.5 }, Vec2::ZERO);

    let mut balls: Vec<(BodyId, ShapeId)> = Vec::new();
    for i in 0..STACK_HEIGHT {
        let body = space.add_dynamic_body(1.0, 1.0);
        space.body_mut(body).position = Vec2::new(0.0, 1.0 + i as f32);
        let shape = space.attach_shape(body, ShapeKind::Circle { radius: BALL_RADIUS }, Vec2::ZERO);
        balls.push((body, shape));
    }

    // Resting pairs: ball 0 on the floor, each ball on the one below.
    let mut pairs: Vec<(ShapeId, ShapeId)> = vec![(balls[0].1, floor_shape)];
    for window in balls.windows(2) {
        pairs.push((window[1].1, window[0].1));
    }

    // ── Settle until the component sleeps ─────────────────────────────────
    println!("settling a {STACK_HEIGHT}-ball stack (sleep after 0.5 s of rest)...");
    for frame in 0..FRAMES {
        inject_resting_contacts(&mut space, &pairs);
        hold_stack_at_rest(&mut space);
        space.step(DT);
        report_events(&mut space, frame);
    }
    println!(
        "after {FRAMES} frames: {} live bodies, {} sleeping components",
        space.active_bodies().len(),
        space.sleeping_roots().len(),
    );

    // ── Poke the sleeping stack with a probe shape ────────────────────────
    let probe = space.add_dynamic_body(1.0, 1.0);
    space.body_mut(probe).position = Vec2::new(0.0, STACK_HEIGHT as f32);
    let probe_shape = space.attach_shape(probe, ShapeKind::Circle { radius: BALL_RADIUS }, Vec2::ZERO);

    println!("dropping a probe onto the stack...");
    space.activate_shapes_touching(probe_shape);
    report_events(&mut space, FRAMES);

    println!(
        "after the poke: {} live bodies, {} sleeping components",
        space.active_bodies().len(),
        space.sleeping_roots().len(),
    );
    Ok(())
}

/// Re-feed the narrowphase results for every pair that is still simulated.
fn inject_resting_contacts(space: &mut Space, pairs: &[(ShapeId, ShapeId)]) {
    for &(a, b) in pairs {
        let asleep = space.body(space.shape(a).body).is_sleeping()
            || space.body(space.shape(b).body).is_sleeping();
        if !asleep {
            let contact = Contact::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 0.0);
            space.notify_contact(a, b, &[contact]);
        }
    }
}

/// Stand-in for the contact solver: resting contacts cancel gravity exactly.
fn hold_stack_at_rest(space: &mut Space) {
    for id in space.active_bodies().to_vec() {
        space.body_mut(id).velocity = Vec2::ZERO;
    }
}

fn report_events(space: &mut Space, frame: usize) {
    for event in space.drain_events() {
        match event {
            SpaceEvent::ComponentSlept { root, bodies } => {
                println!("  frame {frame}: component under {root} slept ({bodies} bodies)");
            }
            SpaceEvent::ComponentWoken { root, bodies } => {
                println!("  frame {frame}: component under {root} woke ({bodies} bodies)");
            }
        }
    }
}
