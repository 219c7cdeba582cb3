//! `rb-space` — the simulation container and sleep/wake engine.
//!
//! # The shape of a step
//!
//! ```text
//! embedder: notify_contact(..) per touching pair    (narrowphase results)
//! space.step(dt):
//!   ① process_components — idle update, forest build over arbiters and
//!     constraints, ring assembly, sleep/wake verdict per component
//!   ② locked window — integrate gravity, refresh active colliders
//!   ③ unlock + drain_roused — replay wake requests deferred during ②
//! embedder: solve contacts, write impulses via contacts_mut(..)
//! ```
//!
//! # Sleep/wake in one paragraph
//!
//! Bodies connected by contacts or joints form components.  A component
//! whose members have all been idle for `sleep_time_threshold` seconds is
//! deactivated as a unit: bodies leave the live list, colliders migrate to
//! the static index, contacts move into private heap blocks so the solver's
//! warm-start impulses survive.  Touching any member — a new contact, a
//! joint, or an explicit [`Space::activate`] — reactivates the entire
//! component atomically.  See [`sleep`] for the machinery.

pub mod buffer;
pub mod builder;
pub mod error;
pub mod events;
pub mod sleep;
pub mod space;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use buffer::ContactBuffer;
pub use builder::SpaceBuilder;
pub use error::{SpaceError, SpaceResult};
pub use events::SpaceEvent;
pub use space::Space;
