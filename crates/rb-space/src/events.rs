//! Sleep/wake transition events.
//!
//! The engine records a `SpaceEvent` whenever a whole component changes
//! residency.  Events accumulate in the space and are handed to the embedder
//! via [`Space::drain_events`][crate::Space::drain_events]; nothing in the
//! engine consumes them.  This keeps observability out of the hot paths and
//! works identically for transitions triggered inside a step and for
//! explicit sleep/wake calls.

use rb_core::BodyId;

/// A component-level residency transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpaceEvent {
    /// A component was deactivated and parked under `root`.
    ///
    /// Recorded by the component processor's verdict and by an explicit
    /// sleep that starts a new singleton component.  Splicing a body into an
    /// existing sleeping group does not create a component and records
    /// nothing.
    ComponentSlept { root: BodyId, bodies: usize },

    /// The component parked under `root` was reactivated as a unit.
    ComponentWoken { root: BodyId, bodies: usize },
}
