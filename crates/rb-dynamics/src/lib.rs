//! `rb-dynamics` — the simulation object model for the rust_rb workspace.
//!
//! # What lives here
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`body`]       | `Body`, `BodyKind`, `ComponentNode`                  |
//! | [`shape`]      | `Shape`, `ShapeKind` (colliders + cached AABBs)      |
//! | [`arbiter`]    | `Arbiter`, `Contact`, `ContactStorage`, `ShapePair`  |
//! | [`constraint`] | `Constraint` (the joint graph edge)                  |
//!
//! These are plain data records addressed by the typed ids of `rb-core`;
//! all arenas and the operations that mutate them live in `rb-space`.
//! Arbiters and constraints each carry **two** intrusive `next` links — one
//! per endpoint body — so a single record can sit in both endpoints'
//! per-body lists at once; `next_for`/`set_next_for` select the link that
//! matches the body a traversal is walking.

pub mod arbiter;
pub mod body;
pub mod constraint;
pub mod shape;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arbiter::{Arbiter, Contact, ContactStorage, ShapePair};
pub use body::{Body, BodyKind, ComponentNode};
pub use constraint::Constraint;
pub use shape::{Shape, ShapeKind};
