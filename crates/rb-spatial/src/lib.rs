//! `rb-spatial` — the broadphase shape index for the rust_rb workspace.
//!
//! A [`ShapeIndex`] maps stable shape keys ([`HashId`][rb_core::HashId]) to
//! axis-aligned bounding boxes and answers overlap queries.  The space keeps
//! two of them: one for shapes of active bodies (refreshed every step) and
//! one for shapes of static and sleeping bodies (touched only on
//! sleep/wake transitions).

pub mod index;

#[cfg(test)]
mod tests;

pub use index::ShapeIndex;
