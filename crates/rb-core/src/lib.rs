//! `rb-core` — foundational types for the `rust_rb` rigid-body workspace.
//!
//! This crate is a dependency of every other `rb-*` crate.  It intentionally
//! has no `rb-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `BodyId`, `ShapeId`, `ArbiterId`, `ConstraintId`, `HashId` |
//! | [`math`]   | `Vec2`, `Aabb`                                          |
//! | [`config`] | `SpaceConfig` (gravity, idle/sleep thresholds)          |
//! | [`error`]  | `ConfigError`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod math;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SpaceConfig;
pub use error::ConfigError;
pub use ids::{ArbiterId, BodyId, ConstraintId, HashId, ShapeId};
pub use math::{Aabb, Vec2};
