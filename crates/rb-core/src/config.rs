//! Space tuning configuration.
//!
//! # The two sleep knobs
//!
//! - `idle_speed_threshold` — the speed below which a body is considered
//!   idle.  `0.0` (the default) means "derive it from gravity": a body is
//!   idle if it moves less than gravity would accelerate it in one step, so
//!   resting stacks register as idle without any per-game tuning.
//! - `sleep_time_threshold` — how long a whole component must stay idle
//!   before it is put to sleep.  `f32::INFINITY` (the default) disables
//!   sleeping entirely.

use crate::{ConfigError, Vec2};

/// Top-level space configuration.
///
/// Construct via struct literal or `SpaceConfig::default()`, then validate
/// once at space-construction time.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceConfig {
    /// Global gravity applied to dynamic bodies each step.
    pub gravity: Vec2,

    /// Speed (not squared) below which a body accumulates idle time.
    /// `0.0` derives the threshold from `|gravity| * dt` per step.
    pub idle_speed_threshold: f32,

    /// Seconds a component must remain entirely idle before sleeping.
    /// `f32::INFINITY` disables sleeping.
    pub sleep_time_threshold: f32,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            gravity:              Vec2::ZERO,
            idle_speed_threshold: 0.0,
            sleep_time_threshold: f32::INFINITY,
        }
    }
}

impl SpaceConfig {
    /// `true` if components are ever allowed to fall asleep.
    #[inline]
    pub fn sleeping_enabled(&self) -> bool {
        self.sleep_time_threshold != f32::INFINITY
    }

    /// Check the configuration for values that would corrupt the idle test.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NegativeThreshold`] for a negative threshold.
    /// - [`ConfigError::NotANumber`] for a NaN threshold.
    /// - [`ConfigError::NonFiniteGravity`] for NaN/infinite gravity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (what, value) in [
            ("idle_speed_threshold", self.idle_speed_threshold),
            ("sleep_time_threshold", self.sleep_time_threshold),
        ] {
            if value.is_nan() {
                return Err(ConfigError::NotANumber { what });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeThreshold { what, value });
            }
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        Ok(())
    }
}
