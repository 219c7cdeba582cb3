//! Fluent builder for constructing a [`Space`].

use rb_core::{SpaceConfig, Vec2};

use crate::{Space, SpaceResult};

/// Builder for [`Space`].
///
/// # Defaults
///
/// | Method                     | Default               |
/// |----------------------------|-----------------------|
/// | `.gravity(v)`              | `Vec2::ZERO`          |
/// | `.idle_speed_threshold(f)` | `0.0` (gravity-based) |
/// | `.sleep_time_threshold(f)` | `∞` (sleep disabled)  |
///
/// # Example
///
/// ```rust,ignore
/// let mut space = SpaceBuilder::new()
///     .gravity(Vec2::new(0.0, -10.0))
///     .sleep_time_threshold(0.5)
///     .build()?;
/// ```
#[derive(Default)]
pub struct SpaceBuilder {
    config: SpaceConfig,
}

impl SpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration instead of the defaults.
    pub fn with_config(config: SpaceConfig) -> Self {
        Self { config }
    }

    pub fn gravity(mut self, gravity: Vec2) -> Self {
        self.config.gravity = gravity;
        self
    }

    /// Speed below which a body accumulates idle time.  `0.0` derives the
    /// threshold from gravity per step.
    pub fn idle_speed_threshold(mut self, threshold: f32) -> Self {
        self.config.idle_speed_threshold = threshold;
        self
    }

    /// Seconds a component must stay idle before sleeping.  Finite values
    /// enable the sleep engine.
    pub fn sleep_time_threshold(mut self, threshold: f32) -> Self {
        self.config.sleep_time_threshold = threshold;
        self
    }

    /// Validate the configuration and produce an empty [`Space`].
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Config`][crate::SpaceError::Config] for NaN or
    /// negative thresholds or non-finite gravity.
    pub fn build(self) -> SpaceResult<Space> {
        self.config.validate()?;
        Ok(Space::with_config(self.config))
    }
}
