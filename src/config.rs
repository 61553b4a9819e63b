// SPDX-License-Identifier: MPL-2.0
//! Tunable parameters for the snackbar pipeline.
//!
//! Defaults live in [`defaults`] as the single source of truth; the
//! [`SnackbarConfig`] struct bundles them for injection into the
//! presenter and gesture coordinator. All values are visual tuning
//! parameters, none are load-bearing contracts.

use crate::animation::{DecaySpec, SpringSpec};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Centralized default values for all tunable constants.
pub mod defaults {
    // ======================================================================
    // Timing Defaults
    // ======================================================================

    /// Pause between dismissing a superseded snackbar and showing the next
    /// one, so the exit animation can finish (in milliseconds).
    pub const GRACE_DELAY_MS: u64 = 300;

    /// Pause after a drag-dismissal before the coordinator snaps back to
    /// its resting anchor (in milliseconds).
    pub const SETTLE_DELAY_MS: u64 = 400;

    /// Pause after the current request clears before the coordinator snaps
    /// back to its resting anchor (in milliseconds).
    pub const CLEAR_SNAPBACK_DELAY_MS: u64 = 400;

    /// How long a loading or progress snackbar lingers after its work
    /// completes before dismissing itself (in milliseconds).
    pub const COMPLETION_DISMISS_MS: u64 = 2_000;

    // ======================================================================
    // Geometry Defaults
    // ======================================================================

    /// Height of the snackbar surface, in logical pixels.
    pub const SNACKBAR_HEIGHT: f32 = 64.0;

    /// Gap kept between the secondary resting position and the bottom
    /// container edge, in logical pixels.
    pub const SECONDARY_MARGIN: f32 = 24.0;

    /// Extra travel past the top edge before the primary-side dismissal
    /// anchor is reached, in logical pixels.
    pub const PRIMARY_OVERSHOOT: f32 = 175.0;

    /// Extra travel past the bottom edge before the secondary-side
    /// dismissal anchor is reached, in logical pixels.
    pub const SECONDARY_OVERSHOOT: f32 = 75.0;

    // ======================================================================
    // Gesture Defaults
    // ======================================================================

    /// Fraction of the distance to the next anchor a release must project
    /// past before the coordinator advances to it.
    pub const POSITIONAL_THRESHOLD: f32 = 0.8;

    /// Release speed (logical pixels per second) above which a fling
    /// advances one anchor regardless of position.
    pub const VELOCITY_THRESHOLD: f32 = 100.0;

    /// Friction rate for projecting a fling velocity to its end point.
    pub const DECAY_FRICTION: f32 = 4.0;

    // ======================================================================
    // Compile-time Validation
    // ======================================================================

    const _: () = {
        assert!(GRACE_DELAY_MS > 0);
        assert!(SETTLE_DELAY_MS > 0);
        assert!(CLEAR_SNAPBACK_DELAY_MS > 0);
        assert!(COMPLETION_DISMISS_MS > 0);

        assert!(SNACKBAR_HEIGHT > 0.0);
        assert!(SECONDARY_MARGIN >= 0.0);
        assert!(PRIMARY_OVERSHOOT >= 0.0);
        assert!(SECONDARY_OVERSHOOT >= 0.0);

        assert!(POSITIONAL_THRESHOLD > 0.0);
        assert!(POSITIONAL_THRESHOLD < 1.0);
        assert!(VELOCITY_THRESHOLD >= 0.0);
        assert!(DECAY_FRICTION > 0.0);
    };
}

/// Bundle of tunable parameters injected at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnackbarConfig {
    /// See [`defaults::GRACE_DELAY_MS`].
    pub grace_delay_ms: u64,
    /// See [`defaults::SETTLE_DELAY_MS`].
    pub settle_delay_ms: u64,
    /// See [`defaults::CLEAR_SNAPBACK_DELAY_MS`].
    pub clear_snapback_delay_ms: u64,
    /// See [`defaults::COMPLETION_DISMISS_MS`].
    pub completion_dismiss_ms: u64,

    /// See [`defaults::SNACKBAR_HEIGHT`].
    pub snackbar_height: f32,
    /// See [`defaults::SECONDARY_MARGIN`].
    pub secondary_margin: f32,
    /// See [`defaults::PRIMARY_OVERSHOOT`].
    pub primary_overshoot: f32,
    /// See [`defaults::SECONDARY_OVERSHOOT`].
    pub secondary_overshoot: f32,

    /// See [`defaults::POSITIONAL_THRESHOLD`].
    pub positional_threshold: f32,
    /// See [`defaults::VELOCITY_THRESHOLD`].
    pub velocity_threshold: f32,
    /// See [`defaults::DECAY_FRICTION`].
    pub decay_friction: f32,

    /// Spring used for settle and snap-back motion.
    pub settle_spring: SpringSpec,
}

impl SnackbarConfig {
    /// Grace interval between a supersession and the next entry.
    #[must_use]
    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }

    /// Delay between a drag-dismissal and the snap back to rest.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Delay between the current request clearing and the snap back to
    /// rest.
    #[must_use]
    pub fn clear_snapback_delay(&self) -> Duration {
        Duration::from_millis(self.clear_snapback_delay_ms)
    }

    /// Linger time for completed loading/progress snackbars.
    #[must_use]
    pub fn completion_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.completion_dismiss_ms)
    }

    /// Positional threshold clamped to a sane fraction.
    #[must_use]
    pub fn positional_threshold(&self) -> f32 {
        self.positional_threshold.clamp(0.05, 0.95)
    }

    /// Fling decay used for release projection.
    #[must_use]
    pub fn decay(&self) -> DecaySpec {
        DecaySpec::new(self.decay_friction)
    }
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            grace_delay_ms: defaults::GRACE_DELAY_MS,
            settle_delay_ms: defaults::SETTLE_DELAY_MS,
            clear_snapback_delay_ms: defaults::CLEAR_SNAPBACK_DELAY_MS,
            completion_dismiss_ms: defaults::COMPLETION_DISMISS_MS,
            snackbar_height: defaults::SNACKBAR_HEIGHT,
            secondary_margin: defaults::SECONDARY_MARGIN,
            primary_overshoot: defaults::PRIMARY_OVERSHOOT,
            secondary_overshoot: defaults::SECONDARY_OVERSHOOT,
            positional_threshold: defaults::POSITIONAL_THRESHOLD,
            velocity_threshold: defaults::VELOCITY_THRESHOLD,
            decay_friction: defaults::DECAY_FRICTION,
            settle_spring: SpringSpec::medium_bouncy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings_match_constants() {
        let config = SnackbarConfig::default();
        assert_eq!(config.grace_delay(), Duration::from_millis(300));
        assert_eq!(config.settle_delay(), Duration::from_millis(400));
        assert_eq!(config.clear_snapback_delay(), Duration::from_millis(400));
        assert_eq!(config.completion_dismiss_delay(), Duration::from_millis(2_000));
    }

    #[test]
    fn positional_threshold_is_clamped() {
        let mut config = SnackbarConfig::default();
        config.positional_threshold = 2.0;
        assert_eq!(config.positional_threshold(), 0.95);

        config.positional_threshold = 0.0;
        assert_eq!(config.positional_threshold(), 0.05);
    }

    #[test]
    fn geometry_defaults_are_valid() {
        let config = SnackbarConfig::default();
        assert_eq!(config.snackbar_height, 64.0);
        assert!(config.primary_overshoot >= 0.0);
        assert!(config.secondary_overshoot >= 0.0);
    }

    #[test]
    fn decay_uses_configured_friction() {
        let config = SnackbarConfig::default();
        assert_eq!(config.decay().friction(), defaults::DECAY_FRICTION);
    }
}
