// SPDX-License-Identifier: MPL-2.0
//! Motion parameters consumed by the rendering collaborator.
//!
//! This crate does not run animations. It describes them: spring
//! parameters for settle motion, a decay model for projecting fling
//! velocities, and the entry/exit transition set picked by resting side.
//! Whatever animates the actual pixels treats these as an opaque
//! `animate(from, to, spec)` input.

use serde::{Deserialize, Serialize};

/// Spring physics parameters.
///
/// `damping_ratio` of 1.0 is critically damped; below 1.0 the spring
/// overshoots and bounces. Higher `stiffness` settles faster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSpec {
    pub damping_ratio: f32,
    pub stiffness: f32,
}

impl SpringSpec {
    /// Damping ratio producing a noticeable but quickly settling bounce.
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;

    /// Damping ratio with no bounce at all.
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    /// Medium stiffness, the default for interactive settle motion.
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;

    /// Softer stiffness used by the entry/exit transitions.
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

    /// Creates a spring from raw parameters.
    #[must_use]
    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
        }
    }

    /// Medium-bouncy, medium-stiffness spring used for drag settling.
    #[must_use]
    pub const fn medium_bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM)
    }

    /// Medium-bouncy, softer spring used for entry/exit transitions.
    #[must_use]
    pub const fn transition() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM_LOW)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::medium_bouncy()
    }
}

/// Exponential fling decay.
///
/// Models a released drag coasting to a stop: a release at velocity `v`
/// travels roughly `v / friction` further before stopping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecaySpec {
    friction: f32,
}

impl DecaySpec {
    /// Creates a decay model with the given friction rate.
    ///
    /// Non-positive rates are coerced to a minimal friction so the
    /// projection stays finite.
    #[must_use]
    pub fn new(friction: f32) -> Self {
        Self {
            friction: if friction > 0.0 { friction } else { f32::EPSILON },
        }
    }

    /// Returns the friction rate.
    #[must_use]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Projects how far past the release point a fling at `velocity`
    /// (logical pixels per second) will travel.
    #[must_use]
    pub fn project(&self, velocity: f32) -> f32 {
        velocity / self.friction
    }
}

/// Which container edge a transition slides from or toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideEdge {
    Top,
    Bottom,
}

/// One direction of an entry or exit transition: a vertical slide
/// combined with a horizontal grow/shrink, both driven by a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Edge the surface slides in from (entry) or out toward (exit).
    pub edge: SlideEdge,
    /// Fraction of the surface width covered by the grow/shrink part.
    pub grow_fraction: f32,
    /// Spring driving both the slide and the grow.
    pub spring: SpringSpec,
}

impl TransitionSpec {
    /// Creates a transition sliding at `edge`.
    #[must_use]
    pub const fn new(edge: SlideEdge, grow_fraction: f32, spring: SpringSpec) -> Self {
        Self {
            edge,
            grow_fraction,
            spring,
        }
    }
}

/// The four construction-time transition knobs: entry and exit for each
/// resting side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnackbarTransitions {
    pub top_enter: TransitionSpec,
    pub top_exit: TransitionSpec,
    pub bottom_enter: TransitionSpec,
    pub bottom_exit: TransitionSpec,
}

impl SnackbarTransitions {
    /// Fraction of the width the default transitions grow from.
    const GROW_FRACTION: f32 = 0.2;

    /// Returns the entry transition for a resting side.
    #[must_use]
    pub fn enter_for(&self, edge: SlideEdge) -> TransitionSpec {
        match edge {
            SlideEdge::Top => self.top_enter,
            SlideEdge::Bottom => self.bottom_enter,
        }
    }

    /// Returns the exit transition for a resting side.
    #[must_use]
    pub fn exit_for(&self, edge: SlideEdge) -> TransitionSpec {
        match edge {
            SlideEdge::Top => self.top_exit,
            SlideEdge::Bottom => self.bottom_exit,
        }
    }
}

impl Default for SnackbarTransitions {
    fn default() -> Self {
        let spring = SpringSpec::transition();
        Self {
            top_enter: TransitionSpec::new(SlideEdge::Top, Self::GROW_FRACTION, spring),
            top_exit: TransitionSpec::new(SlideEdge::Top, Self::GROW_FRACTION, spring),
            bottom_enter: TransitionSpec::new(SlideEdge::Bottom, Self::GROW_FRACTION, spring),
            bottom_exit: TransitionSpec::new(SlideEdge::Bottom, Self::GROW_FRACTION, spring),
        }
    }
}
