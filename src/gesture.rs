// SPDX-License-Identifier: MPL-2.0
//! Drag-to-dismiss gesture state machine.
//!
//! The snackbar surface moves along a single vertical axis between four
//! named anchors: two resting positions (fully visible at the top or
//! bottom of the container) and two dismissing positions (off screen past
//! either edge). Drag input moves a continuous offset; on release a decay
//! projection of the fling plus positional and velocity thresholds pick
//! the settling anchor. Reaching a dismissing anchor is a confirmed
//! user-dismiss.
//!
//! While a loading event is showing only the resting anchors exist, so a
//! drag can never throw away an in-flight operation; the work has to
//! finish or be cancelled through its own API.
//!
//! The coordinator publishes target positions; the spring-driven motion
//! toward them is the rendering collaborator's job.

use crate::animation::SlideEdge;
use crate::config::SnackbarConfig;
use crate::host::SnackbarHostState;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::time::sleep;

/// Named positions in the snackbar's vertical drag space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragAnchor {
    /// Fully visible at the top of the container.
    Primary,
    /// Fully visible near the bottom of the container.
    Secondary,
    /// Off screen past the top edge; reaching it dismisses.
    DismissingFromPrimary,
    /// Off screen past the bottom edge; reaching it dismisses.
    DismissingFromSecondary,
}

/// The two resting anchors, the only ones reachable while loading.
const RESTING_ANCHORS: [DragAnchor; 2] = [DragAnchor::Primary, DragAnchor::Secondary];

/// The full anchor set.
const ALL_ANCHORS: [DragAnchor; 4] = [
    DragAnchor::Primary,
    DragAnchor::Secondary,
    DragAnchor::DismissingFromPrimary,
    DragAnchor::DismissingFromSecondary,
];

impl DragAnchor {
    /// The resting position this anchor settles back to after a
    /// dismissal.
    #[must_use]
    pub fn resting(self) -> Self {
        match self {
            DragAnchor::Primary | DragAnchor::DismissingFromPrimary => DragAnchor::Primary,
            DragAnchor::Secondary | DragAnchor::DismissingFromSecondary => DragAnchor::Secondary,
        }
    }

    /// Returns `true` for the two off-screen anchors.
    #[must_use]
    pub fn is_dismissing(self) -> bool {
        matches!(
            self,
            DragAnchor::DismissingFromPrimary | DragAnchor::DismissingFromSecondary
        )
    }

    /// The container edge this anchor belongs to, used to pick entry and
    /// exit transitions.
    #[must_use]
    pub fn edge(self) -> SlideEdge {
        match self {
            DragAnchor::Primary | DragAnchor::DismissingFromPrimary => SlideEdge::Top,
            DragAnchor::Secondary | DragAnchor::DismissingFromSecondary => SlideEdge::Bottom,
        }
    }
}

/// Measured container geometry the anchor offsets are computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    /// Container height in logical pixels.
    pub height: f32,
}

impl Default for ContainerMetrics {
    /// Placeholder geometry used until the first real measurement
    /// arrives.
    fn default() -> Self {
        Self { height: 640.0 }
    }
}

/// Anchor offset table for one container measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorLayout {
    container_height: f32,
    snackbar_height: f32,
    secondary_margin: f32,
    primary_overshoot: f32,
    secondary_overshoot: f32,
}

impl AnchorLayout {
    /// Builds the offset table for `metrics` with the geometry parameters
    /// from `config`.
    #[must_use]
    pub fn new(metrics: ContainerMetrics, config: &SnackbarConfig) -> Self {
        Self {
            container_height: metrics.height,
            snackbar_height: config.snackbar_height,
            secondary_margin: config.secondary_margin,
            primary_overshoot: config.primary_overshoot,
            secondary_overshoot: config.secondary_overshoot,
        }
    }

    /// Vertical offset of `anchor`, measured from the top of the
    /// container.
    #[must_use]
    pub fn offset(&self, anchor: DragAnchor) -> f32 {
        match anchor {
            DragAnchor::Primary => 0.0,
            DragAnchor::Secondary => {
                self.container_height - self.snackbar_height - self.secondary_margin
            }
            DragAnchor::DismissingFromPrimary => {
                -(self.snackbar_height + self.primary_overshoot)
            }
            DragAnchor::DismissingFromSecondary => {
                self.container_height + self.snackbar_height + self.secondary_overshoot
            }
        }
    }
}

/// Continuous gesture state published to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// The last settled (or targeted) anchor.
    pub anchor: DragAnchor,
    /// Current continuous offset along the drag axis.
    pub offset: f32,
    /// Whether a drag is in progress.
    pub dragging: bool,
}

/// Positional state machine driving drag, fling, and snap-back behavior.
///
/// Clonable handle; all clones share one state.
#[derive(Clone, Debug)]
pub struct DragCoordinator {
    inner: Arc<CoordinatorInner>,
}

#[derive(Debug)]
struct CoordinatorInner {
    host: SnackbarHostState,
    state: watch::Sender<GestureState>,
    layout: Mutex<AnchorLayout>,
    config: SnackbarConfig,
}

impl DragCoordinator {
    /// Creates a coordinator resting at the primary anchor.
    #[must_use]
    pub fn new(host: SnackbarHostState, config: SnackbarConfig, metrics: ContainerMetrics) -> Self {
        let layout = AnchorLayout::new(metrics, &config);
        let (state, _) = watch::channel(GestureState {
            anchor: DragAnchor::Primary,
            offset: layout.offset(DragAnchor::Primary),
            dragging: false,
        });
        Self {
            inner: Arc::new(CoordinatorInner {
                host,
                state,
                layout: Mutex::new(layout),
                config,
            }),
        }
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        *self.inner.state.borrow()
    }

    /// Subscribes to gesture state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GestureState> {
        self.inner.state.subscribe()
    }

    /// The edge new snackbars enter from, given where the surface last
    /// rested.
    #[must_use]
    pub fn entry_edge(&self) -> SlideEdge {
        self.state().anchor.resting().edge()
    }

    /// Replaces the layout after a container (re-)measurement.
    ///
    /// Re-pins the offset to the current anchor unless a drag is in
    /// progress.
    pub fn set_container_metrics(&self, metrics: ContainerMetrics) {
        let layout = AnchorLayout::new(metrics, &self.inner.config);
        *self.lock_layout() = layout;
        self.inner.state.send_if_modified(|state| {
            if state.dragging {
                return false;
            }
            let pinned = layout.offset(state.anchor);
            if state.offset == pinned {
                false
            } else {
                state.offset = pinned;
                true
            }
        });
    }

    /// Marks the start of a drag.
    pub fn drag_start(&self) {
        self.inner.state.send_modify(|state| state.dragging = true);
    }

    /// Moves the drag offset by `delta`, clamped to the reachable anchor
    /// range.
    pub fn drag_by(&self, delta: f32) {
        let (min, max) = self.drag_bounds();
        self.inner.state.send_modify(|state| {
            state.dragging = true;
            state.offset = (state.offset + delta).clamp(min, max);
        });
    }

    /// Settles the released drag.
    ///
    /// Picks the target anchor from the fling projection and thresholds
    /// and publishes it. When the target is a dismissing anchor this also
    /// dismisses the current request, waits out the settle delay, and
    /// snaps back to the matching resting anchor. Returns the anchor the
    /// release decided on.
    pub async fn release(&self, velocity: f32) -> DragAnchor {
        let target = self.compute_target(self.state(), velocity);
        self.snap_to(target);
        tracing::debug!(?target, velocity, "drag released");

        if target.is_dismissing() {
            if let Some(displayed) = self.inner.host.current() {
                displayed.dismiss();
            }
            sleep(self.inner.config.settle_delay()).await;
            self.snap_to(target.resting());
        }
        target
    }

    /// Moves the surface to `anchor`.
    ///
    /// Only the target is published; observers decide whether to animate
    /// toward it (the settle spring from the configuration) or jump, for
    /// example when resetting between snackbars.
    pub fn snap_to(&self, anchor: DragAnchor) {
        let offset = self.lock_layout().offset(anchor);
        self.inner.state.send_replace(GestureState {
            anchor,
            offset,
            dragging: false,
        });
    }

    /// Snap-back watcher: once the displayed request clears, waits out
    /// the exit animation and returns the surface to its last resting
    /// anchor. A new request arriving first cancels the pending
    /// snap-back.
    pub async fn run(&self) {
        let mut current = self.inner.host.subscribe();
        loop {
            if current.wait_for(Option::is_some).await.is_err() {
                return;
            }
            if current.wait_for(Option::is_none).await.is_err() {
                return;
            }
            tokio::select! {
                () = sleep(self.inner.config.clear_snapback_delay()) => {
                    self.snap_to(self.state().anchor.resting());
                }
                res = current.wait_for(Option::is_some) => {
                    if res.is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Anchors reachable for the currently displayed event.
    fn anchors(&self) -> &'static [DragAnchor] {
        if self.allows_drag_dismiss() {
            &ALL_ANCHORS
        } else {
            &RESTING_ANCHORS
        }
    }

    fn allows_drag_dismiss(&self) -> bool {
        self.inner
            .host
            .current()
            .is_none_or(|displayed| displayed.event().supports_drag_dismiss())
    }

    fn drag_bounds(&self) -> (f32, f32) {
        let layout = *self.lock_layout();
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &anchor in self.anchors() {
            let offset = layout.offset(anchor);
            min = min.min(offset);
            max = max.max(offset);
        }
        (min, max)
    }

    /// Decides where a release at `velocity` settles.
    ///
    /// A fling past the velocity threshold advances one anchor in its
    /// direction. Otherwise the decay-projected end position must cross
    /// the positional threshold toward an anchor to advance there,
    /// walking as many anchors as the projection clears.
    fn compute_target(&self, state: GestureState, velocity: f32) -> DragAnchor {
        let layout = *self.lock_layout();
        let positioned: Vec<(DragAnchor, f32)> = self
            .anchors()
            .iter()
            .map(|&anchor| (anchor, layout.offset(anchor)))
            .collect();

        let mut target = state.anchor.resting();
        let mut here = layout.offset(target);

        if velocity.abs() >= self.inner.config.velocity_threshold {
            return match Self::neighbor(&positioned, here, velocity > 0.0) {
                Some((next, _)) => next,
                None => target,
            };
        }

        let projected = state.offset + self.inner.config.decay().project(velocity);
        let threshold = self.inner.config.positional_threshold();
        loop {
            if (projected - here).abs() <= f32::EPSILON {
                break;
            }
            let Some((next, next_offset)) =
                Self::neighbor(&positioned, here, projected > here)
            else {
                break;
            };
            let fraction = (projected - here) / (next_offset - here);
            if fraction >= threshold {
                target = next;
                here = next_offset;
            } else {
                break;
            }
        }
        target
    }

    /// The closest anchor strictly past `from` in the given direction.
    fn neighbor(
        positioned: &[(DragAnchor, f32)],
        from: f32,
        toward_larger: bool,
    ) -> Option<(DragAnchor, f32)> {
        if toward_larger {
            positioned
                .iter()
                .copied()
                .filter(|(_, offset)| *offset > from + f32::EPSILON)
                .min_by(|a, b| a.1.total_cmp(&b.1))
        } else {
            positioned
                .iter()
                .copied()
                .filter(|(_, offset)| *offset < from - f32::EPSILON)
                .max_by(|a, b| a.1.total_cmp(&b.1))
        }
    }

    fn lock_layout(&self) -> std::sync::MutexGuard<'_, AnchorLayout> {
        // Held only for copy-in/copy-out, never across an await.
        self.inner.layout.lock().expect("layout mutex poisoned")
    }
}
