// SPDX-License-Identifier: MPL-2.0
//! Assembled snackbar subsystem.
//!
//! [`SnackbarSystem`] wires the queue, host state, presenter, and gesture
//! coordinator together and carries the construction-time knobs: the
//! entry/exit transitions for each resting side, an optional renderer
//! override, and the tuning configuration. [`start`] brings the async
//! machinery up under the current tokio runtime and hands back an
//! abort-on-drop handle tied to the owning scope's lifetime.
//!
//! [`start`]: SnackbarSystem::start

use crate::animation::{SnackbarTransitions, TransitionSpec};
use crate::config::SnackbarConfig;
use crate::controller::SnackbarController;
use crate::gesture::{ContainerMetrics, DragCoordinator};
use crate::host::SnackbarHostState;
use crate::presenter::SnackbarPresenter;
use crate::view::{DefaultRenderer, SnackbarRenderer, SnackbarViewModel};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The fully wired snackbar subsystem for one UI surface.
pub struct SnackbarSystem {
    controller: SnackbarController,
    host: SnackbarHostState,
    coordinator: DragCoordinator,
    renderer: Arc<dyn SnackbarRenderer>,
    transitions: SnackbarTransitions,
    config: SnackbarConfig,
}

impl SnackbarSystem {
    /// Creates a system with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SnackbarConfig::default())
    }

    /// Creates a system with the given tuning configuration.
    #[must_use]
    pub fn with_config(config: SnackbarConfig) -> Self {
        let host = SnackbarHostState::new();
        let coordinator =
            DragCoordinator::new(host.clone(), config.clone(), ContainerMetrics::default());
        Self {
            controller: SnackbarController::new(),
            host,
            coordinator,
            renderer: Arc::new(DefaultRenderer),
            transitions: SnackbarTransitions::default(),
            config,
        }
    }

    /// Replaces the entry/exit transition set.
    #[must_use]
    pub fn with_transitions(mut self, transitions: SnackbarTransitions) -> Self {
        self.transitions = transitions;
        self
    }

    /// Replaces the default renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn SnackbarRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// The queue handle; clone it into whatever needs to raise
    /// snackbars.
    #[must_use]
    pub fn controller(&self) -> &SnackbarController {
        &self.controller
    }

    /// The single-flight host state.
    #[must_use]
    pub fn host_state(&self) -> &SnackbarHostState {
        &self.host
    }

    /// The drag gesture coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &DragCoordinator {
        &self.coordinator
    }

    /// The configured transitions.
    #[must_use]
    pub fn transitions(&self) -> &SnackbarTransitions {
        &self.transitions
    }

    /// The tuning configuration.
    #[must_use]
    pub fn config(&self) -> &SnackbarConfig {
        &self.config
    }

    /// Resolves the view model for the currently displayed snackbar, if
    /// any, through the configured renderer.
    #[must_use]
    pub fn view_model(&self) -> Option<SnackbarViewModel> {
        self.host
            .current()
            .map(|displayed| self.renderer.view_model(displayed.event()))
    }

    /// The entry transition matching where the surface last rested.
    #[must_use]
    pub fn entry_transition(&self) -> TransitionSpec {
        self.transitions.enter_for(self.coordinator.entry_edge())
    }

    /// The exit transition matching where the surface last rested.
    #[must_use]
    pub fn exit_transition(&self) -> TransitionSpec {
        self.transitions.exit_for(self.coordinator.entry_edge())
    }

    /// Starts the presenter, duration watcher, and snap-back watcher on
    /// the current tokio runtime, always considered foreground-visible.
    ///
    /// Dropping the returned handle tears everything down.
    #[must_use]
    pub fn start(&self) -> SystemHandle {
        let (gate, visibility) = watch::channel(true);
        self.start_tasks(visibility, Some(gate))
    }

    /// Like [`start`], but gated by an external foreground-visibility
    /// signal: processing pauses whenever the receiver holds `false`.
    ///
    /// Dropping the sender side counts as teardown.
    ///
    /// [`start`]: SnackbarSystem::start
    #[must_use]
    pub fn start_with_visibility(&self, visibility: watch::Receiver<bool>) -> SystemHandle {
        self.start_tasks(visibility, None)
    }

    fn start_tasks(
        &self,
        visibility: watch::Receiver<bool>,
        gate: Option<watch::Sender<bool>>,
    ) -> SystemHandle {
        let presenter = SnackbarPresenter::new(
            self.host.clone(),
            &self.controller,
            visibility,
            self.config.clone(),
        );
        let run = tokio::spawn(async move {
            if let Err(error) = presenter.run().await {
                tracing::debug!(%error, "presenter stopped");
            }
        });

        let watcher = tokio::spawn(SnackbarPresenter::run_duration_watcher(
            self.host.clone(),
            self.config.clone(),
        ));

        let snapback = {
            let coordinator = self.coordinator.clone();
            tokio::spawn(async move { coordinator.run().await })
        };

        SystemHandle {
            tasks: vec![run, watcher, snapback],
            _gate: gate,
        }
    }
}

impl Default for SnackbarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SnackbarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackbarSystem")
            .field("controller", &self.controller)
            .field("host", &self.host)
            .field("coordinator", &self.coordinator)
            .field("transitions", &self.transitions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Owns the running snackbar tasks.
///
/// Dropping the handle aborts the presenter and both watchers, which in
/// turn cancels every pending suspension: the grace delay, the
/// auto-dismiss timer, and the suspended show call (whose cleanup clears
/// the displayed request).
#[derive(Debug)]
pub struct SystemHandle {
    tasks: Vec<JoinHandle<()>>,
    _gate: Option<watch::Sender<bool>>,
}

impl SystemHandle {
    /// Stops all tasks. Equivalent to dropping the handle.
    pub fn shutdown(self) {}
}

impl Drop for SystemHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SlideEdge;
    use crate::event::{Icon, SnackbarDuration, SnackbarEvent};
    use crate::gesture::DragAnchor;
    use crate::view::TrailingControl;

    #[test]
    fn view_model_is_empty_while_idle() {
        let system = SnackbarSystem::new();
        assert!(system.view_model().is_none());
    }

    #[tokio::test]
    async fn view_model_uses_the_configured_renderer() {
        struct UpperCaseRenderer;
        impl SnackbarRenderer for UpperCaseRenderer {
            fn view_model(&self, event: &SnackbarEvent) -> SnackbarViewModel {
                let mut view = DefaultRenderer.view_model(event);
                view.text = view.text.to_uppercase();
                view
            }
        }

        let system = SnackbarSystem::new().with_renderer(Arc::new(UpperCaseRenderer));
        let host = system.host_state().clone();
        let _show = tokio::spawn(async move {
            host.show_snackbar(SnackbarEvent::message(
                "quiet",
                Icon::new("info"),
                SnackbarDuration::Short,
            ))
            .await
        });
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        let view = system.view_model().expect("a snackbar is showing");
        assert_eq!(view.text, "QUIET");
        assert_eq!(view.trailing, TrailingControl::DismissButton);
    }

    #[test]
    fn transitions_follow_the_resting_side() {
        let system = SnackbarSystem::new();
        assert_eq!(system.entry_transition().edge, SlideEdge::Top);

        system.coordinator().snap_to(DragAnchor::Secondary);
        assert_eq!(system.entry_transition().edge, SlideEdge::Bottom);
        assert_eq!(system.exit_transition().edge, SlideEdge::Bottom);
    }
}
