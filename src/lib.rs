// SPDX-License-Identifier: MPL-2.0
//! `snackbar-kit` provides transient notification bars ("snackbars") with
//! single-flight display coordination and drag-to-dismiss gestures.
//!
//! Any part of an application pushes [`SnackbarEvent`]s into a
//! [`SnackbarController`]; a presenter serializes them into the one
//! visible slot owned by [`SnackbarHostState`], superseding whatever is
//! currently showing (most-recent-wins, with a short grace interval for
//! the exit animation). Callers of
//! [`SnackbarHostState::show_snackbar`] suspend until their snackbar
//! resolves: dismissed, action performed, expired, dragged off screen, or
//! superseded. The [`DragCoordinator`] runs the positional state machine
//! for drag-to-dismiss over four named anchors.
//!
//! Rendering stays outside the crate: [`view`] resolves events into view
//! models and [`animation`] describes the motion, but drawing and
//! animating pixels belong to the embedding UI.
//!
//! # Example
//!
//! ```no_run
//! use snackbar_kit::{Icon, SnackbarDuration, SnackbarEvent, SnackbarSystem};
//!
//! # async fn demo() {
//! let system = SnackbarSystem::new();
//! let handle = system.start();
//!
//! let controller = system.controller().clone();
//! controller.push_event(SnackbarEvent::message(
//!     "Image saved",
//!     Icon::new("check"),
//!     SnackbarDuration::Short,
//! ));
//!
//! // ... later, tearing down the UI scope stops everything.
//! handle.shutdown();
//! # }
//! ```

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod gesture;
pub mod host;
pub mod observable;
pub mod presenter;
pub mod system;
pub mod view;

pub use animation::{DecaySpec, SlideEdge, SnackbarTransitions, SpringSpec, TransitionSpec};
pub use config::SnackbarConfig;
pub use controller::SnackbarController;
pub use error::{Error, Result};
pub use event::{Icon, SnackbarDuration, SnackbarEvent, SnackbarId};
pub use gesture::{AnchorLayout, ContainerMetrics, DragAnchor, DragCoordinator, GestureState};
pub use host::{DisplayedSnackbar, SnackbarHostState, SnackbarResult};
pub use observable::Observable;
pub use presenter::SnackbarPresenter;
pub use system::{SnackbarSystem, SystemHandle};
pub use view::{
    DefaultRenderer, IndicatorState, SnackbarRenderer, SnackbarViewModel, TrailingControl,
};
