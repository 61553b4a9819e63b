// SPDX-License-Identifier: MPL-2.0
//! Core snackbar event data structures.
//!
//! A [`SnackbarEvent`] describes one notification request: what to say,
//! which icon to show, how long to stay, and the per-variant payload
//! (loading flag, action callback, progress state). Events are pure data;
//! all display behavior lives in the host, presenter, and gesture layers.

use crate::observable::Observable;
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a snackbar event.
///
/// Generated randomly at construction and never reused. Identifiers are
/// only used for equality checks and logging, never for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnackbarId(u64);

impl SnackbarId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(rand::random::<u64>())
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for SnackbarId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnackbarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// How long a snackbar stays visible without user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarDuration {
    /// Roughly four seconds.
    Short,
    /// Roughly ten seconds.
    Long,
    /// Stays until dismissed or superseded.
    Indefinite,
}

impl SnackbarDuration {
    /// Converts the symbolic duration to concrete milliseconds for the
    /// auto-dismiss timer.
    #[must_use]
    pub fn to_millis(self) -> u64 {
        match self {
            SnackbarDuration::Short => 4_000,
            SnackbarDuration::Long => 10_000,
            SnackbarDuration::Indefinite => u64::MAX,
        }
    }

    /// Returns `true` if this duration never expires on its own.
    #[must_use]
    pub fn is_indefinite(self) -> bool {
        matches!(self, SnackbarDuration::Indefinite)
    }
}

/// Opaque reference to an icon resource.
///
/// The crate never draws icons; the rendering collaborator resolves the
/// name against its own asset registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon(String);

impl Icon {
    /// Creates an icon reference from an asset name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the asset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Callback invoked when the user activates an action snackbar.
#[derive(Clone)]
pub struct SnackbarAction(Arc<dyn Fn() + Send + Sync>);

impl SnackbarAction {
    /// Wraps a callback.
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Runs the callback.
    pub(crate) fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for SnackbarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SnackbarAction(..)")
    }
}

/// A snackbar request.
///
/// Variants map one-to-one onto the visual kinds the rendering layer
/// knows how to draw. Two events compare equal when they carry the same
/// identifier.
#[derive(Debug, Clone)]
pub enum SnackbarEvent {
    /// Plain message with a dismiss control.
    Message {
        id: SnackbarId,
        text: String,
        icon: Icon,
        duration: SnackbarDuration,
    },

    /// Message with a spinner tracking an in-flight operation.
    ///
    /// Always indefinite; the operation's owner flips `is_loading` to
    /// `false` when the work completes.
    Loading {
        id: SnackbarId,
        text: String,
        icon: Icon,
        is_loading: Observable<bool>,
    },

    /// Message with an action button.
    ///
    /// Always indefinite; resolved by the action button, the gesture
    /// layer, or supersession.
    Action {
        id: SnackbarId,
        text: String,
        icon: Icon,
        action_icon: Icon,
        action: SnackbarAction,
    },

    /// Message with a body line and a determinate progress indicator.
    ///
    /// Always indefinite while in flight; the progress is considered
    /// complete once `percentage` reaches 1.0.
    Progress {
        id: SnackbarId,
        text: String,
        body: Observable<String>,
        icon: Icon,
        percentage: Observable<f32>,
    },
}

impl SnackbarEvent {
    /// Creates a plain message event.
    pub fn message(
        text: impl Into<String>,
        icon: Icon,
        duration: SnackbarDuration,
    ) -> Self {
        SnackbarEvent::Message {
            id: SnackbarId::new(),
            text: text.into(),
            icon,
            duration,
        }
    }

    /// Creates a loading event tied to the given loading flag.
    pub fn loading(text: impl Into<String>, icon: Icon, is_loading: Observable<bool>) -> Self {
        SnackbarEvent::Loading {
            id: SnackbarId::new(),
            text: text.into(),
            icon,
            is_loading,
        }
    }

    /// Creates an action event invoking `action` when activated.
    pub fn action(
        text: impl Into<String>,
        icon: Icon,
        action_icon: Icon,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        SnackbarEvent::Action {
            id: SnackbarId::new(),
            text: text.into(),
            icon,
            action_icon,
            action: SnackbarAction::new(action),
        }
    }

    /// Creates a progress event tied to the given body and percentage.
    pub fn progress(
        text: impl Into<String>,
        body: Observable<String>,
        icon: Icon,
        percentage: Observable<f32>,
    ) -> Self {
        SnackbarEvent::Progress {
            id: SnackbarId::new(),
            text: text.into(),
            body,
            icon,
            percentage,
        }
    }

    /// Returns the event's unique identifier.
    #[must_use]
    pub fn id(&self) -> SnackbarId {
        match self {
            SnackbarEvent::Message { id, .. }
            | SnackbarEvent::Loading { id, .. }
            | SnackbarEvent::Action { id, .. }
            | SnackbarEvent::Progress { id, .. } => *id,
        }
    }

    /// Returns the headline text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            SnackbarEvent::Message { text, .. }
            | SnackbarEvent::Loading { text, .. }
            | SnackbarEvent::Action { text, .. }
            | SnackbarEvent::Progress { text, .. } => text,
        }
    }

    /// Returns the leading icon.
    #[must_use]
    pub fn icon(&self) -> &Icon {
        match self {
            SnackbarEvent::Message { icon, .. }
            | SnackbarEvent::Loading { icon, .. }
            | SnackbarEvent::Action { icon, .. }
            | SnackbarEvent::Progress { icon, .. } => icon,
        }
    }

    /// Returns the display duration.
    ///
    /// Only `Message` carries a configurable duration; the other variants
    /// stay until resolved by their own completion rules.
    #[must_use]
    pub fn duration(&self) -> SnackbarDuration {
        match self {
            SnackbarEvent::Message { duration, .. } => *duration,
            SnackbarEvent::Loading { .. }
            | SnackbarEvent::Action { .. }
            | SnackbarEvent::Progress { .. } => SnackbarDuration::Indefinite,
        }
    }

    /// Returns `true` if the user may dismiss this event by dragging it
    /// off screen.
    ///
    /// Loading events cannot be drag-dismissed: losing the snackbar would
    /// lose track of the in-flight operation it represents.
    #[must_use]
    pub fn supports_drag_dismiss(&self) -> bool {
        !matches!(self, SnackbarEvent::Loading { .. })
    }

    /// Returns the current progress fraction, clamped to `[0, 1]`.
    ///
    /// `None` for non-progress variants.
    #[must_use]
    pub fn percentage(&self) -> Option<f32> {
        match self {
            SnackbarEvent::Progress { percentage, .. } => {
                Some(percentage.get().clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

impl PartialEq for SnackbarEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for SnackbarEvent {}
