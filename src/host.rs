// SPDX-License-Identifier: MPL-2.0
//! Single-flight display coordinator.
//!
//! [`SnackbarHostState`] owns the one visible slot. [`show_snackbar`]
//! installs a request and suspends its caller until the request resolves:
//! through the dismiss control, the action button, the auto-dismiss
//! timer, the gesture coordinator, or supersession by a newer event. A
//! request superseded before resolving is force-resolved as dismissed so
//! its caller never leaks a suspended wait.
//!
//! Cancelling the `show_snackbar` future (for example when the owning UI
//! scope tears down) resolves the handle internally and returns the host
//! to idle; the caller observes the cancellation itself, never a phantom
//! dismissal.
//!
//! [`show_snackbar`]: SnackbarHostState::show_snackbar

use crate::event::{SnackbarEvent, SnackbarId};
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};

/// Outcome of a displayed snackbar, returned to the `show_snackbar`
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarResult {
    /// The user activated the action button.
    ActionPerformed,
    /// The snackbar went away without its action being taken.
    Dismissed,
}

/// A snackbar currently owned by the host, paired with its resolution
/// handle.
///
/// Cloning shares the handle; the first resolution wins and every later
/// attempt is an ignored no-op. Two handles compare equal when they refer
/// to the same displayed request.
#[derive(Clone, Debug)]
pub struct DisplayedSnackbar {
    inner: Arc<DisplayedInner>,
}

#[derive(Debug)]
struct DisplayedInner {
    event: SnackbarEvent,
    resolver: Mutex<Option<oneshot::Sender<SnackbarResult>>>,
}

impl DisplayedSnackbar {
    fn new(event: SnackbarEvent, resolver: oneshot::Sender<SnackbarResult>) -> Self {
        Self {
            inner: Arc::new(DisplayedInner {
                event,
                resolver: Mutex::new(Some(resolver)),
            }),
        }
    }

    /// The event being displayed.
    #[must_use]
    pub fn event(&self) -> &SnackbarEvent {
        &self.inner.event
    }

    /// The displayed event's identifier.
    #[must_use]
    pub fn id(&self) -> SnackbarId {
        self.inner.event.id()
    }

    /// Resolves this request as dismissed.
    ///
    /// No-op if already resolved.
    pub fn dismiss(&self) {
        if !self.resolve(SnackbarResult::Dismissed) {
            tracing::debug!(id = %self.id(), "dismiss ignored; request already resolved");
        }
    }

    /// Resolves this request as action-performed and runs the event's
    /// action callback.
    ///
    /// The resolve-once guard gates the callback too, so it runs exactly
    /// once no matter how many times this is called. No-op for events
    /// without an action and for already-resolved requests.
    pub fn perform_action(&self) {
        if !self.resolve(SnackbarResult::ActionPerformed) {
            tracing::debug!(id = %self.id(), "action ignored; request already resolved");
            return;
        }
        if let SnackbarEvent::Action { action, .. } = self.event() {
            action.invoke();
        }
    }

    /// Returns `true` if the resolution handle has already fired.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.lock_resolver().is_none()
    }

    /// Sends `result` if the handle is still pending. Returns whether
    /// this call performed the resolution.
    fn resolve(&self, result: SnackbarResult) -> bool {
        let Some(resolver) = self.lock_resolver().take() else {
            return false;
        };
        // A send error means the awaiting side is already gone
        // (cancelled); the request still counts as resolved.
        if resolver.send(result).is_err() {
            tracing::debug!(id = %self.id(), ?result, "resolution had no waiter");
        }
        true
    }

    /// Drops the handle without producing a result, so the awaiting side
    /// observes cancellation rather than a normal resolution.
    fn resolve_cancelled(&self) {
        if self.lock_resolver().take().is_some() {
            tracing::debug!(id = %self.id(), "snackbar cancelled");
        }
    }

    fn lock_resolver(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<SnackbarResult>>> {
        // Poisoning requires a panic inside one of the short take/inspect
        // sections above, none of which can panic.
        self.inner
            .resolver
            .lock()
            .expect("resolver mutex poisoned")
    }
}

impl PartialEq for DisplayedSnackbar {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for DisplayedSnackbar {}

/// Coordinator holding at most one displayed snackbar.
///
/// Clonable handle; all clones observe and mutate the same slot.
#[derive(Clone, Debug)]
pub struct SnackbarHostState {
    current: Arc<watch::Sender<Option<DisplayedSnackbar>>>,
}

impl SnackbarHostState {
    /// Creates an idle host with nothing showing.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
        }
    }

    /// The live request, or `None` when idle.
    #[must_use]
    pub fn current(&self) -> Option<DisplayedSnackbar> {
        self.current.borrow().clone()
    }

    /// Subscribes to changes of the displayed request.
    ///
    /// The rendering layer watches this to know what to draw; the gesture
    /// coordinator watches it to pick its anchor set.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayedSnackbar>> {
        self.current.subscribe()
    }

    /// Displays `event` and suspends until it resolves.
    ///
    /// Any request still showing is force-resolved as dismissed first.
    /// Returns how the new request resolved. If this future is dropped
    /// before resolution the slot is cleared and no result is produced.
    pub async fn show_snackbar(&self, event: SnackbarEvent) -> SnackbarResult {
        let (resolver, resolution) = oneshot::channel();
        let displayed = DisplayedSnackbar::new(event, resolver);
        tracing::debug!(id = %displayed.id(), "showing snackbar");

        let guard = ShowGuard {
            host: self.clone(),
            displayed: displayed.clone(),
            finished: false,
        };

        if let Some(superseded) = self.current.send_replace(Some(displayed)) {
            // The superseded caller resumes with Dismissed, never hangs.
            superseded.dismiss();
        }

        // Suspended here until dismiss/perform_action fires, or until this
        // future is dropped (guard handles the cleanup).
        let result = resolution.await.unwrap_or(SnackbarResult::Dismissed);
        guard.complete();
        result
    }

    /// Resolves the current request as dismissed.
    ///
    /// Ignored (at debug log level) when nothing is showing.
    pub fn dismiss(&self) {
        match self.current() {
            Some(displayed) => displayed.dismiss(),
            None => tracing::debug!("dismiss with nothing showing; ignoring"),
        }
    }

    /// Resolves the current request as action-performed.
    ///
    /// Ignored (at debug log level) when nothing is showing.
    pub fn perform_action(&self) {
        match self.current() {
            Some(displayed) => displayed.perform_action(),
            None => tracing::debug!("perform_action with nothing showing; ignoring"),
        }
    }

    /// Clears the slot if `displayed` is still the visible request.
    fn clear_if_current(&self, displayed: &DisplayedSnackbar) {
        self.current.send_if_modified(|current| {
            if current.as_ref() == Some(displayed) {
                *current = None;
                true
            } else {
                false
            }
        });
    }
}

impl Default for SnackbarHostState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cleanup for `show_snackbar`: returns the host to idle on both the
/// normal and the cancelled path, and records the cancellation when the
/// future is dropped mid-flight.
struct ShowGuard {
    host: SnackbarHostState,
    displayed: DisplayedSnackbar,
    finished: bool,
}

impl ShowGuard {
    fn complete(mut self) {
        self.finished = true;
        // Drop runs the shared cleanup.
    }
}

impl Drop for ShowGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.displayed.resolve_cancelled();
        }
        // Only this request's own slot is cleared; a superseding request
        // that already replaced it is left alone.
        self.host.clear_if_current(&self.displayed);
    }
}
