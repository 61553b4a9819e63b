// SPDX-License-Identifier: MPL-2.0
//! Event queue accepting snackbar requests from anywhere in the
//! application.
//!
//! The controller is a latest-value queue with a pending capacity of
//! exactly one: a push that arrives before the previous pending event has
//! been picked up replaces it. Consumers never see history, only the most
//! recent value. An event that has already been picked up and displayed
//! is unaffected by later pushes; it is replaced through the presenter's
//! supersede flow instead.
//!
//! Unlike a global singleton, a controller is an explicitly constructed
//! value. Clone it freely; all clones feed the same queue.

use crate::event::SnackbarEvent;
use std::sync::Arc;
use tokio::sync::watch;

/// Clonable handle for queueing snackbar events.
#[derive(Clone, Debug)]
pub struct SnackbarController {
    events: Arc<watch::Sender<Option<SnackbarEvent>>>,
}

impl SnackbarController {
    /// Creates a new controller with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = watch::channel(None);
        Self {
            events: Arc::new(events),
        }
    }

    /// Queues an event for eventual display.
    ///
    /// Never blocks and is safe to call from any thread. If an earlier
    /// event is still waiting to be picked up, the new one replaces it
    /// (most-recent-wins).
    pub fn push_event(&self, event: SnackbarEvent) {
        tracing::debug!(id = %event.id(), "queueing snackbar event");
        self.events.send_replace(Some(event));
    }

    /// Subscribes to the queue's latest value.
    ///
    /// The receiver observes only the most recent pending event; values
    /// replaced before being read are gone for good.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<SnackbarEvent>> {
        self.events.subscribe()
    }
}

impl Default for SnackbarController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Icon, SnackbarDuration};

    fn message(text: &str) -> SnackbarEvent {
        SnackbarEvent::message(text, Icon::new("info"), SnackbarDuration::Short)
    }

    #[test]
    fn subscriber_sees_latest_push() {
        let controller = SnackbarController::new();
        let rx = controller.subscribe();

        controller.push_event(message("first"));
        controller.push_event(message("second"));

        let pending = rx.borrow().clone().expect("an event should be pending");
        assert_eq!(pending.text(), "second");
    }

    #[test]
    fn queue_starts_empty() {
        let controller = SnackbarController::new();
        assert!(controller.subscribe().borrow().is_none());
    }

    #[test]
    fn clones_feed_the_same_queue() {
        let controller = SnackbarController::new();
        let alias = controller.clone();
        let rx = controller.subscribe();

        alias.push_event(message("from alias"));

        let pending = rx.borrow().clone().expect("an event should be pending");
        assert_eq!(pending.text(), "from alias");
    }

    #[tokio::test]
    async fn changed_fires_for_new_pushes() {
        let controller = SnackbarController::new();
        let mut rx = controller.subscribe();

        controller.push_event(message("ping"));

        rx.changed().await.expect("sender is alive");
        assert!(rx.borrow_and_update().is_some());
    }

    #[test]
    fn push_is_safe_across_threads() {
        let controller = SnackbarController::new();
        let rx = controller.subscribe();

        let worker = {
            let controller = controller.clone();
            std::thread::spawn(move || {
                controller.push_event(message("from worker thread"));
            })
        };
        worker.join().expect("worker thread should finish");

        let pending = rx.borrow().clone().expect("an event should be pending");
        assert_eq!(pending.text(), "from worker thread");
    }
}
