// SPDX-License-Identifier: MPL-2.0
//! Presentation loop driving the host from the controller's queue.
//!
//! The loop owns entry sequencing only: each time the queue's latest
//! value changes, the currently visible snackbar is force-dismissed, a
//! short grace interval lets its exit animation finish, and the new event
//! is shown without awaiting its resolution. User-facing resolution
//! (dismiss, action, drag) happens elsewhere; blocking the loop on it
//! would stall the queue.
//!
//! A second watcher auto-dismisses requests: finite-duration messages
//! after their declared duration, loading and progress snackbars a fixed
//! linger after their work completes.
//!
//! Both loops run under the host UI's visible lifetime. While the UI is
//! backgrounded the presenter stops processing and aborts the in-flight
//! show; on return to the foreground it re-presents the single buffered
//! latest value. Tearing the tasks down cancels every pending suspension,
//! so no event is ever left stuck.

use crate::config::SnackbarConfig;
use crate::controller::SnackbarController;
use crate::error::{Error, Result};
use crate::event::SnackbarEvent;
use crate::host::{DisplayedSnackbar, SnackbarHostState};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::sleep;

/// Sequences queue events into the host's single visible slot.
#[derive(Debug)]
pub struct SnackbarPresenter {
    host: SnackbarHostState,
    events: watch::Receiver<Option<SnackbarEvent>>,
    visibility: watch::Receiver<bool>,
    config: SnackbarConfig,
}

impl SnackbarPresenter {
    /// Creates a presenter feeding `host` from `controller`.
    ///
    /// `visibility` gates processing: the presenter only runs while it
    /// holds `true`. Pass a receiver that is always `true` when there is
    /// no lifecycle to track.
    #[must_use]
    pub fn new(
        host: SnackbarHostState,
        controller: &SnackbarController,
        visibility: watch::Receiver<bool>,
        config: SnackbarConfig,
    ) -> Self {
        Self {
            host,
            events: controller.subscribe(),
            visibility,
            config,
        }
    }

    /// Runs the entry-sequencing loop until the queue closes
    /// (`Error::EventsClosed`) or the visibility gate is dropped (normal
    /// teardown).
    pub async fn run(mut self) -> Result<()> {
        let mut shows = JoinSet::new();
        loop {
            if !*self.visibility.borrow() {
                // Backgrounded: cancel the in-flight show (its caller
                // cleans up via cancellation) and re-flag the latest
                // value so it re-presents on resume.
                shows.abort_all();
                self.events.mark_changed();
                if self.visibility.wait_for(|visible| *visible).await.is_err() {
                    return Ok(());
                }
            }

            let next = self.events.borrow_and_update().clone();
            if let Some(event) = next {
                self.present(event, &mut shows).await?;
            }

            tokio::select! {
                res = self.events.changed() => {
                    if res.is_err() {
                        return Err(Error::EventsClosed);
                    }
                }
                res = self.visibility.changed() => {
                    if res.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Swaps the visible snackbar for `event`: force-dismiss, grace
    /// interval, show. A newer event arriving during the grace interval
    /// restarts the swap, so the stale event is never shown.
    async fn present(&mut self, mut event: SnackbarEvent, shows: &mut JoinSet<()>) -> Result<()> {
        loop {
            self.host.dismiss();

            tokio::select! {
                () = sleep(self.config.grace_delay()) => {}
                res = self.events.changed() => {
                    res.map_err(|_| Error::EventsClosed)?;
                    if let Some(newer) = self.events.borrow_and_update().clone() {
                        tracing::debug!(
                            stale = %event.id(),
                            fresh = %newer.id(),
                            "newer event arrived during grace interval"
                        );
                        event = newer;
                    }
                    continue;
                }
                res = self.visibility.changed() => {
                    if res.is_err() {
                        return Ok(());
                    }
                    if !*self.visibility.borrow() {
                        // Backgrounded mid-swap; re-present on resume.
                        self.events.mark_changed();
                        return Ok(());
                    }
                    continue;
                }
            }

            shows.abort_all();
            while shows.try_join_next().is_some() {}

            let host = self.host.clone();
            shows.spawn(async move {
                // The loop only sequences entries; resolution is driven
                // by the UI, the watchers, or the next supersession.
                let _ = host.show_snackbar(event).await;
            });
            return Ok(());
        }
    }

    /// Watches the displayed request and dismisses it when its time is
    /// up.
    ///
    /// Finite-duration messages expire after `to_millis`; loading and
    /// progress snackbars linger briefly after their work completes. The
    /// timer is dropped whenever the displayed request changes, so it can
    /// never dismiss a successor by mistake.
    pub async fn run_duration_watcher(host: SnackbarHostState, config: SnackbarConfig) {
        let mut current = host.subscribe();
        loop {
            let displayed = current.borrow_and_update().clone();
            match displayed {
                Some(displayed) => {
                    tokio::select! {
                        () = Self::expiry(&displayed, &config) => {
                            tracing::debug!(id = %displayed.id(), "auto-dismissing snackbar");
                            displayed.dismiss();
                            if current.changed().await.is_err() {
                                return;
                            }
                        }
                        res = current.changed() => {
                            if res.is_err() {
                                return;
                            }
                        }
                    }
                }
                None => {
                    if current.changed().await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Completes when `displayed` should be auto-dismissed; pends forever
    /// for requests that only resolve through user interaction.
    async fn expiry(displayed: &DisplayedSnackbar, config: &SnackbarConfig) {
        match displayed.event() {
            SnackbarEvent::Message { duration, .. } if !duration.is_indefinite() => {
                sleep(Duration::from_millis(duration.to_millis())).await;
            }
            SnackbarEvent::Loading { is_loading, .. } => loop {
                is_loading.wait_until(|loading| !*loading).await;
                tokio::select! {
                    () = sleep(config.completion_dismiss_delay()) => return,
                    // The operation came back to life; keep showing.
                    () = is_loading.wait_until(|loading| *loading) => {}
                }
            },
            SnackbarEvent::Progress { percentage, .. } => loop {
                percentage.wait_until(|fraction| *fraction >= 1.0).await;
                tokio::select! {
                    () = sleep(config.completion_dismiss_delay()) => return,
                    () = percentage.wait_until(|fraction| *fraction < 1.0) => {}
                }
            },
            _ => std::future::pending().await,
        }
    }
}
