// SPDX-License-Identifier: MPL-2.0
//! Observable value cells shared between event producers and the UI.
//!
//! Events like `Loading` and `Progress` carry fields that keep changing
//! while the snackbar is on screen (the loading flag, the progress
//! percentage, the body line). `Observable<T>` is the explicit
//! state-plus-notification container for those fields: the producer keeps
//! one handle and writes to it, the rendering layer subscribes and
//! re-renders on change.

use std::sync::Arc;
use tokio::sync::watch;

/// A shared, observable value.
///
/// Cloning an `Observable` clones the handle, not the value: all clones
/// read and write the same underlying cell. Writes are visible to every
/// subscriber; subscribers only ever observe the latest value.
#[derive(Debug)]
pub struct Observable<T> {
    cell: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Observable<T> {
    /// Creates a new observable holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (cell, _) = watch::channel(initial);
        Self {
            cell: Arc::new(cell),
        }
    }

    /// Replaces the value and notifies all subscribers.
    pub fn set(&self, value: T) {
        self.cell.send_replace(value);
    }

    /// Subscribes to value changes.
    ///
    /// The receiver starts out with the current value already marked as
    /// seen; use [`watch::Receiver::borrow`] to read it immediately.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.cell.subscribe()
    }

    /// Waits until the value satisfies `predicate`.
    ///
    /// Returns immediately if the current value already satisfies it.
    pub async fn wait_until(&self, predicate: impl FnMut(&T) -> bool) {
        let mut rx = self.cell.subscribe();
        // The sender lives inside `self`, so the channel cannot close
        // while this borrow is held.
        let _ = rx.wait_for(predicate).await;
    }

    /// Returns `true` if both handles point at the same cell.
    #[must_use]
    pub fn same_cell(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> Observable<T> {
    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
