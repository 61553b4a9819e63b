// SPDX-License-Identifier: MPL-2.0
//! Error types for the snackbar pipeline.
//!
//! The taxonomy is deliberately narrow: a dropped or superseded snackbar is
//! expected steady-state behavior, not an error, and redundant dismissals
//! are silently ignored. The only real failure is the event queue going
//! away underneath a running presenter.

use std::fmt;

/// Errors surfaced by the snackbar pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The event queue was dropped while the presenter was still running.
    EventsClosed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EventsClosed => write!(f, "snackbar event queue closed"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
