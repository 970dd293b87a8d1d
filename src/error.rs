//! Programmer-error diagnostics for the checker.
//!
//! These are never returned from [`crate::engine::Checker::run`] — per the
//! error model, a failing invariant or temporal property is a
//! [`crate::violation::Violation`], a normal result, not an error. A
//! `CheckerError` only ever appears in a `panic!` message: it names a
//! misuse of the API or an internal inconsistency the run cannot recover
//! from.

use thiserror::Error;

/// Unrecoverable misuse of the checker, or an internal inconsistency.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    #[error("checker requires at least one named transition")]
    NoTransitions,

    #[error("transition {transition:?} produced no successor states")]
    EmptySuccessorSet { transition: String },

    #[error("internal inconsistency: backlog references hash {hash} with no corresponding state")]
    DanglingBacklogEntry { hash: u64 },
}

impl CheckerError {
    /// Construct the "empty successor set" variant.
    pub fn empty_successor_set(transition: impl Into<String>) -> Self {
        Self::EmptySuccessorSet {
            transition: transition.into(),
        }
    }

    /// Construct the "dangling backlog entry" variant.
    pub fn dangling_backlog_entry(hash: u64) -> Self {
        Self::DanglingBacklogEntry { hash }
    }
}
