//! Counterexample records produced by a failed check (§3, §7).
//!
//! A `Violation` is a normal result, not an error: the checker finished its
//! job and found that the specification under test is wrong. `Checker::run`
//! returns at most one of these, never as `Result::Err`.

use crate::hash::StateHash;

/// A named invariant was violated by a reachable state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "S: serde::Serialize + serde::de::DeserializeOwned"))]
pub struct InvariantViolation<S> {
    /// Name of the invariant that failed.
    pub invariant: String,
    /// The offending state.
    pub state: S,
    pub state_hash: StateHash,
    /// Path from the initial state to the offending one, inclusive.
    pub path: Vec<StateHash>,
}

/// A named temporal property failed to hold over some reachable path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "S: serde::Serialize + serde::de::DeserializeOwned"))]
pub struct TemporalViolation<S> {
    /// Name of the temporal property that failed.
    pub property: String,
    /// The witnessing path: a prefix reaching a state satisfying the
    /// target condition, followed by the sub-path for which the condition
    /// did not continue to hold. A lasso witness closes back onto an
    /// earlier index in `path`; `cycle_closes_at` names that index.
    pub path: Vec<StateHash>,
    /// States along `path`, same length and order as `path`.
    pub states: Vec<S>,
    /// If the witness is a lasso (the path revisits an earlier state),
    /// the index in `path` it closes back to.
    pub cycle_closes_at: Option<usize>,
}

/// Either failure class a completed run can report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "S: serde::Serialize + serde::de::DeserializeOwned"))]
pub enum Violation<S> {
    Invariant(InvariantViolation<S>),
    Temporal(TemporalViolation<S>),
}

impl<S> Violation<S> {
    /// Name of the invariant or property this violation is about.
    pub fn name(&self) -> &str {
        match self {
            Violation::Invariant(v) => &v.invariant,
            Violation::Temporal(v) => &v.property,
        }
    }

    /// The witnessing path of state hashes, from the initial state.
    pub fn path(&self) -> &[StateHash] {
        match self {
            Violation::Invariant(v) => &v.path,
            Violation::Temporal(v) => &v.path,
        }
    }
}
