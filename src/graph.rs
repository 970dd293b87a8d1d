//! The reachable-state graph produced by a completed run (§3).

use std::collections::HashMap;

use crate::hash::StateHash;

/// One recorded edge: a named transition from one state hash to another.
/// Self-loops (`from == to`) are stutter edges and are always present in
/// the graph — only [`crate::temporal::reaches_and_stays`] filters them,
/// and only for its own traversal (§9).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: StateHash,
    pub to: StateHash,
    pub transition: String,
}

/// The full reachable-state graph: every state discovered during a run,
/// keyed by its hash, and every edge between them.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "S: serde::Serialize + serde::de::DeserializeOwned"))]
pub struct StateGraph<S> {
    states: HashMap<StateHash, S>,
    edges: Vec<Edge>,
}

impl<S> StateGraph<S> {
    pub(crate) fn new(states: HashMap<StateHash, S>, edges: Vec<Edge>) -> Self {
        Self { states, edges }
    }

    /// Total number of distinct states discovered.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Total number of recorded edges (including stutter self-loops).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Look up the state value recorded for a hash, if any.
    pub fn state(&self, hash: StateHash) -> Option<&S> {
        self.states.get(&hash)
    }

    /// Iterate over every discovered `(hash, state)` pair.
    pub fn states(&self) -> impl Iterator<Item = (StateHash, &S)> {
        self.states.iter().map(|(h, s)| (*h, s))
    }

    /// Iterate over every recorded edge, stutter edges included.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Every edge originating at `hash`, stutter edges included.
    pub fn edges_from(&self, hash: StateHash) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == hash)
    }

    /// Every non-stutter edge originating at `hash` — the view
    /// [`crate::temporal::reaches_and_stays`] traverses.
    pub fn non_stutter_edges_from(&self, hash: StateHash) -> impl Iterator<Item = &Edge> {
        self.edges_from(hash).filter(|e| e.from != e.to)
    }
}
