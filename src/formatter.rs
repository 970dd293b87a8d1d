//! Human-readable rendering of a [`Violation`] (§4.6).
//!
//! Grounded in `state.go`'s `Violation.String()`: walk the witness path
//! state by state, naming the transition that produced each step by
//! scanning the graph's recorded edges for one whose endpoints match, and
//! mark the point a lasso closes back on an earlier step.

use crate::graph::StateGraph;
use crate::hash::StateHash;
use crate::violation::Violation;

/// Formats violations against a specific [`StateGraph`], so it can look up
/// the transition name for each step of a witness path.
pub struct ViolationFormatter<'a, S> {
    graph: &'a StateGraph<S>,
}

impl<'a, S> ViolationFormatter<'a, S> {
    pub fn new(graph: &'a StateGraph<S>) -> Self {
        Self { graph }
    }

    /// Render a violation as a multi-line witness trace.
    pub fn format(&self, violation: &Violation<S>) -> String
    where
        S: std::fmt::Debug,
    {
        match violation {
            Violation::Invariant(v) => {
                let mut out = format!("invariant \"{}\" violated\n", v.invariant);
                self.append_path(&mut out, &v.path, None);
                out
            }
            Violation::Temporal(v) => {
                let mut out = format!("temporal property \"{}\" violated\n", v.property);
                self.append_path(&mut out, &v.path, v.cycle_closes_at);
                out
            }
        }
    }

    fn append_path(&self, out: &mut String, path: &[StateHash], cycle_closes_at: Option<usize>)
    where
        S: std::fmt::Debug,
    {
        for (i, &hash) in path.iter().enumerate() {
            let state = self.graph.state(hash);
            match state {
                Some(s) => out.push_str(&format!("  {}: {:?}\n", i, s)),
                None => out.push_str(&format!("  {}: <unknown state {}>\n", i, hash)),
            }
            if i + 1 < path.len() {
                let transition = self
                    .find_transition(hash, path[i + 1])
                    .unwrap_or("<unknown transition>");
                out.push_str(&format!("    -- {} -->\n", transition));
            }
            if cycle_closes_at == Some(i) && i + 1 == path.len() {
                out.push_str(&format!("  (back to {})\n", i));
            }
        }
    }

    /// Find the name of a recorded edge from `from` to `to`, if any. When
    /// several transitions produce the same edge, the first one recorded
    /// wins.
    pub fn find_transition(&self, from: StateHash, to: StateHash) -> Option<&str> {
        self.graph
            .edges_from(from)
            .find(|e| e.to == to)
            .map(|e| e.transition.as_str())
    }
}
