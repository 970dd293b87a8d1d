//! Temporal property checking: "eventually always" a condition holds
//! (§4.5), the one temporal operator this crate implements
//! (`ReachesAndStays`).
//!
//! A property is a pair of predicates, `initial` and `terminal` (§6's
//! external interface). The checker runs its DFS starting from *every*
//! state in the graph satisfying `initial` — not just the checker's own
//! root states — and, along every finished path from such a start, asks
//! only about the path's eventual behaviour:
//!
//! - **No cycle** (the path ends at a sink, a state with no outgoing
//!   non-stutter edge): only the *final* vertex must satisfy `terminal`.
//! - **Cycle closing at index `k`**: every vertex at positions `[k,
//!   len-1]` (the repeating part) must satisfy `terminal`. Positions
//!   before `k` are a transient stem and are exempt — they need not
//!   satisfy `terminal`.
//!
//! Grounded in `temporal.go`'s `onEveryFinishedPath` / cycle-detecting
//! traversal, restructured into an explicit-stack DFS per §9's design note
//! that native recursion is unsuitable for state graphs of unbounded
//! depth. Stutter (self-loop) edges are filtered out of the traversal
//! here, on the fly, from the unfiltered [`crate::graph::StateGraph`] —
//! the graph itself always keeps them (§9).

use std::rc::Rc;

use crate::graph::StateGraph;
use crate::hash::{Fingerprint, StateHash};
use crate::violation::TemporalViolation;

/// A named, reusable predicate over a state.
#[derive(Clone)]
pub struct StateCondition<S> {
    name: String,
    predicate: Rc<dyn Fn(&S) -> bool>,
}

impl<S> StateCondition<S> {
    /// Build a condition from a name and a predicate.
    pub fn new(name: impl Into<String>, predicate: impl Fn(&S) -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Rc::new(predicate),
        }
    }

    /// Name this condition was constructed with.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn holds(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

/// Negate a condition, naming the result `not(<name>)`.
pub fn not<S: 'static>(cond: StateCondition<S>) -> StateCondition<S> {
    let name = format!("not({})", cond.name);
    StateCondition {
        name,
        predicate: Rc::new(move |s: &S| !cond.holds(s)),
    }
}

/// A condition that holds exactly when a state's fingerprint equals that of
/// a fixed target value. Compares by [`StateHash`] rather than requiring
/// `S: PartialEq` (§11): the target is hashed once up front. This is the
/// `StateEquals` combinator from the external interface (§6), typically
/// used to build the `initial` predicate of a [`NamedTemporalProperty`]
/// that should start its search from one specific state.
pub fn state_equals<S>(name: impl Into<String>, target: S) -> StateCondition<S>
where
    S: Fingerprint + 'static,
{
    let target_hash = crate::hash::state_hash(&target);
    StateCondition {
        name: name.into(),
        predicate: Rc::new(move |s: &S| crate::hash::state_hash(s) == target_hash),
    }
}

/// A named `ReachesAndStays` temporal property (§6): the DFS starts at
/// every state satisfying `initial`, anywhere in the graph, and every
/// finished path from such a state must eventually always satisfy
/// `terminal`.
pub struct NamedTemporalProperty<S> {
    pub name: String,
    pub initial: StateCondition<S>,
    pub terminal: StateCondition<S>,
}

impl<S> NamedTemporalProperty<S> {
    pub fn new(name: impl Into<String>, initial: StateCondition<S>, terminal: StateCondition<S>) -> Self {
        Self {
            name: name.into(),
            initial,
            terminal,
        }
    }
}

struct Frame {
    neighbors: std::vec::IntoIter<StateHash>,
}

/// Evaluate one `ReachesAndStays` property against the full graph, running
/// a DFS from every state satisfying `property.initial`. Returns the first
/// counterexample path found, or `None` if the property holds from every
/// matching start.
pub fn reaches_and_stays<S: Clone>(
    graph: &StateGraph<S>,
    property: &NamedTemporalProperty<S>,
) -> Option<TemporalViolation<S>> {
    for (hash, state) in graph.states() {
        if property.initial.holds(state) {
            if let Some(v) = search_from(graph, hash, property) {
                return Some(v);
            }
        }
    }
    None
}

/// Evaluate every supplied temporal property, returning one violation per
/// property that fails.
pub fn check<S: Clone>(
    graph: &StateGraph<S>,
    properties: &[NamedTemporalProperty<S>],
) -> Vec<TemporalViolation<S>> {
    properties
        .iter()
        .filter_map(|p| reaches_and_stays(graph, p))
        .collect()
}

fn non_stutter_neighbors<S>(graph: &StateGraph<S>, hash: StateHash) -> Vec<StateHash> {
    graph.non_stutter_edges_from(hash).map(|e| e.to).collect()
}

fn search_from<S: Clone>(
    graph: &StateGraph<S>,
    start: StateHash,
    property: &NamedTemporalProperty<S>,
) -> Option<TemporalViolation<S>> {
    if graph.state(start).is_none() {
        return None;
    }

    let mut path: Vec<StateHash> = vec![start];
    let mut stack: Vec<Frame> = vec![Frame {
        neighbors: non_stutter_neighbors(graph, start).into_iter(),
    }];

    loop {
        let next = stack.last_mut().unwrap().neighbors.next();
        match next {
            None => {
                // Sink: the current path is finished, no cycle.
                if let Some(v) = evaluate(graph, &path, None, property) {
                    return Some(v);
                }
                stack.pop();
                path.pop();
                if stack.is_empty() {
                    return None;
                }
            }
            Some(n) => {
                if let Some(idx) = path.iter().position(|&h| h == n) {
                    // Lasso: path + [n] closes back onto path[idx].
                    let mut full_path = path.clone();
                    full_path.push(n);
                    if let Some(v) = evaluate(graph, &full_path, Some(idx), property) {
                        return Some(v);
                    }
                    // Continue exploring sibling neighbors of the current frame.
                } else {
                    path.push(n);
                    stack.push(Frame {
                        neighbors: non_stutter_neighbors(graph, n).into_iter(),
                    });
                }
            }
        }
    }
}

/// Check one finished path (`path`, possibly a lasso closing at
/// `cycle_closes_at`) against `property`. With no cycle, only the final
/// vertex must satisfy `terminal`; with a cycle closing at `k`, every
/// vertex at `[k, path.len()-1]` must (the stem before `k` is exempt).
fn evaluate<S: Clone>(
    graph: &StateGraph<S>,
    path: &[StateHash],
    cycle_closes_at: Option<usize>,
    property: &NamedTemporalProperty<S>,
) -> Option<TemporalViolation<S>> {
    let range_start = cycle_closes_at.unwrap_or(path.len() - 1);

    for i in range_start..path.len() {
        let state = graph.state(path[i]).unwrap();
        if !property.terminal.holds(state) {
            let witness_path = path[..=i].to_vec();
            let states: Vec<S> = witness_path
                .iter()
                .map(|h| graph.state(*h).unwrap().clone())
                .collect();
            let closes_at = cycle_closes_at.filter(|&c| c <= i);
            return Some(TemporalViolation {
                property: property.name.clone(),
                path: witness_path,
                states,
                cycle_closes_at: closes_at,
            });
        }
    }

    None
}
