//! The reachability engine: worklist-driven construction of the full state
//! graph, invariant checking per newly-discovered state, and temporal
//! property evaluation once the graph is complete (§4.4, §6).
//!
//! Grounded in `state.go`'s `Checker.Run`/`runTransitions`: a FIFO backlog
//! of hashes to expand, a map from hash to state value, and a map from hash
//! to recorded edges. This crate splits those last two into
//! [`crate::graph::StateGraph`]'s `states`/`edges` fields, built once the
//! worklist drains, since `StateGraph` is otherwise an immutable snapshot
//! (§3).

use std::collections::{HashMap, VecDeque};

use crate::error::CheckerError;
use crate::graph::{Edge, StateGraph};
use crate::hash::{state_hash, Fingerprint, StateHash};
use crate::temporal::{self, NamedTemporalProperty};
use crate::violation::{InvariantViolation, Violation};

/// A named state-transition function: given the current state, produce
/// every successor state it can lead to in one step. Transitions built with
/// [`crate::state_manager::managed`] can never return an empty set; raw
/// transitions that do trigger [`CheckerError::EmptySuccessorSet`] (§7, §9).
pub struct NamedTransition<S> {
    pub name: String,
    function: Box<dyn Fn(&S) -> Vec<S>>,
}

impl<S> NamedTransition<S> {
    pub fn new(name: impl Into<String>, function: impl Fn(&S) -> Vec<S> + 'static) -> Self {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }
}

/// A named invariant: a predicate every reachable state must satisfy.
pub struct NamedInvariant<S> {
    pub name: String,
    predicate: Box<dyn Fn(&S) -> bool>,
}

impl<S> NamedInvariant<S> {
    pub fn new(name: impl Into<String>, predicate: impl Fn(&S) -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }
}

/// The outcome of a completed run: the reachable-state graph, and at most
/// one violation (§6: `run() -> (StateGraph, optional Violation)`). An
/// invariant violation stops the reachability worklist immediately, so the
/// graph is a partial snapshot up to the point of failure; a temporal
/// violation is only ever reported once reachability has completed with no
/// invariant violation (§4.4 step d, §6).
pub struct CheckResult<S> {
    pub graph: StateGraph<S>,
    pub violation: Option<Violation<S>>,
}

impl<S> CheckResult<S> {
    /// Whether every invariant and temporal property held over the whole
    /// reachable state space.
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// Builds and runs an explicit-state check of a finite-state specification.
///
/// Construction requires at least one named transition (§6); supplying none
/// panics with [`CheckerError::NoTransitions`], since a checker with no
/// transitions can never discover anything beyond the initial states.
pub struct Checker<S> {
    initial_states: Vec<S>,
    transitions: Vec<NamedTransition<S>>,
    invariants: Vec<NamedInvariant<S>>,
    temporal_properties: Vec<NamedTemporalProperty<S>>,
}

impl<S> Checker<S>
where
    S: Fingerprint + Clone,
{
    /// Build a checker over the given initial states and transitions.
    ///
    /// # Panics
    ///
    /// Panics with [`CheckerError::NoTransitions`] if `transitions` is
    /// empty.
    pub fn new(initial_states: Vec<S>, transitions: Vec<NamedTransition<S>>) -> Self {
        if transitions.is_empty() {
            panic!("{}", CheckerError::NoTransitions);
        }
        Self {
            initial_states,
            transitions,
            invariants: Vec::new(),
            temporal_properties: Vec::new(),
        }
    }

    /// Attach invariants to check against every reachable state.
    pub fn with_invariants(mut self, invariants: Vec<NamedInvariant<S>>) -> Self {
        self.invariants = invariants;
        self
    }

    /// Attach temporal properties to evaluate once the state graph is
    /// fully built.
    pub fn with_temporal_properties(mut self, properties: Vec<NamedTemporalProperty<S>>) -> Self {
        self.temporal_properties = properties;
        self
    }

    /// Run the worklist, checking invariants as states are discovered.
    /// On the first invariant violation the worklist stops immediately and
    /// the (partial) graph is returned alongside that violation; temporal
    /// properties are evaluated only once reachability completes with no
    /// invariant violation (§4.4 step d, §6).
    pub fn run(&self) -> CheckResult<S> {
        let mut states: HashMap<StateHash, S> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut backlog: VecDeque<StateHash> = VecDeque::new();
        let mut invariant_hit: Option<(String, StateHash)> = None;

        let initial_hashes: Vec<StateHash> = self.initial_states.iter().map(state_hash).collect();
        let witness_start = initial_hashes.first().copied();

        'initial: for initial in &self.initial_states {
            let hash = state_hash(initial);
            if states.contains_key(&hash) {
                continue;
            }
            for inv in &self.invariants {
                if !(inv.predicate)(initial) {
                    invariant_hit = Some((inv.name.clone(), hash));
                    states.insert(hash, initial.clone());
                    break 'initial;
                }
            }
            states.insert(hash, initial.clone());
            backlog.push_back(hash);
        }

        'reachability: while invariant_hit.is_none() {
            let hash = match backlog.pop_front() {
                Some(h) => h,
                None => break 'reachability,
            };
            let current = match states.get(&hash) {
                Some(state) => state.clone(),
                None => panic!("{}", CheckerError::dangling_backlog_entry(hash.0)),
            };

            for transition in &self.transitions {
                let successors = (transition.function)(&current);
                if successors.is_empty() {
                    panic!(
                        "{}",
                        CheckerError::empty_successor_set(transition.name.clone())
                    );
                }

                for successor in successors {
                    let successor_hash = state_hash(&successor);
                    edges.push(Edge {
                        from: hash,
                        to: successor_hash,
                        transition: transition.name.clone(),
                    });

                    if states.contains_key(&successor_hash) {
                        continue;
                    }

                    let mut hit = None;
                    for inv in &self.invariants {
                        if !(inv.predicate)(&successor) {
                            hit = Some((inv.name.clone(), successor_hash));
                            break;
                        }
                    }

                    states.insert(successor_hash, successor);

                    if let Some(h) = hit {
                        invariant_hit = Some(h);
                        break 'reachability;
                    }

                    backlog.push_back(successor_hash);
                }
            }
        }

        let graph = StateGraph::new(states, edges);

        if let Some((invariant_name, hash)) = invariant_hit {
            let path = witness_start
                .and_then(|start| {
                    crate::shortest_path::find(start, hash, |h| {
                        graph.edges_from(h).map(|e| e.to).collect::<Vec<_>>()
                    })
                })
                .unwrap_or_else(|| vec![hash]);
            let state = graph
                .state(hash)
                .expect("invariant hits always name a discovered state")
                .clone();
            let violation = Violation::Invariant(InvariantViolation {
                invariant: invariant_name,
                state,
                state_hash: hash,
                path,
            });
            return CheckResult {
                graph,
                violation: Some(violation),
            };
        }

        let violation = temporal::check(&graph, &self.temporal_properties)
            .into_iter()
            .next()
            .map(Violation::Temporal);

        CheckResult { graph, violation }
    }
}
