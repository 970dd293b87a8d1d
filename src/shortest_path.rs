//! Unweighted shortest path over the reachable-state graph.
//!
//! This mirrors `shortestpath/shortest_path.go`: Dijkstra with every edge
//! weighted `1`, which on an unweighted graph degenerates to BFS but keeps
//! the same predecessor-relaxation structure the Go source uses. A
//! [`std::collections::BinaryHeap`] of `Reverse<(distance, node)>` pairs
//! stands in for the Go source's heap package usage.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::hash::StateHash;

/// Find the shortest path from `start` to `target` in a graph described by
/// `neighbors`. Returns the sequence of hashes from `start` to `target`
/// inclusive, or `None` if `target` is unreachable from `start`.
///
/// `neighbors` is called once per node popped off the frontier; it must
/// return every hash directly reachable from the given hash via a single
/// recorded edge (stutter edges included — this function has no opinion on
/// filtering, callers decide that by how they implement `neighbors`).
pub fn find<F, I>(start: StateHash, target: StateHash, mut neighbors: F) -> Option<Vec<StateHash>>
where
    F: FnMut(StateHash) -> I,
    I: IntoIterator<Item = StateHash>,
{
    if start == target {
        return Some(vec![start]);
    }

    let mut dist: HashMap<StateHash, u64> = HashMap::new();
    let mut prev: HashMap<StateHash, StateHash> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(u64, StateHash)>> = BinaryHeap::new();

    dist.insert(start, 0);
    heap.push(Reverse((0, start)));

    while let Some(Reverse((d, node))) = heap.pop() {
        if d > *dist.get(&node).unwrap_or(&u64::MAX) {
            continue;
        }
        if node == target {
            return Some(reconstruct(start, target, &prev));
        }
        for next in neighbors(node) {
            let candidate = d + 1;
            let better = match dist.get(&next) {
                Some(&known) => candidate < known,
                None => true,
            };
            if better {
                dist.insert(next, candidate);
                prev.insert(next, node);
                heap.push(Reverse((candidate, next)));
            }
        }
    }

    None
}

fn reconstruct(
    start: StateHash,
    target: StateHash,
    prev: &HashMap<StateHash, StateHash>,
) -> Vec<StateHash> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = prev[&current];
        path.push(current);
    }
    path.reverse();
    path
}
