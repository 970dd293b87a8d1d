//! The "pre-seeded successor buffer" adapter from `state/state_manager.go`.
//!
//! A raw transition function has to build its entire successor set from
//! scratch, including re-adding the current state itself if stuttering is
//! possible — forget that and an otherwise-valid transition silently
//! produces an empty successor set, which the engine treats as a
//! programmer error (§7, §9). [`StateManager`] removes that foot-gun the
//! way `Managed` does in the Go source: the buffer callers append to
//! already contains the current state before the transition body runs.

/// Accumulates successor states for one transition evaluation, pre-seeded
/// with the current state so that a transition which changes nothing still
/// produces a valid (stutter) successor set.
pub struct StateManager<S> {
    current: S,
    successors: Vec<S>,
}

impl<S: Clone> StateManager<S> {
    fn new(current: S) -> Self {
        Self {
            successors: vec![current.clone()],
            current,
        }
    }

    /// The state this transition is being evaluated from.
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Add a successor state distinct from (or equal to) the current one.
    pub fn add(&mut self, state: S) {
        self.successors.push(state);
    }

    fn into_successors(self) -> Vec<S> {
        self.successors
    }
}

/// Wrap a transition body that takes a [`StateManager`] into a plain
/// `Fn(&S) -> Vec<S>` transition function, the shape
/// [`crate::engine::Checker`] expects (§4.4).
///
/// The wrapped body only needs to call [`StateManager::add`] for states
/// that differ from the current one; the stutter successor is already
/// present.
pub fn managed<S, F>(body: F) -> impl Fn(&S) -> Vec<S>
where
    S: Clone,
    F: Fn(&mut StateManager<S>),
{
    move |state: &S| {
        let mut manager = StateManager::new(state.clone());
        body(&mut manager);
        manager.into_successors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_starts_with_current_state() {
        let transition = managed(|_mgr: &mut StateManager<i32>| {
            // Intentionally adds nothing: pure stutter.
        });
        assert_eq!(transition(&5), vec![5]);
    }

    #[test]
    fn added_successors_follow_the_stutter() {
        let transition = managed(|mgr: &mut StateManager<i32>| {
            let n = *mgr.current();
            mgr.add(n + 1);
            mgr.add(n - 1);
        });
        assert_eq!(transition(&5), vec![5, 6, 4]);
    }

    #[test]
    fn current_reflects_the_state_being_expanded() {
        let transition = managed(|mgr: &mut StateManager<i32>| {
            assert_eq!(*mgr.current(), 10);
        });
        transition(&10);
    }
}
