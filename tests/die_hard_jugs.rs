//! The "Die Hard" water jug puzzle (§8 scenario 1): a 3-gallon and a
//! 5-gallon jug, starting empty, must reach exactly 4 gallons in the
//! 5-gallon jug. Ported from `examples/die_hard_jugs/main.go`.

use reachcheck::state_manager::managed;
use reachcheck::violation::Violation;
use reachcheck::{Checker, NamedInvariant, NamedTransition};

const CAP_A: u8 = 3;
const CAP_B: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Jugs {
    a: u8,
    b: u8,
}

impl reachcheck::Fingerprint for Jugs {
    fn fingerprint(&self, hasher: &mut reachcheck::StateHasher) {
        hasher.field("A", &self.a).field("B", &self.b);
    }
}

fn jug_transitions() -> Vec<NamedTransition<Jugs>> {
    vec![
        NamedTransition::new(
            "FillA",
            managed(|mgr| {
                let s = *mgr.current();
                mgr.add(Jugs { a: CAP_A, b: s.b });
            }),
        ),
        NamedTransition::new(
            "FillB",
            managed(|mgr| {
                let s = *mgr.current();
                mgr.add(Jugs { a: s.a, b: CAP_B });
            }),
        ),
        NamedTransition::new(
            "EmptyA",
            managed(|mgr| {
                let s = *mgr.current();
                mgr.add(Jugs { a: 0, b: s.b });
            }),
        ),
        NamedTransition::new(
            "EmptyB",
            managed(|mgr| {
                let s = *mgr.current();
                mgr.add(Jugs { a: s.a, b: 0 });
            }),
        ),
        NamedTransition::new(
            "PourAIntoB",
            managed(|mgr| {
                let s = *mgr.current();
                let space = CAP_B - s.b;
                let moved = space.min(s.a);
                mgr.add(Jugs {
                    a: s.a - moved,
                    b: s.b + moved,
                });
            }),
        ),
        NamedTransition::new(
            "PourBIntoA",
            managed(|mgr| {
                let s = *mgr.current();
                let space = CAP_A - s.a;
                let moved = space.min(s.b);
                mgr.add(Jugs {
                    a: s.a + moved,
                    b: s.b - moved,
                });
            }),
        ),
    ]
}

#[test]
fn reaches_four_gallons_in_the_five_gallon_jug() {
    let initial = Jugs { a: 0, b: 0 };
    let result = Checker::new(vec![initial], jug_transitions()).run();

    let goal_hash = reachcheck::state_hash(&Jugs { a: 3, b: 4 });
    let found = result.graph.states().any(|(hash, _)| hash == goal_hash);
    assert!(found, "no reachable state had the 5-gallon jug at 4 gallons");
}

#[test]
fn capacities_are_never_exceeded() {
    let initial = Jugs { a: 0, b: 0 };
    let within_capacity = NamedInvariant::new("WithinCapacity", |s: &Jugs| {
        s.a <= CAP_A && s.b <= CAP_B
    });

    let result = Checker::new(vec![initial], jug_transitions())
        .with_invariants(vec![within_capacity])
        .run();

    assert!(result.passed());
}

#[test]
fn never_empty_is_a_violated_invariant() {
    let initial = Jugs { a: 0, b: 0 };
    let never_both_empty_after_start = NamedInvariant::new("NeverBothEmpty", |s: &Jugs| {
        !(s.a == 0 && s.b == 0)
    });

    let result = Checker::new(vec![initial], jug_transitions())
        .with_invariants(vec![never_both_empty_after_start])
        .run();

    // The initial state itself is both-empty, so this invariant fails
    // immediately with a trivial one-state witness path.
    assert!(!result.passed());
    let violation = result.violation.as_ref().unwrap();
    assert_eq!(violation.path().len(), 1);
}

#[test]
fn jug5_reaching_four_gallons_violates_an_invariant_with_a_witness_of_at_most_seven_states() {
    let initial = Jugs { a: 0, b: 0 };
    let jug5_not_four = NamedInvariant::new("Jug5NotFour", |s: &Jugs| s.b != 4);

    let result = Checker::new(vec![initial], jug_transitions())
        .with_invariants(vec![jug5_not_four])
        .run();

    assert!(!result.passed());
    let violation = result.violation.as_ref().unwrap();
    assert_eq!(violation.name(), "Jug5NotFour");
    assert!(violation.path().len() <= 7);

    match violation {
        Violation::Invariant(v) => assert_eq!(v.state, Jugs { a: 3, b: 4 }),
        Violation::Temporal(_) => panic!("expected an invariant violation"),
    }
}

#[test]
fn reaching_four_gallons_does_not_require_revisiting_start() {
    // Once 4 gallons is reached, the witness path length is bounded by the
    // number of pour/fill/empty steps the classic solution takes, not by
    // the full size of the reachable graph.
    let initial = Jugs { a: 0, b: 0 };
    let result = Checker::new(vec![initial], jug_transitions()).run();
    let goal_hash = reachcheck::state_hash(&Jugs { a: 3, b: 4 });
    assert!(result.graph.state(goal_hash).is_some());
    assert_eq!(result.graph.state(goal_hash), Some(&Jugs { a: 3, b: 4 }));
}
