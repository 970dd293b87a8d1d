//! Deterministic, order-sensitive fingerprinting of opaque state values.
//!
//! The Go program this checker is modelled after leans on
//! `mitchellh/hashstructure`, which uses reflection over a struct's fields
//! (skipping unexported ones, honouring a `hash:"set"` tag for
//! order-insensitive sequences) to compute a 64-bit digest. Rust has no
//! runtime reflection, so [`Fingerprint`] makes that same contract
//! explicit: a state type writes its own fields into a [`StateHasher`], in
//! declaration order, naming each one. The result is the same four
//! properties the Go source guarantees (§4.1 of the spec):
//!
//! - field order matters (the order `.field()` is called in);
//! - field *names* matter (the name is hashed alongside the value, so two
//!   differently-named fields with identical values hash differently);
//! - fields a `Fingerprint` impl never calls `.field()` for are excluded,
//!   the equivalent of skipping unexported struct fields;
//! - sequences are ordered by default ([`StateHasher::ordered`]) and can
//!   opt into unordered/multiset hashing with [`StateHasher::unordered`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A 64-bit fingerprint of a state value.
///
/// Within a single process run, the mapping from state value to
/// `StateHash` is treated as injective (§3): two values that hash equal are
/// treated as the same state. `DefaultHasher` is deterministic across runs
/// of the same binary (its keys are fixed, not randomized — that
/// randomization lives in `RandomState`, one layer up), so a given state
/// value always fingerprints to the same `StateHash` within a process, as
/// required; stability across different builds of the crate is explicitly
/// not guaranteed (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateHash(pub u64);

impl std::fmt::Display for StateHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A builder state values write themselves into to produce a [`StateHash`].
///
/// Every method takes a field name so that two structurally-identical
/// layouts with differently-named fields never collide.
pub struct StateHasher {
    inner: DefaultHasher,
}

impl StateHasher {
    fn new() -> Self {
        Self {
            inner: DefaultHasher::new(),
        }
    }

    /// Mix a named field into the fingerprint. Call order is significant.
    pub fn field(&mut self, name: &str, value: &impl Fingerprint) -> &mut Self {
        name.hash(&mut self.inner);
        value.fingerprint(self);
        self
    }

    /// Mix a named, order-sensitive sequence into the fingerprint.
    pub fn ordered<T: Fingerprint>(&mut self, name: &str, items: &[T]) -> &mut Self {
        name.hash(&mut self.inner);
        items.len().hash(&mut self.inner);
        for item in items {
            item.fingerprint(self);
        }
        self
    }

    /// Mix a named sequence into the fingerprint as an unordered multiset —
    /// the equivalent of the Go source's `hash:"set"` struct tag. Element
    /// order does not affect the result.
    pub fn unordered<T: Fingerprint>(&mut self, name: &str, items: &[T]) -> &mut Self {
        name.hash(&mut self.inner);
        items.len().hash(&mut self.inner);
        let combined = items.iter().fold(0u64, |acc, item| {
            let mut sub = StateHasher::new();
            item.fingerprint(&mut sub);
            acc ^ sub.finish()
        });
        combined.hash(&mut self.inner);
        self
    }

    /// Mix a raw value that only implements [`std::hash::Hash`], bypassing
    /// the [`Fingerprint`] trait. Useful for primitives at the leaves of a
    /// manual impl.
    pub fn raw(&mut self, name: &str, value: &impl Hash) -> &mut Self {
        name.hash(&mut self.inner);
        value.hash(&mut self.inner);
        self
    }

    fn finish(&self) -> u64 {
        self.inner.finish()
    }
}

/// A state value that can fingerprint itself deterministically.
///
/// Implement this by calling [`StateHasher::field`] once per field you want
/// to participate in the hash, in the order those fields are declared.
/// Fields you never call `.field()` for (internal bookkeeping, caches, ...)
/// are excluded from the fingerprint, mirroring the Go source's
/// unexported-field exclusion.
pub trait Fingerprint {
    /// Mix `self` into `hasher`.
    fn fingerprint(&self, hasher: &mut StateHasher);
}

macro_rules! impl_fingerprint_via_hash {
    ($($t:ty),* $(,)?) => {
        $(
            impl Fingerprint for $t {
                fn fingerprint(&self, hasher: &mut StateHasher) {
                    self.hash(&mut hasher.inner);
                }
            }
        )*
    };
}

impl_fingerprint_via_hash!(
    bool, char, str, String,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
);

impl<T: Fingerprint + ?Sized> Fingerprint for &T {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        (*self).fingerprint(hasher)
    }
}

impl<T: Fingerprint> Fingerprint for Option<T> {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        match self {
            None => 0u8.hash(&mut hasher.inner),
            Some(v) => {
                1u8.hash(&mut hasher.inner);
                v.fingerprint(hasher);
            }
        }
    }
}

/// Sequences fingerprint in order by default; use [`StateHasher::unordered`]
/// at the call site for the set-tag opt-in.
impl<T: Fingerprint> Fingerprint for [T] {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        self.len().hash(&mut hasher.inner);
        for item in self {
            item.fingerprint(hasher);
        }
    }
}

impl<T: Fingerprint> Fingerprint for Vec<T> {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        self.as_slice().fingerprint(hasher)
    }
}

impl<A: Fingerprint, B: Fingerprint> Fingerprint for (A, B) {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        self.0.fingerprint(hasher);
        self.1.fingerprint(hasher);
    }
}

impl<A: Fingerprint, B: Fingerprint, C: Fingerprint> Fingerprint for (A, B, C) {
    fn fingerprint(&self, hasher: &mut StateHasher) {
        self.0.fingerprint(hasher);
        self.1.fingerprint(hasher);
        self.2.fingerprint(hasher);
    }
}

/// Compute the fingerprint of a state value.
pub fn state_hash<S: Fingerprint + ?Sized>(value: &S) -> StateHash {
    let mut hasher = StateHasher::new();
    value.fingerprint(&mut hasher);
    StateHash(hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: i32,
        b: i32,
    }
    impl Fingerprint for Pair {
        fn fingerprint(&self, hasher: &mut StateHasher) {
            hasher.field("A", &self.a).field("B", &self.b);
        }
    }

    struct Swapped {
        b: i32,
        a: i32,
    }
    impl Fingerprint for Swapped {
        fn fingerprint(&self, hasher: &mut StateHasher) {
            hasher.field("B", &self.b).field("A", &self.a);
        }
    }

    struct RenamedLayout {
        x: i32,
        y: i32,
    }
    impl Fingerprint for RenamedLayout {
        fn fingerprint(&self, hasher: &mut StateHasher) {
            hasher.field("X", &self.x).field("Y", &self.y);
        }
    }

    struct HasPrivate {
        visible: i32,
        _hidden: i32,
    }
    impl Fingerprint for HasPrivate {
        fn fingerprint(&self, hasher: &mut StateHasher) {
            hasher.field("Visible", &self.visible);
        }
    }

    #[test]
    fn same_value_hashes_equal() {
        let a = Pair { a: 100, b: 200 };
        let b = Pair { a: 100, b: 200 };
        assert_eq!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn field_order_matters() {
        let p = Pair { a: 100, b: 200 };
        let swapped = Swapped { b: 200, a: 100 };
        // Same field names and values, but the declaration/call order
        // differs between Pair (A then B) and Swapped (B then A).
        assert_ne!(state_hash(&p), state_hash(&swapped));
    }

    #[test]
    fn swapped_values_hash_unequal() {
        let p1 = Pair { a: 100, b: 200 };
        let p2 = Pair { a: 200, b: 100 };
        assert_ne!(state_hash(&p1), state_hash(&p2));
    }

    #[test]
    fn distinct_field_names_same_layout_hash_unequal() {
        let p = Pair { a: 100, b: 200 };
        let r = RenamedLayout { x: 100, y: 200 };
        assert_ne!(state_hash(&p), state_hash(&r));
    }

    #[test]
    fn private_fields_are_excluded() {
        let a = HasPrivate {
            visible: 100,
            _hidden: 1,
        };
        let b = HasPrivate {
            visible: 100,
            _hidden: 2,
        };
        assert_eq!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn sequences_respect_order_unless_unordered() {
        let ordered_a = vec![1i32, 3];
        let ordered_b = vec![3i32, 1];
        assert_ne!(state_hash(&ordered_a), state_hash(&ordered_b));

        struct AsSet(Vec<i32>);
        impl Fingerprint for AsSet {
            fn fingerprint(&self, hasher: &mut StateHasher) {
                hasher.unordered("Slice", &self.0);
            }
        }
        let set_a = AsSet(vec![1, 2]);
        let set_b = AsSet(vec![2, 1]);
        assert_eq!(state_hash(&set_a), state_hash(&set_b));
    }

    #[test]
    fn strings_respect_order_like_any_other_value() {
        struct Strs(Vec<String>);
        impl Fingerprint for Strs {
            fn fingerprint(&self, hasher: &mut StateHasher) {
                hasher.ordered("S", &self.0);
            }
        }
        let a = Strs(vec!["foo".to_string(), "bar".to_string()]);
        let b = Strs(vec!["foo".to_string(), "bar".to_string()]);
        assert_eq!(state_hash(&a), state_hash(&b));
    }

    #[test]
    fn hashing_is_deterministic_within_a_run() {
        let p = Pair { a: 1, b: 2 };
        assert_eq!(state_hash(&p), state_hash(&p));
    }

    proptest::proptest! {
        #[test]
        fn fingerprint_is_a_pure_function_of_value(a in any::<i32>(), b in any::<i32>()) {
            let p1 = Pair { a, b };
            let p2 = Pair { a, b };
            proptest::prop_assert_eq!(state_hash(&p1), state_hash(&p2));
        }
    }
}
