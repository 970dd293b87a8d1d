//! An explicit-state model checker for finite-state concurrent
//! specifications.
//!
//! A specification is any type `S` implementing [`Fingerprint`], together
//! with one or more named transition functions. [`Checker`] enumerates
//! every state reachable from a set of initial states via a worklist
//! (backlog) loop, checks invariants against every state as it is
//! discovered, and evaluates temporal properties once the full graph is
//! known. Running a checker never returns an error: a failing invariant or
//! temporal property is a [`Violation`], an ordinary part of the result,
//! not a `Result::Err`. Only a genuine misuse of the API — no transitions
//! supplied, or a transition that produces no successors — aborts the run,
//! via a panic carrying a [`CheckerError`].
//!
//! ```
//! use reachcheck::{state_manager::managed, Checker, NamedInvariant, NamedTransition};
//!
//! let inc = NamedTransition::new(
//!     "Inc",
//!     managed(|mgr| {
//!         let n = *mgr.current();
//!         if n < 3 {
//!             mgr.add(n + 1);
//!         }
//!     }),
//! );
//! let under_three = NamedInvariant::new("UnderThree", |n: &i32| *n < 3);
//!
//! let result = Checker::new(vec![0], vec![inc])
//!     .with_invariants(vec![under_three])
//!     .run();
//!
//! assert!(!result.passed());
//! ```

pub mod engine;
pub mod error;
pub mod formatter;
pub mod graph;
pub mod hash;
pub mod shortest_path;
pub mod state_manager;
pub mod temporal;
pub mod violation;

pub use engine::*;
pub use error::*;
pub use formatter::*;
pub use graph::*;
pub use hash::*;
pub use state_manager::*;
pub use temporal::*;
pub use violation::*;

/// Crate version, exposed for diagnostics and bug reports.
pub const REACHCHECK_VERSION: &str = env!("CARGO_PKG_VERSION");
