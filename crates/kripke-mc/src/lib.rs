//! Automata-theoretic verification for the kripke model checker.
//!
//! A property is a nondeterministic finite automaton over atomic-
//! proposition label sets. Verification builds the synchronous product of
//! a transition system with the automaton and searches it for a reachable
//! accepting lasso; a found lasso witnesses violation of the ω-regular
//! property.

mod automaton;
mod product;
mod verify;

pub use automaton::Automaton;
pub use product::product;
pub use verify::{verify_omega_regular_property, VerificationResult};
