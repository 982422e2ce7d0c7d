//! Labeled transition systems for the kripke model checker.
//!
//! This crate defines the central ADT of the engine: a finite transition
//! system with initial-state marking and an atomic-proposition labeling
//! function, together with the pre/post/reach queries and the interleaving
//! composition operators built on top of it. Mutations enforce referential
//! integrity: transitions and labels may only mention declared members, and
//! declarations can only be retracted in dependency order.

pub mod compose;
mod executions;
mod queries;
mod transition_system;

pub use compose::{interleave, interleave_with_handshake};
pub use executions::AlternatingSequence;
pub use transition_system::{Transition, TransitionSystem, TsError, TsPart, TsResult};
