//! Program graphs and channel systems for the kripke model checker.
//!
//! A program graph is a transition-system precursor: its transitions carry
//! textual guards and actions over variables, evaluated lazily during
//! semantic extraction. A channel system is an ordered collection of
//! program graphs that communicate only via named one-sided channel
//! actions (`chan!...` / `chan?...`).

mod channel_system;
pub mod compose;
mod program_graph;

pub use channel_system::ChannelSystem;
pub use compose::interleave;
pub use program_graph::{PgTransition, ProgramGraph};
