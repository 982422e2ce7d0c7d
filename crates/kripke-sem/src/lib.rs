//! Semantic extraction: from program graphs and channel systems to
//! transition systems.
//!
//! Both extractors run the same fixed-point closure as a worklist BFS with
//! a visited set (no state is expanded twice; exploration continues until
//! no new transition is discoverable). Guard and action syntax stays
//! opaque: it is interpreted through the capability traits of
//! [`kripke_eval`].

mod channels;
mod label;
#[cfg(test)]
mod testing;
mod unfold;

pub use channels::transition_system_from_channel_system;
pub use label::PropLabel;
pub use unfold::transition_system_from_program_graph;

use kripke_eval::EvalError;
use kripke_ts::TsError;
use thiserror::Error;

/// Extraction error. All variants are fail-fast model or configuration
/// errors; the extractor never recovers partially.
#[derive(Debug, Error)]
pub enum SemanticsError {
    #[error(transparent)]
    Ts(#[from] TsError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("initialization action is not enabled: {action:?}")]
    InitializationFailed { action: String },
}

pub type SemResult<T> = Result<T, SemanticsError>;
