//! Runtime values and evaluation capabilities for the kripke model checker.
//!
//! Semantic extraction is agnostic of concrete guard/action syntax: it
//! consumes guards and actions through the capability traits defined here,
//! tried in registration order. This crate also defines the `Value` and
//! `Valuation` types that extraction embeds into state identities.

mod capability;
mod value;

pub use capability::{
    apply_effect, channel_of, eval_guard, EffectInterpreter, EvalError, EvalResult,
    GuardEvaluator, RendezvousInterpreter,
};
pub use value::{Value, Valuation};
