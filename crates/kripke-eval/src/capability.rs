//! Pluggable guard-evaluation, action-effect, and rendezvous capabilities.

use crate::value::Valuation;
use thiserror::Error;

/// Capability-resolution error: no registered implementation recognizes
/// the given syntax. This is a configuration error of the model, surfaced
/// immediately rather than silently ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("no registered evaluator recognizes guard: {0:?}")]
    UnrecognizedGuard(String),

    #[error("no registered interpreter recognizes action: {0:?}")]
    UnrecognizedAction(String),
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates guard conditions over a valuation. Implementations declare
/// which syntax they recognize; registered evaluators are tried in order
/// and the first match wins.
pub trait GuardEvaluator {
    fn recognizes(&self, guard: &str) -> bool;
    fn evaluate(&self, valuation: &Valuation, guard: &str) -> bool;
}

/// Applies the effect of an action to a valuation. `None` means the action
/// is not enabled in this valuation (the candidate transition is dropped,
/// not an error).
pub trait EffectInterpreter {
    fn recognizes(&self, action: &str) -> bool;
    fn apply(&self, valuation: &Valuation, action: &str) -> Option<Valuation>;
}

/// Judges and executes channel rendezvous. `is_one_sided` decides whether
/// an action text is a bare channel read/write; `apply` receives the
/// composite action (the two one-sided texts joined by `|`) and produces
/// the combined successor valuation, or `None` when the handshake is not
/// enabled.
pub trait RendezvousInterpreter {
    fn is_one_sided(&self, action: &str) -> bool;
    fn apply(&self, valuation: &Valuation, composite: &str) -> Option<Valuation>;
}

/// Evaluate a guard against the registered evaluators, first match wins.
pub fn eval_guard(
    evaluators: &[Box<dyn GuardEvaluator>],
    valuation: &Valuation,
    guard: &str,
) -> EvalResult<bool> {
    evaluators
        .iter()
        .find(|e| e.recognizes(guard))
        .map(|e| e.evaluate(valuation, guard))
        .ok_or_else(|| EvalError::UnrecognizedGuard(guard.to_owned()))
}

/// Apply an action effect through the registered interpreters, first match
/// wins. `Ok(None)` means the action is recognized but disabled.
pub fn apply_effect(
    interpreters: &[Box<dyn EffectInterpreter>],
    valuation: &Valuation,
    action: &str,
) -> EvalResult<Option<Valuation>> {
    interpreters
        .iter()
        .find(|i| i.recognizes(action))
        .map(|i| i.apply(valuation, action))
        .ok_or_else(|| EvalError::UnrecognizedAction(action.to_owned()))
}

/// The channel name of a one-sided action: the text before the last `!`
/// or `?` marker. Empty when no marker is present.
pub fn channel_of(action: &str) -> &str {
    match action.rfind(['!', '?']) {
        Some(idx) => &action[..idx],
        None => "",
    }
}
