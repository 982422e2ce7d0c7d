//! Minimal guard/effect interpreters for tests: integer assignments,
//! equality guards, and literal-value channel handshakes.

use kripke_eval::{
    channel_of, EffectInterpreter, GuardEvaluator, RendezvousInterpreter, Valuation, Value,
};

/// Effects of the form `var:=int`, plus `skip` (no-op) and `block`
/// (recognized but never enabled).
pub struct Assign;

fn parse_assignment(action: &str) -> Option<(&str, i64)> {
    let (var, rhs) = action.split_once(":=")?;
    rhs.trim().parse::<i64>().ok().map(|n| (var.trim(), n))
}

impl EffectInterpreter for Assign {
    fn recognizes(&self, action: &str) -> bool {
        action == "skip" || action == "block" || parse_assignment(action).is_some()
    }

    fn apply(&self, valuation: &Valuation, action: &str) -> Option<Valuation> {
        match action {
            "skip" => Some(valuation.clone()),
            "block" => None,
            _ => {
                let (var, n) = parse_assignment(action)?;
                Some(valuation.clone().with(var, Value::Int(n)))
            }
        }
    }
}

/// Guards of the form `var==int` / `var!=int`, plus the empty guard.
pub struct IntGuard;

fn parse_comparison(guard: &str) -> Option<(&str, bool, i64)> {
    let (var, eq, rhs) = if let Some((var, rhs)) = guard.split_once("==") {
        (var, true, rhs)
    } else if let Some((var, rhs)) = guard.split_once("!=") {
        (var, false, rhs)
    } else {
        return None;
    };
    rhs.trim().parse::<i64>().ok().map(|n| (var.trim(), eq, n))
}

impl GuardEvaluator for IntGuard {
    fn recognizes(&self, guard: &str) -> bool {
        guard.is_empty() || parse_comparison(guard).is_some()
    }

    fn evaluate(&self, valuation: &Valuation, guard: &str) -> bool {
        if guard.is_empty() {
            return true;
        }
        let Some((var, eq, n)) = parse_comparison(guard) else {
            return false;
        };
        let holds = matches!(valuation.get(var), Some(Value::Int(v)) if *v == n);
        if eq {
            holds
        } else {
            !holds
        }
    }
}

/// Rendezvous over `chan!value` / `chan?var` pairs: the sent literal (or
/// current value of a sent variable) is bound to the receiving variable.
pub struct Handshake;

impl RendezvousInterpreter for Handshake {
    fn is_one_sided(&self, action: &str) -> bool {
        !action.contains('|') && (action.contains('!') || action.contains('?'))
    }

    fn apply(&self, valuation: &Valuation, composite: &str) -> Option<Valuation> {
        let (first, second) = composite.split_once('|')?;
        let (write, read) = if first.contains('!') {
            (first, second)
        } else {
            (second, first)
        };
        let sent = &write[channel_of(write).len() + 1..];
        let value = match sent.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => valuation.get(sent)?.clone(),
        };
        let var = &read[channel_of(read).len() + 1..];
        Some(valuation.clone().with(var, value))
    }
}
