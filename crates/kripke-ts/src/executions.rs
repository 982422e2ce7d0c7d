//! Alternating state/action sequences and execution-fragment predicates.

use crate::transition_system::{Transition, TransitionSystem, TsError, TsResult};
use std::fmt;
use std::hash::Hash;

/// An alternating sequence `s0 a1 s1 a2 s2 ...`, always one state longer
/// than its action list (or entirely empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternatingSequence<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
}

impl<S, A> Default for AlternatingSequence<S, A> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            actions: Vec::new(),
        }
    }
}

impl<S, A> AlternatingSequence<S, A> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn starting_at(state: S) -> Self {
        Self {
            states: vec![state],
            actions: Vec::new(),
        }
    }

    /// Extend the sequence by one `action, state` step.
    pub fn then(mut self, action: A, state: S) -> Self {
        debug_assert!(!self.states.is_empty(), "cannot extend an empty sequence");
        self.actions.push(action);
        self.states.push(state);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn head(&self) -> Option<&S> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&S> {
        self.states.last()
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }
}

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    /// Whether every step of `e` is a transition of this system. States and
    /// actions are validated as the sequence is walked; a step that is no
    /// transition answers `false` without validating the remainder.
    pub fn is_execution_fragment(&self, e: &AlternatingSequence<S, A>) -> TsResult<bool> {
        let states = e.states();
        let actions = e.actions();
        if states.is_empty() {
            return Ok(true);
        }
        for (i, action) in actions.iter().enumerate() {
            let from = &states[i];
            if !self.contains_state(from) {
                return Err(TsError::StateNotFound(format!("{from:?}")));
            }
            if !self.contains_action(action) {
                return Err(TsError::ActionNotFound(format!("{action:?}")));
            }
            let step = Transition::new(from.clone(), action.clone(), states[i + 1].clone());
            if !self.contains_transition(&step) {
                return Ok(false);
            }
        }
        let last = &states[states.len() - 1];
        if !self.contains_state(last) {
            return Err(TsError::StateNotFound(format!("{last:?}")));
        }
        Ok(true)
    }

    /// An execution fragment whose head is an initial state.
    pub fn is_initial_execution_fragment(&self, e: &AlternatingSequence<S, A>) -> TsResult<bool> {
        if !e.head().is_some_and(|s| self.is_initial(s)) {
            return Ok(false);
        }
        self.is_execution_fragment(e)
    }

    /// An execution fragment that cannot be extended: its last state is
    /// terminal.
    pub fn is_maximal_execution_fragment(&self, e: &AlternatingSequence<S, A>) -> TsResult<bool> {
        if !self.is_execution_fragment(e)? {
            return Ok(false);
        }
        match e.last() {
            Some(last) => self.is_state_terminal(last),
            None => Ok(false),
        }
    }

    /// An initial, maximal execution fragment.
    pub fn is_execution(&self, e: &AlternatingSequence<S, A>) -> TsResult<bool> {
        Ok(self.is_initial_execution_fragment(e)? && self.is_maximal_execution_fragment(e)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// s0 -a-> s1 -b-> s2, with s2 terminal.
    fn line() -> TransitionSystem<&'static str, &'static str, ()> {
        let mut ts = TransitionSystem::with_name("line");
        ts.add_states(["s0", "s1", "s2"]);
        ts.add_actions(["a", "b"]);
        ts.set_initial(&"s0", true).unwrap();
        ts.add_transition(Transition::new("s0", "a", "s1")).unwrap();
        ts.add_transition(Transition::new("s1", "b", "s2")).unwrap();
        ts
    }

    #[test]
    fn empty_sequence_is_a_fragment() {
        let ts = line();
        assert!(ts.is_execution_fragment(&AlternatingSequence::empty()).unwrap());
    }

    #[test]
    fn fragment_follows_transitions() {
        let ts = line();
        let good = AlternatingSequence::starting_at("s0").then("a", "s1").then("b", "s2");
        assert!(ts.is_execution_fragment(&good).unwrap());
        let bad = AlternatingSequence::starting_at("s0").then("b", "s1");
        assert!(!ts.is_execution_fragment(&bad).unwrap());
    }

    #[test]
    fn fragment_validates_members_as_it_walks() {
        let ts = line();
        let ghost_state = AlternatingSequence::starting_at("nope").then("a", "s1");
        assert!(matches!(
            ts.is_execution_fragment(&ghost_state),
            Err(TsError::StateNotFound(_))
        ));
        let ghost_action = AlternatingSequence::starting_at("s0").then("c", "s1");
        assert!(matches!(
            ts.is_execution_fragment(&ghost_action),
            Err(TsError::ActionNotFound(_))
        ));
    }

    #[test]
    fn initial_maximal_and_execution() {
        let ts = line();
        let full = AlternatingSequence::starting_at("s0").then("a", "s1").then("b", "s2");
        assert!(ts.is_initial_execution_fragment(&full).unwrap());
        assert!(ts.is_maximal_execution_fragment(&full).unwrap());
        assert!(ts.is_execution(&full).unwrap());

        let partial = AlternatingSequence::starting_at("s0").then("a", "s1");
        assert!(ts.is_initial_execution_fragment(&partial).unwrap());
        assert!(!ts.is_maximal_execution_fragment(&partial).unwrap());
        assert!(!ts.is_execution(&partial).unwrap());

        let suffix = AlternatingSequence::starting_at("s1").then("b", "s2");
        assert!(!ts.is_initial_execution_fragment(&suffix).unwrap());
        assert!(ts.is_maximal_execution_fragment(&suffix).unwrap());
        assert!(!ts.is_execution(&suffix).unwrap());
    }
}
