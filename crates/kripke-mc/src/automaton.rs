//! Nondeterministic property automata over atomic-proposition labels.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeSet;
use std::hash::Hash;

/// A nondeterministic finite automaton whose transition relation is keyed
/// by `(state, label set)`: reading a label set may admit several
/// successor states. Conventionally a single initial state, but the
/// engine allows any number.
#[derive(Debug, Clone)]
pub struct Automaton<Q, P> {
    states: FxHashSet<Q>,
    initial: FxHashSet<Q>,
    accepting: FxHashSet<Q>,
    transitions: FxHashMap<Q, FxHashMap<BTreeSet<P>, FxHashSet<Q>>>,
}

impl<Q, P> Default for Automaton<Q, P> {
    fn default() -> Self {
        Self {
            states: FxHashSet::default(),
            initial: FxHashSet::default(),
            accepting: FxHashSet::default(),
            transitions: FxHashMap::default(),
        }
    }
}

impl<Q, P> Automaton<Q, P>
where
    Q: Clone + Eq + Hash,
    P: Clone + Eq + Ord + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, state: Q) {
        self.states.insert(state);
    }

    /// Add a transition on the given label set. Endpoint states are
    /// declared implicitly.
    pub fn add_transition(
        &mut self,
        from: Q,
        symbol: impl IntoIterator<Item = P>,
        to: Q,
    ) {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions
            .entry(from)
            .or_default()
            .entry(symbol.into_iter().collect())
            .or_default()
            .insert(to);
    }

    pub fn set_initial(&mut self, state: Q) {
        self.states.insert(state.clone());
        self.initial.insert(state);
    }

    pub fn set_accepting(&mut self, state: Q) {
        self.states.insert(state.clone());
        self.accepting.insert(state);
    }

    pub fn states(&self) -> impl Iterator<Item = &Q> {
        self.states.iter()
    }

    pub fn initial_states(&self) -> impl Iterator<Item = &Q> {
        self.initial.iter()
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = &Q> {
        self.accepting.iter()
    }

    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accepting.contains(state)
    }

    /// The successor set of `state` on reading `symbol`, if any transition
    /// is defined for that pair.
    pub fn next_states(&self, state: &Q, symbol: &BTreeSet<P>) -> Option<&FxHashSet<Q>> {
        self.transitions.get(state)?.get(symbol)
    }
}
