//! The transition system ADT and its referential invariants.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// The part of a transition system that still references an entity whose
/// removal was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPart {
    Transitions,
    LabelingFunction,
    InitialStates,
}

impl fmt::Display for TsPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsPart::Transitions => write!(f, "the transition relation"),
            TsPart::LabelingFunction => write!(f, "the labeling function"),
            TsPart::InitialStates => write!(f, "the initial-state marking"),
        }
    }
}

/// Referential-integrity error raised by transition system operations.
///
/// Offending entities are captured as their `Debug` rendering so the error
/// type stays non-generic. All variants signal programmer or model errors
/// and are raised at the point of violation; nothing is retried or caught
/// internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TsError {
    #[error("state not found: {0}")]
    StateNotFound(String),

    #[error("action not found: {0}")]
    ActionNotFound(String),

    #[error("invalid transition {0}: both endpoints and the action must be declared first")]
    InvalidTransition(String),

    #[error("invalid labeling: atomic proposition {0} is not declared")]
    InvalidLabeling(String),

    #[error("cannot remove {entity}: still referenced by {part}")]
    DeletionOfAttached { entity: String, part: TsPart },
}

pub type TsResult<T> = Result<T, TsError>;

/// A single labeled transition. Plain value; equality is by component and
/// the transition has no lifecycle outside the system that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition<S, A> {
    pub from: S,
    pub action: A,
    pub to: S,
}

impl<S, A> Transition<S, A> {
    pub fn new(from: S, action: A, to: S) -> Self {
        Self { from, action, to }
    }
}

/// A finite labeled transition system.
///
/// States carry an initial/non-initial flag; the labeling function maps
/// every declared state to a set of declared atomic propositions. The
/// system is mutated in place while a construction routine builds it and
/// is treated as read-only by downstream queries.
#[derive(Debug, Clone)]
pub struct TransitionSystem<S, A, P> {
    name: String,
    /// State set; the flag marks initial states.
    states: FxHashMap<S, bool>,
    actions: FxHashSet<A>,
    propositions: FxHashSet<P>,
    transitions: FxHashSet<Transition<S, A>>,
    /// Every declared state has an entry, possibly empty.
    labeling: FxHashMap<S, FxHashSet<P>>,
}

impl<S, A, P> Default for TransitionSystem<S, A, P> {
    fn default() -> Self {
        Self {
            name: String::new(),
            states: FxHashMap::default(),
            actions: FxHashSet::default(),
            propositions: FxHashSet::default(),
            transitions: FxHashSet::default(),
            labeling: FxHashMap::default(),
        }
    }
}

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Declare a state. Re-declaring an existing state keeps its initial
    /// flag and labels.
    pub fn add_state(&mut self, state: S) {
        if self.states.contains_key(&state) {
            return;
        }
        self.labeling.insert(state.clone(), FxHashSet::default());
        self.states.insert(state, false);
    }

    pub fn add_states(&mut self, states: impl IntoIterator<Item = S>) {
        for s in states {
            self.add_state(s);
        }
    }

    pub fn add_action(&mut self, action: A) {
        self.actions.insert(action);
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = A>) {
        self.actions.extend(actions);
    }

    pub fn add_atomic_proposition(&mut self, proposition: P) {
        self.propositions.insert(proposition);
    }

    pub fn add_atomic_propositions(&mut self, propositions: impl IntoIterator<Item = P>) {
        self.propositions.extend(propositions);
    }

    /// Mark or unmark a declared state as initial.
    pub fn set_initial(&mut self, state: &S, initial: bool) -> TsResult<()> {
        match self.states.get_mut(state) {
            Some(flag) => {
                *flag = initial;
                Ok(())
            }
            None => Err(TsError::StateNotFound(format!("{state:?}"))),
        }
    }

    /// Insert a transition. Both endpoints and the action must already be
    /// declared members.
    pub fn add_transition(&mut self, transition: Transition<S, A>) -> TsResult<()> {
        if !self.states.contains_key(&transition.from)
            || !self.states.contains_key(&transition.to)
            || !self.actions.contains(&transition.action)
        {
            return Err(TsError::InvalidTransition(format!("{transition:?}")));
        }
        self.transitions.insert(transition);
        Ok(())
    }

    /// Attach a declared atomic proposition to a declared state.
    pub fn add_to_label(&mut self, state: &S, proposition: P) -> TsResult<()> {
        if !self.propositions.contains(&proposition) {
            return Err(TsError::InvalidLabeling(format!("{proposition:?}")));
        }
        match self.labeling.get_mut(state) {
            Some(label) => {
                label.insert(proposition);
                Ok(())
            }
            None => Err(TsError::StateNotFound(format!("{state:?}"))),
        }
    }

    /// The label of a declared state.
    pub fn label(&self, state: &S) -> TsResult<&FxHashSet<P>> {
        self.labeling
            .get(state)
            .ok_or_else(|| TsError::StateNotFound(format!("{state:?}")))
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.keys()
    }

    pub fn initial_states(&self) -> impl Iterator<Item = &S> {
        self.states
            .iter()
            .filter_map(|(s, initial)| initial.then_some(s))
    }

    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.actions.iter()
    }

    pub fn atomic_propositions(&self) -> impl Iterator<Item = &P> {
        self.propositions.iter()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, A>> {
        self.transitions.iter()
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    pub fn contains_action(&self, action: &A) -> bool {
        self.actions.contains(action)
    }

    pub fn contains_atomic_proposition(&self, proposition: &P) -> bool {
        self.propositions.contains(proposition)
    }

    pub fn contains_transition(&self, transition: &Transition<S, A>) -> bool {
        self.transitions.contains(transition)
    }

    pub fn is_initial(&self, state: &S) -> bool {
        self.states.get(state).copied().unwrap_or(false)
    }

    /// Detach a proposition from a state's label. No effect if the state is
    /// undeclared or the proposition is not attached.
    pub fn remove_label(&mut self, state: &S, proposition: &P) {
        if let Some(label) = self.labeling.get_mut(state) {
            label.remove(proposition);
        }
    }

    pub fn remove_transition(&mut self, transition: &Transition<S, A>) {
        self.transitions.remove(transition);
    }

    /// Retract an action declaration. Fails while any transition still
    /// carries the action.
    pub fn remove_action(&mut self, action: &A) -> TsResult<()> {
        if self.transitions.iter().any(|t| t.action == *action) {
            return Err(TsError::DeletionOfAttached {
                entity: format!("{action:?}"),
                part: TsPart::Transitions,
            });
        }
        self.actions.remove(action);
        Ok(())
    }

    /// Retract an atomic-proposition declaration. Fails while the
    /// proposition still labels any state; on failure the system is left
    /// completely unmodified.
    pub fn remove_atomic_proposition(&mut self, proposition: &P) -> TsResult<()> {
        if self.labeling.values().any(|label| label.contains(proposition)) {
            return Err(TsError::DeletionOfAttached {
                entity: format!("{proposition:?}"),
                part: TsPart::LabelingFunction,
            });
        }
        self.propositions.remove(proposition);
        Ok(())
    }

    /// Retract a state declaration. Fails while the state is referenced by
    /// a transition, a non-empty label, or the initial-state marking;
    /// dependencies must be retracted first, in that order.
    pub fn remove_state(&mut self, state: &S) -> TsResult<()> {
        let initial = self
            .states
            .get(state)
            .copied()
            .ok_or_else(|| TsError::StateNotFound(format!("{state:?}")))?;
        if self
            .transitions
            .iter()
            .any(|t| t.from == *state || t.to == *state)
        {
            return Err(TsError::DeletionOfAttached {
                entity: format!("{state:?}"),
                part: TsPart::Transitions,
            });
        }
        if self.labeling.get(state).is_some_and(|l| !l.is_empty()) {
            return Err(TsError::DeletionOfAttached {
                entity: format!("{state:?}"),
                part: TsPart::LabelingFunction,
            });
        }
        if initial {
            return Err(TsError::DeletionOfAttached {
                entity: format!("{state:?}"),
                part: TsPart::InitialStates,
            });
        }
        self.states.remove(state);
        self.labeling.remove(state);
        Ok(())
    }

    /// Delete every state unreachable from the initial states, together
    /// with the transitions and labels referencing it, respecting the
    /// deletion invariants (labels, then transitions, then the state).
    pub fn remove_unreachable_states(&mut self) -> TsResult<()> {
        let reachable = self.reach();
        let doomed: Vec<S> = self
            .states
            .keys()
            .filter(|s| !reachable.contains(*s))
            .cloned()
            .collect();
        for state in &doomed {
            let attached: Vec<Transition<S, A>> = self
                .transitions
                .iter()
                .filter(|t| t.from == *state || t.to == *state)
                .cloned()
                .collect();
            for t in &attached {
                self.remove_transition(t);
            }
            let label: Vec<P> = self.labeling[state].iter().cloned().collect();
            for p in &label {
                self.remove_label(state, p);
            }
            self.remove_state(state)?;
        }
        Ok(())
    }
}
