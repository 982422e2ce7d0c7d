//! The program graph ADT.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// A guarded, actioned transition between two locations. The guard is
/// symbolic text, interpreted only at extraction time through the
/// registered guard-evaluation capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PgTransition<L, A> {
    pub from: L,
    pub guard: String,
    pub action: A,
    pub to: L,
}

impl<L, A> PgTransition<L, A> {
    pub fn new(from: L, guard: impl Into<String>, action: A, to: L) -> Self {
        Self {
            from,
            guard: guard.into(),
            action,
            to,
        }
    }
}

/// A program graph: locations with initial marking, guarded transitions,
/// and variable-initialization action sequences.
#[derive(Debug, Clone)]
pub struct ProgramGraph<L, A> {
    name: String,
    /// Location set; the flag marks initial locations.
    locations: FxHashMap<L, bool>,
    transitions: FxHashSet<PgTransition<L, A>>,
    initializations: FxHashSet<Vec<String>>,
}

impl<L, A> Default for ProgramGraph<L, A> {
    fn default() -> Self {
        Self {
            name: String::new(),
            locations: FxHashMap::default(),
            transitions: FxHashSet::default(),
            initializations: FxHashSet::default(),
        }
    }
}

impl<L, A> ProgramGraph<L, A>
where
    L: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
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

    /// Declare a location. Re-declaring keeps its initial flag.
    pub fn add_location(&mut self, location: L) {
        self.locations.entry(location).or_insert(false);
    }

    pub fn add_locations(&mut self, locations: impl IntoIterator<Item = L>) {
        for l in locations {
            self.add_location(l);
        }
    }

    /// Mark or unmark a declared location as initial. Returns whether the
    /// location was declared.
    pub fn set_initial(&mut self, location: &L, initial: bool) -> bool {
        match self.locations.get_mut(location) {
            Some(flag) => {
                *flag = initial;
                true
            }
            None => false,
        }
    }

    pub fn add_transition(&mut self, transition: PgTransition<L, A>) {
        self.transitions.insert(transition);
    }

    pub fn remove_transition(&mut self, transition: &PgTransition<L, A>) {
        self.transitions.remove(transition);
    }

    pub fn remove_location(&mut self, location: &L) {
        self.locations.remove(location);
    }

    /// Register a variable-initialization sequence: action texts applied
    /// in order to the empty valuation at extraction time.
    pub fn add_initialization(&mut self, actions: Vec<String>) {
        self.initializations.insert(actions);
    }

    pub fn locations(&self) -> impl Iterator<Item = &L> {
        self.locations.keys()
    }

    pub fn initial_locations(&self) -> impl Iterator<Item = &L> {
        self.locations
            .iter()
            .filter_map(|(l, initial)| initial.then_some(l))
    }

    pub fn contains_location(&self, location: &L) -> bool {
        self.locations.contains_key(location)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &PgTransition<L, A>> {
        self.transitions.iter()
    }

    pub fn initializations(&self) -> impl Iterator<Item = &Vec<String>> {
        self.initializations.iter()
    }

    pub fn has_initializations(&self) -> bool {
        !self.initializations.is_empty()
    }
}
