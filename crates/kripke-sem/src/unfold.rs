//! Unfolding a single program graph into a transition system.

use crate::label::PropLabel;
use crate::{SemResult, SemanticsError};
use kripke_eval::{apply_effect, eval_guard, EffectInterpreter, GuardEvaluator, Valuation};
use kripke_pg::ProgramGraph;
use kripke_ts::{Transition, TransitionSystem};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// Fold one initialization sequence over the empty valuation. An action
/// that is disabled during initialization is a model error.
pub(crate) fn initial_valuation(
    effects: &[Box<dyn EffectInterpreter>],
    actions: &[String],
) -> SemResult<Valuation> {
    let mut valuation = Valuation::new();
    for action in actions {
        valuation = apply_effect(effects, &valuation, action)?.ok_or_else(|| {
            SemanticsError::InitializationFailed {
                action: action.clone(),
            }
        })?;
    }
    Ok(valuation)
}

/// Declare a state, mark it initial, and enqueue it for expansion.
pub(crate) fn seed_initial<S, A, P>(
    ts: &mut TransitionSystem<S, A, P>,
    queue: &mut VecDeque<S>,
    visited: &mut FxHashSet<S>,
    state: S,
) -> SemResult<()>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    ts.add_state(state.clone());
    ts.set_initial(&state, true)?;
    if visited.insert(state.clone()) {
        queue.push_back(state);
    }
    Ok(())
}

/// Unfold a program graph into a transition system whose states are
/// (location, valuation) pairs.
///
/// Initial states cross each initial location with the valuation of each
/// declared initialization sequence (or the empty valuation when none is
/// declared). Successors close under every guarded transition whose guard
/// holds and whose effect is enabled. Each location and each
/// `variable = value` binding becomes an atomic proposition labeling the
/// states where it holds.
pub fn transition_system_from_program_graph<L, A>(
    pg: &ProgramGraph<L, A>,
    effects: &[Box<dyn EffectInterpreter>],
    guards: &[Box<dyn GuardEvaluator>],
) -> SemResult<TransitionSystem<(L, Valuation), A, String>>
where
    L: Clone + Eq + Hash + fmt::Debug + PropLabel,
    A: Clone + Eq + Hash + fmt::Debug + fmt::Display,
{
    let mut ts = TransitionSystem::with_name(pg.name());
    for t in pg.transitions() {
        ts.add_action(t.action.clone());
    }

    let mut queue: VecDeque<(L, Valuation)> = VecDeque::new();
    let mut visited: FxHashSet<(L, Valuation)> = FxHashSet::default();

    for location in pg.initial_locations() {
        if !pg.has_initializations() {
            seed_initial(
                &mut ts,
                &mut queue,
                &mut visited,
                (location.clone(), Valuation::new()),
            )?;
        }
        for init in pg.initializations() {
            let valuation = initial_valuation(effects, init)?;
            seed_initial(&mut ts, &mut queue, &mut visited, (location.clone(), valuation))?;
        }
    }

    while let Some((location, valuation)) = queue.pop_front() {
        trace!(location = ?location, "expanding state");
        for t in pg.transitions() {
            if t.from != location {
                continue;
            }
            if !eval_guard(guards, &valuation, &t.guard)? {
                continue;
            }
            let Some(next_valuation) =
                apply_effect(effects, &valuation, &t.action.to_string())?
            else {
                continue;
            };
            let next = (t.to.clone(), next_valuation);
            if visited.insert(next.clone()) {
                ts.add_state(next.clone());
                queue.push_back(next.clone());
            }
            ts.add_transition(Transition::new(
                (location.clone(), valuation.clone()),
                t.action.clone(),
                next,
            ))?;
        }
    }

    label_states(&mut ts)?;
    debug!(
        states = ts.states().count(),
        transitions = ts.transitions().count(),
        "program graph unfolded"
    );
    Ok(ts)
}

/// Label every state with its location text and its `variable = value`
/// bindings.
pub(crate) fn label_states<L, A>(
    ts: &mut TransitionSystem<(L, Valuation), A, String>,
) -> SemResult<()>
where
    L: Clone + Eq + Hash + fmt::Debug + PropLabel,
    A: Clone + Eq + Hash + fmt::Debug,
{
    let states: Vec<(L, Valuation)> = ts.states().cloned().collect();
    for state in &states {
        let location_ap = state.0.prop();
        ts.add_atomic_proposition(location_ap.clone());
        ts.add_to_label(state, location_ap)?;
        for (name, value) in state.1.iter() {
            let binding_ap = format!("{name} = {value}");
            ts.add_atomic_proposition(binding_ap.clone());
            ts.add_to_label(state, binding_ap)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Assign, IntGuard};
    use kripke_pg::PgTransition;

    fn counter() -> ProgramGraph<&'static str, String> {
        let mut pg = ProgramGraph::with_name("counter");
        pg.add_locations(["run", "done"]);
        pg.set_initial(&"run", true);
        pg.add_initialization(vec!["x:=0".into()]);
        pg.add_transition(PgTransition::new("run", "x==0", "x:=1".to_owned(), "run"));
        pg.add_transition(PgTransition::new("run", "x==1", "x:=2".to_owned(), "done"));
        pg
    }

    fn extract(
        pg: &ProgramGraph<&'static str, String>,
    ) -> TransitionSystem<(&'static str, Valuation), String, String> {
        let effects: Vec<Box<dyn EffectInterpreter>> = vec![Box::new(Assign)];
        let guards: Vec<Box<dyn GuardEvaluator>> = vec![Box::new(IntGuard)];
        transition_system_from_program_graph(pg, &effects, &guards).unwrap()
    }

    #[test]
    fn unfolds_to_the_reachable_configurations() {
        let ts = extract(&counter());
        let x = |n: i64| Valuation::new().with("x", kripke_eval::Value::Int(n));

        assert_eq!(ts.states().count(), 3);
        assert_eq!(ts.initial_states().collect::<Vec<_>>(), vec![&("run", x(0))]);
        assert!(ts.contains_transition(&Transition::new(
            ("run", x(0)),
            "x:=1".to_owned(),
            ("run", x(1)),
        )));
        assert!(ts.contains_transition(&Transition::new(
            ("run", x(1)),
            "x:=2".to_owned(),
            ("done", x(2)),
        )));
        assert!(ts.is_state_terminal(&("done", x(2))).unwrap());
    }

    #[test]
    fn labels_locations_and_bindings() {
        let ts = extract(&counter());
        let state = ("run", Valuation::new().with("x", kripke_eval::Value::Int(1)));
        let label = ts.label(&state).unwrap();
        assert!(label.contains("run"));
        assert!(label.contains("x = 1"));
        assert_eq!(label.len(), 2);
    }

    #[test]
    fn no_initialization_starts_from_the_empty_valuation() {
        let mut pg = ProgramGraph::with_name("bare");
        pg.add_locations(["a", "b"]);
        pg.set_initial(&"a", true);
        pg.add_transition(PgTransition::new("a", "", "y:=1".to_owned(), "b"));
        let ts = extract(&pg);

        assert_eq!(
            ts.initial_states().collect::<Vec<_>>(),
            vec![&("a", Valuation::new())]
        );
        assert_eq!(ts.states().count(), 2);
    }

    #[test]
    fn each_initialization_seeds_its_own_initial_state() {
        let mut pg = counter();
        pg.add_initialization(vec!["x:=1".into()]);
        let ts = extract(&pg);
        assert_eq!(ts.initial_states().count(), 2);
    }

    #[test]
    fn unrecognized_guard_surfaces_as_an_error() {
        let mut pg = counter();
        pg.add_transition(PgTransition::new("run", "x ~ 7", "x:=1".to_owned(), "run"));
        let effects: Vec<Box<dyn EffectInterpreter>> = vec![Box::new(Assign)];
        let guards: Vec<Box<dyn GuardEvaluator>> = vec![Box::new(IntGuard)];
        let err = transition_system_from_program_graph(&pg, &effects, &guards).unwrap_err();
        assert!(matches!(err, SemanticsError::Eval(_)));
    }

    #[test]
    fn disabled_initialization_action_is_a_model_error() {
        let mut pg: ProgramGraph<&str, String> = ProgramGraph::with_name("stuck");
        pg.add_location("a");
        pg.set_initial(&"a", true);
        pg.add_initialization(vec!["block".into()]);
        let effects: Vec<Box<dyn EffectInterpreter>> = vec![Box::new(Assign)];
        let guards: Vec<Box<dyn GuardEvaluator>> = vec![Box::new(IntGuard)];
        let err = transition_system_from_program_graph(&pg, &effects, &guards).unwrap_err();
        assert!(matches!(err, SemanticsError::InitializationFailed { .. }));
    }
}
