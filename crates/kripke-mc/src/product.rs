//! Synchronous product of a transition system with a property automaton.

use crate::automaton::Automaton;
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use tracing::debug;

use kripke_ts::{Transition, TransitionSystem, TsResult};

/// Build the synchronous product of `ts` and `aut`.
///
/// The automaton observes the label of the state being *entered*: an
/// initial product state `(s, q')` exists for every TS-initial `s`,
/// automaton-initial `q`, and `q'` in `delta(q, label(s))`; a product
/// transition `(s, q) -a-> (s', q')` exists for every TS transition
/// `s -a-> s'` and `q'` in `delta(q, label(s'))`. Only pairs reachable
/// from the initial seeds are constructed. Every product state is labeled
/// with its automaton component.
pub fn product<S, A, P, Q>(
    ts: &TransitionSystem<S, A, P>,
    aut: &Automaton<Q, P>,
) -> TsResult<TransitionSystem<(S, Q), A, Q>>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Ord + Hash + fmt::Debug,
    Q: Clone + Eq + Hash + fmt::Debug,
{
    let mut prod: TransitionSystem<(S, Q), A, Q> =
        TransitionSystem::with_name(format!("{}(x)property", ts.name()));

    for s in ts.initial_states() {
        let label = symbol_of(ts, s)?;
        for q in aut.initial_states() {
            let Some(next) = aut.next_states(q, &label) else {
                continue;
            };
            for q2 in next {
                let state = (s.clone(), q2.clone());
                prod.add_state(state.clone());
                prod.set_initial(&state, true)?;
            }
        }
    }

    let mut queue: VecDeque<(S, Q)> = prod.initial_states().cloned().collect();
    while let Some((s, q)) = queue.pop_front() {
        for t in ts.transitions().filter(|t| t.from == s) {
            let label = symbol_of(ts, &t.to)?;
            let Some(next) = aut.next_states(&q, &label) else {
                continue;
            };
            for q2 in next {
                let state = (t.to.clone(), q2.clone());
                if !prod.contains_state(&state) {
                    prod.add_state(state.clone());
                    queue.push_back(state.clone());
                }
                prod.add_action(t.action.clone());
                prod.add_transition(Transition::new(
                    (s.clone(), q.clone()),
                    t.action.clone(),
                    state,
                ))?;
            }
        }
    }

    // The automaton component of a pair is its sole atomic proposition.
    let states: Vec<(S, Q)> = prod.states().cloned().collect();
    for state in states {
        prod.add_atomic_proposition(state.1.clone());
        prod.add_to_label(&state, state.1.clone())?;
    }

    debug!(
        states = prod.states().count(),
        transitions = prod.transitions().count(),
        "product constructed"
    );
    Ok(prod)
}

/// The label set of a TS state as the ordered set the automaton
/// transition relation is keyed by.
fn symbol_of<S, A, P>(
    ts: &TransitionSystem<S, A, P>,
    state: &S,
) -> TsResult<BTreeSet<P>>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Ord + Hash + fmt::Debug,
{
    Ok(ts.label(state)?.iter().cloned().collect())
}
