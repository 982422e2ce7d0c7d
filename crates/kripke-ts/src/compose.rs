//! Interleaving composition of transition systems.

use crate::transition_system::{Transition, TransitionSystem, TsResult};
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Interleave two transition systems with no synchronization: every
/// transition of either side fires independently of the other.
pub fn interleave<S1, S2, A, P>(
    ts1: &TransitionSystem<S1, A, P>,
    ts2: &TransitionSystem<S2, A, P>,
) -> TsResult<TransitionSystem<(S1, S2), A, P>>
where
    S1: Clone + Eq + Hash + fmt::Debug,
    S2: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    interleave_with_handshake(ts1, ts2, &FxHashSet::default())
}

/// Interleave two transition systems, synchronizing on the handshake
/// actions: a handshake action fires only as a joint transition backed by
/// matching moves in both systems. Unreachable pair states are pruned from
/// the result.
pub fn interleave_with_handshake<S1, S2, A, P>(
    ts1: &TransitionSystem<S1, A, P>,
    ts2: &TransitionSystem<S2, A, P>,
    handshake: &FxHashSet<A>,
) -> TsResult<TransitionSystem<(S1, S2), A, P>>
where
    S1: Clone + Eq + Hash + fmt::Debug,
    S2: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    let mut ts = build_interleaving(ts1, ts2, handshake)?;
    ts.remove_unreachable_states()?;
    debug!(
        states = ts.states().count(),
        transitions = ts.transitions().count(),
        "interleaving built"
    );
    Ok(ts)
}

/// The full cross-product construction, before unreachable-state pruning.
fn build_interleaving<S1, S2, A, P>(
    ts1: &TransitionSystem<S1, A, P>,
    ts2: &TransitionSystem<S2, A, P>,
    handshake: &FxHashSet<A>,
) -> TsResult<TransitionSystem<(S1, S2), A, P>>
where
    S1: Clone + Eq + Hash + fmt::Debug,
    S2: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    let mut ts = TransitionSystem::with_name(format!("{}|||{}", ts1.name(), ts2.name()));

    for s1 in ts1.states() {
        for s2 in ts2.states() {
            ts.add_state((s1.clone(), s2.clone()));
        }
    }
    ts.add_actions(ts1.actions().cloned());
    ts.add_actions(ts2.actions().cloned());
    ts.add_atomic_propositions(ts1.atomic_propositions().cloned());
    ts.add_atomic_propositions(ts2.atomic_propositions().cloned());

    for s1 in ts1.initial_states() {
        for s2 in ts2.initial_states() {
            ts.set_initial(&(s1.clone(), s2.clone()), true)?;
        }
    }

    // Independent moves: each side's non-handshake transitions are lifted
    // against every state of the other side.
    for t in ts1.transitions().filter(|t| !handshake.contains(&t.action)) {
        for s2 in ts2.states() {
            ts.add_transition(Transition::new(
                (t.from.clone(), s2.clone()),
                t.action.clone(),
                (t.to.clone(), s2.clone()),
            ))?;
        }
    }
    for t in ts2.transitions().filter(|t| !handshake.contains(&t.action)) {
        for s1 in ts1.states() {
            ts.add_transition(Transition::new(
                (s1.clone(), t.from.clone()),
                t.action.clone(),
                (s1.clone(), t.to.clone()),
            ))?;
        }
    }

    // Joint moves: a handshake action fires iff both systems move on it
    // simultaneously.
    for t1 in ts1.transitions().filter(|t| handshake.contains(&t.action)) {
        for t2 in ts2.transitions().filter(|t| t.action == t1.action) {
            ts.add_transition(Transition::new(
                (t1.from.clone(), t2.from.clone()),
                t1.action.clone(),
                (t1.to.clone(), t2.to.clone()),
            ))?;
        }
    }

    // A pair state carries the union of its components' labels.
    for s1 in ts1.states() {
        for s2 in ts2.states() {
            let pair = (s1.clone(), s2.clone());
            for p in ts1.label(s1)? {
                ts.add_to_label(&pair, p.clone())?;
            }
            for p in ts2.label(s2)? {
                ts.add_to_label(&pair, p.clone())?;
            }
        }
    }

    Ok(ts)
}
