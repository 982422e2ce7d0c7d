//! Unfolding a channel system into a transition system.

use crate::label::PropLabel;
use crate::unfold::{initial_valuation, label_states, seed_initial};
use crate::SemResult;
use kripke_eval::{
    apply_effect, channel_of, eval_guard, EffectInterpreter, GuardEvaluator,
    RendezvousInterpreter, Valuation,
};
use kripke_pg::ChannelSystem;
use kripke_ts::{Transition, TransitionSystem};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

type CsState<L> = (Vec<L>, Valuation);

/// Unfold a channel system into a transition system whose states pair the
/// per-process location vector with the shared valuation.
///
/// A non-one-sided action with a satisfied guard fires asynchronously,
/// advancing only its own process. A one-sided action (`chan!...` /
/// `chan?...`, as judged by the rendezvous capability) fires only as a
/// rendezvous with a complementary one-sided action of a higher-indexed
/// process on the same channel, producing a composite action joined with
/// `|` and the combined valuation from the rendezvous capability. A `None`
/// effect drops the candidate step in either case.
pub fn transition_system_from_channel_system<L>(
    cs: &ChannelSystem<L>,
    effects: &[Box<dyn EffectInterpreter>],
    guards: &[Box<dyn GuardEvaluator>],
    rendezvous: &dyn RendezvousInterpreter,
) -> SemResult<TransitionSystem<CsState<L>, String, String>>
where
    L: Clone + Eq + Hash + fmt::Debug + PropLabel,
{
    let mut ts = TransitionSystem::with_name(cs.name());

    // One valuation per declared initialization sequence, from any process.
    let mut valuations: FxHashSet<Valuation> = FxHashSet::default();
    for pg in cs.graphs() {
        for init in pg.initializations() {
            valuations.insert(initial_valuation(effects, init)?);
        }
    }

    // Cross product of per-process initial locations.
    let mut location_vectors: Vec<Vec<L>> = vec![Vec::new()];
    for pg in cs.graphs() {
        let mut extended = Vec::new();
        for prefix in &location_vectors {
            for location in pg.initial_locations() {
                let mut locations = prefix.clone();
                locations.push(location.clone());
                extended.push(locations);
            }
        }
        location_vectors = extended;
    }

    let mut queue: VecDeque<CsState<L>> = VecDeque::new();
    let mut visited: FxHashSet<CsState<L>> = FxHashSet::default();
    for locations in location_vectors {
        if valuations.is_empty() {
            seed_initial(&mut ts, &mut queue, &mut visited, (locations, Valuation::new()))?;
        } else {
            for valuation in &valuations {
                seed_initial(
                    &mut ts,
                    &mut queue,
                    &mut visited,
                    (locations.clone(), valuation.clone()),
                )?;
            }
        }
    }

    while let Some(state) = queue.pop_front() {
        trace!(locations = ?state.0, "expanding state");
        let (locations, valuation) = &state;
        for (i, pg) in cs.graphs().iter().enumerate() {
            for t in pg.transitions().filter(|t| t.from == locations[i]) {
                if !eval_guard(guards, valuation, &t.guard)? {
                    continue;
                }
                if !rendezvous.is_one_sided(&t.action) {
                    // Asynchronous step: only process i moves.
                    let Some(next_valuation) = apply_effect(effects, valuation, &t.action)?
                    else {
                        continue;
                    };
                    let mut next_locations = locations.clone();
                    next_locations[i] = t.to.clone();
                    push_successor(
                        &mut ts,
                        &mut queue,
                        &mut visited,
                        &state,
                        t.action.clone(),
                        (next_locations, next_valuation),
                    )?;
                    continue;
                }

                // Rendezvous: search higher-indexed processes for a
                // complementary one-sided action on the same channel.
                let channel = channel_of(&t.action);
                let complement = if t.action.contains('?') { '!' } else { '?' };
                for (j, partner) in cs.graphs().iter().enumerate().skip(i + 1) {
                    for u in partner.transitions().filter(|u| u.from == locations[j]) {
                        if !rendezvous.is_one_sided(&u.action)
                            || !u.action.contains(complement)
                            || channel_of(&u.action) != channel
                        {
                            continue;
                        }
                        if !eval_guard(guards, valuation, &u.guard)? {
                            continue;
                        }
                        let composite = format!("{}|{}", t.action, u.action);
                        let Some(next_valuation) = rendezvous.apply(valuation, &composite)
                        else {
                            continue;
                        };
                        let mut next_locations = locations.clone();
                        next_locations[i] = t.to.clone();
                        next_locations[j] = u.to.clone();
                        push_successor(
                            &mut ts,
                            &mut queue,
                            &mut visited,
                            &state,
                            composite,
                            (next_locations, next_valuation),
                        )?;
                    }
                }
            }
        }
    }

    label_states(&mut ts)?;
    debug!(
        processes = cs.len(),
        states = ts.states().count(),
        transitions = ts.transitions().count(),
        "channel system unfolded"
    );
    Ok(ts)
}

/// Record a discovered step: declare the action and target state, enqueue
/// the target if new, and insert the transition.
fn push_successor<L>(
    ts: &mut TransitionSystem<CsState<L>, String, String>,
    queue: &mut VecDeque<CsState<L>>,
    visited: &mut FxHashSet<CsState<L>>,
    from: &CsState<L>,
    action: String,
    to: CsState<L>,
) -> SemResult<()>
where
    L: Clone + Eq + Hash + fmt::Debug,
{
    ts.add_action(action.clone());
    if visited.insert(to.clone()) {
        ts.add_state(to.clone());
        queue.push_back(to.clone());
    }
    ts.add_transition(Transition::new(from.clone(), action, to))?;
    Ok(())
}
