//! Verification of ω-regular properties via accepting-lasso search.

use crate::automaton::Automaton;
use crate::product::product;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, info};

use kripke_ts::{TransitionSystem, TsResult};

/// The outcome of verifying an ω-regular property. A violation is
/// witnessed by a lasso: a finite `prefix` from an initial state followed
/// by a non-trivial `cycle` through an accepting product state, both
/// projected to the original transition system's states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult<S> {
    Succeeded,
    Failed { prefix: Vec<S>, cycle: Vec<S> },
}

impl<S> VerificationResult<S> {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationResult::Succeeded)
    }
}

/// Per-node successor lists of the product, borrowed from its transitions.
type Adjacency<'a, N> = FxHashMap<&'a N, SmallVec<[&'a N; 4]>>;

/// Decide whether `ts` satisfies the property automaton `aut`.
///
/// The property is violated iff the synchronous product contains a
/// reachable accepting lasso: an accepting product state with a cycle back
/// to itself and a path from some product-initial state. Which witness is
/// reported is an arbitrary but deterministic tie-break; only its
/// existence carries meaning.
pub fn verify_omega_regular_property<S, A, P, Q>(
    ts: &TransitionSystem<S, A, P>,
    aut: &Automaton<Q, P>,
) -> TsResult<VerificationResult<S>>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Ord + Hash + fmt::Debug,
    Q: Clone + Eq + Hash + fmt::Debug,
{
    let prod = product(ts, aut)?;

    let mut successors: Adjacency<(S, Q)> = FxHashMap::default();
    for t in prod.transitions() {
        successors.entry(&t.from).or_default().push(&t.to);
    }

    let initial: Vec<&(S, Q)> = prod.initial_states().collect();
    let accepting = prod.states().filter(|s| aut.is_accepting(&s.1));
    debug!(
        product_states = prod.states().count(),
        "searching for an accepting lasso"
    );

    for state in accepting {
        let Some(cycle) = path_between(&successors, state, state) else {
            continue;
        };
        for &init in &initial {
            if let Some(prefix) = path_between(&successors, init, state) {
                info!("accepting lasso found, property violated");
                return Ok(VerificationResult::Failed {
                    prefix: prefix.iter().map(|s| s.0.clone()).collect(),
                    cycle: cycle.iter().map(|s| s.0.clone()).collect(),
                });
            }
        }
    }

    info!("no accepting lasso, property holds");
    Ok(VerificationResult::Succeeded)
}

fn successors_of<'s, 'a, N: Eq + Hash>(
    successors: &'s Adjacency<'a, N>,
    node: &N,
) -> &'s [&'a N] {
    successors.get(node).map_or(&[], |list| list.as_slice())
}

/// First path from `from` whose next hop is `to`, as an explicit-stack
/// depth-first search with a visited set. The returned path runs from
/// `from` up to and including the predecessor of `to`; a direct edge
/// yields `[from]`. Searching `from == to` finds cycles of length >= 1.
fn path_between<'a, N: Eq + Hash>(
    successors: &Adjacency<'a, N>,
    from: &'a N,
    to: &'a N,
) -> Option<Vec<&'a N>> {
    let mut path: Vec<&'a N> = vec![from];
    let mut stack = vec![successors_of(successors, from).iter()];
    let mut visited: FxHashSet<&N> = FxHashSet::default();

    while let Some(frame) = stack.last_mut() {
        match frame.next() {
            Some(&next) => {
                if next == to {
                    return Some(path);
                }
                if visited.insert(next) {
                    path.push(next);
                    stack.push(successors_of(successors, next).iter());
                }
            }
            None => {
                path.pop();
                stack.pop();
            }
        }
    }
    None
}
