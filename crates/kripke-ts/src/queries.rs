//! Pre/post/reachability queries and determinism predicates.

use crate::transition_system::{TransitionSystem, TsError, TsResult};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{
    fn require_state(&self, state: &S) -> TsResult<()> {
        if self.contains_state(state) {
            Ok(())
        } else {
            Err(TsError::StateNotFound(format!("{state:?}")))
        }
    }

    /// Successors without the membership check; callers guarantee `state`
    /// is declared.
    fn post_raw(&self, state: &S) -> FxHashSet<S> {
        self.transitions()
            .filter(|t| t.from == *state)
            .map(|t| t.to.clone())
            .collect()
    }

    /// All states related to `state` by an outgoing transition.
    pub fn post(&self, state: &S) -> TsResult<FxHashSet<S>> {
        self.require_state(state)?;
        Ok(self.post_raw(state))
    }

    /// Successors of `state` under transitions labeled `action`.
    pub fn post_on(&self, state: &S, action: &A) -> TsResult<FxHashSet<S>> {
        self.require_state(state)?;
        Ok(self
            .transitions()
            .filter(|t| t.from == *state && t.action == *action)
            .map(|t| t.to.clone())
            .collect())
    }

    /// Union of `post` over a state set.
    pub fn post_set<'a>(
        &self,
        states: impl IntoIterator<Item = &'a S>,
    ) -> TsResult<FxHashSet<S>>
    where
        S: 'a,
    {
        let mut out = FxHashSet::default();
        for s in states {
            out.extend(self.post(s)?);
        }
        Ok(out)
    }

    /// Union of `post_on` over a state set.
    pub fn post_set_on<'a>(
        &self,
        states: impl IntoIterator<Item = &'a S>,
        action: &A,
    ) -> TsResult<FxHashSet<S>>
    where
        S: 'a,
    {
        let mut out = FxHashSet::default();
        for s in states {
            out.extend(self.post_on(s, action)?);
        }
        Ok(out)
    }

    /// All states related to `state` by an incoming transition.
    pub fn pre(&self, state: &S) -> TsResult<FxHashSet<S>> {
        self.require_state(state)?;
        Ok(self
            .transitions()
            .filter(|t| t.to == *state)
            .map(|t| t.from.clone())
            .collect())
    }

    /// Predecessors of `state` under transitions labeled `action`.
    pub fn pre_on(&self, state: &S, action: &A) -> TsResult<FxHashSet<S>> {
        self.require_state(state)?;
        Ok(self
            .transitions()
            .filter(|t| t.to == *state && t.action == *action)
            .map(|t| t.from.clone())
            .collect())
    }

    /// Union of `pre` over a state set.
    pub fn pre_set<'a>(&self, states: impl IntoIterator<Item = &'a S>) -> TsResult<FxHashSet<S>>
    where
        S: 'a,
    {
        let mut out = FxHashSet::default();
        for s in states {
            out.extend(self.pre(s)?);
        }
        Ok(out)
    }

    /// Union of `pre_on` over a state set.
    pub fn pre_set_on<'a>(
        &self,
        states: impl IntoIterator<Item = &'a S>,
        action: &A,
    ) -> TsResult<FxHashSet<S>>
    where
        S: 'a,
    {
        let mut out = FxHashSet::default();
        for s in states {
            out.extend(self.pre_on(s, action)?);
        }
        Ok(out)
    }

    /// The least fixed point of the initial-state set under repeated
    /// `post`: every state reachable from some initial state, the initial
    /// states included.
    pub fn reach(&self) -> FxHashSet<S> {
        let mut reached: FxHashSet<S> = self.initial_states().cloned().collect();
        let mut frontier: Vec<S> = reached.iter().cloned().collect();
        while let Some(state) = frontier.pop() {
            for next in self.post_raw(&state) {
                if reached.insert(next.clone()) {
                    frontier.push(next);
                }
            }
        }
        reached
    }

    /// A state is terminal when it has no successors, or its only
    /// successor is itself.
    pub fn is_state_terminal(&self, state: &S) -> TsResult<bool> {
        let post = self.post(state)?;
        Ok(post.is_empty() || (post.len() == 1 && post.contains(state)))
    }

    /// At most one initial state, and no state with two outgoing
    /// transitions sharing an action.
    pub fn is_action_deterministic(&self) -> bool {
        if self.initial_states().count() > 1 {
            return false;
        }
        let mut seen: FxHashSet<(&S, &A)> = FxHashSet::default();
        // Two distinct set members with equal (from, action) necessarily
        // differ in their target.
        self.transitions().all(|t| seen.insert((&t.from, &t.action)))
    }

    /// At most one initial state, and no state with two successors
    /// carrying identical label sets.
    pub fn is_ap_deterministic(&self) -> TsResult<bool>
    where
        P: Ord,
    {
        if self.initial_states().count() > 1 {
            return Ok(false);
        }
        for state in self.states() {
            let mut seen: FxHashSet<BTreeSet<&P>> = FxHashSet::default();
            for next in self.post_raw(state) {
                let label: BTreeSet<&P> = self.label(&next)?.iter().collect();
                if !seen.insert(label) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition_system::Transition;

    /// s0 -> s1 -> s2, s1 -> s1, plus a detached state s3.
    fn chain() -> TransitionSystem<u32, &'static str, &'static str> {
        let mut ts = TransitionSystem::with_name("chain");
        ts.add_states([0, 1, 2, 3]);
        ts.add_actions(["a", "b"]);
        ts.set_initial(&0, true).unwrap();
        ts.add_transition(Transition::new(0, "a", 1)).unwrap();
        ts.add_transition(Transition::new(1, "b", 1)).unwrap();
        ts.add_transition(Transition::new(1, "a", 2)).unwrap();
        ts
    }

    #[test]
    fn post_and_pre_follow_the_relation() {
        let ts = chain();
        assert_eq!(ts.post(&0).unwrap(), [1].into_iter().collect());
        assert_eq!(ts.post(&1).unwrap(), [1, 2].into_iter().collect());
        assert_eq!(ts.pre(&1).unwrap(), [0, 1].into_iter().collect());
        assert_eq!(ts.post_on(&1, &"b").unwrap(), [1].into_iter().collect());
        assert!(ts.pre_on(&2, &"b").unwrap().is_empty());
        assert_eq!(
            ts.post_set([&0, &1]).unwrap(),
            [1, 2].into_iter().collect()
        );
    }

    #[test]
    fn queries_reject_undeclared_states() {
        let ts = chain();
        assert!(matches!(ts.post(&9), Err(TsError::StateNotFound(_))));
        assert!(matches!(ts.pre(&9), Err(TsError::StateNotFound(_))));
        assert!(matches!(
            ts.post_set([&0, &9]),
            Err(TsError::StateNotFound(_))
        ));
    }

    #[test]
    fn post_of_pre_contains_the_state_when_it_has_a_predecessor() {
        let ts = chain();
        for s in [1u32, 2] {
            let pre = ts.pre(&s).unwrap();
            assert!(!pre.is_empty());
            assert!(ts.post_set(pre.iter()).unwrap().contains(&s));
        }
    }

    #[test]
    fn reach_includes_initial_states_and_closes_under_post() {
        let ts = chain();
        assert_eq!(ts.reach(), [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn reach_without_initial_states_is_empty() {
        let mut ts = chain();
        ts.set_initial(&0, false).unwrap();
        assert!(ts.reach().is_empty());
    }

    #[test]
    fn terminal_states() {
        let mut ts = chain();
        // no outgoing transitions
        assert!(ts.is_state_terminal(&2).unwrap());
        assert!(ts.is_state_terminal(&3).unwrap());
        // successors beyond the self-loop
        assert!(!ts.is_state_terminal(&1).unwrap());
        assert!(!ts.is_state_terminal(&0).unwrap());
        // only a self-loop left
        ts.remove_transition(&Transition::new(1, "a", 2));
        assert!(ts.is_state_terminal(&1).unwrap());
        assert!(matches!(
            ts.is_state_terminal(&9),
            Err(TsError::StateNotFound(_))
        ));
    }

    #[test]
    fn action_determinism() {
        let mut ts = chain();
        assert!(ts.is_action_deterministic());
        ts.add_transition(Transition::new(1, "a", 3)).unwrap();
        assert!(!ts.is_action_deterministic());
    }

    #[test]
    fn two_initial_states_break_both_determinisms() {
        let mut ts = chain();
        ts.set_initial(&3, true).unwrap();
        assert!(!ts.is_action_deterministic());
        assert!(!ts.is_ap_deterministic().unwrap());
    }

    #[test]
    fn ap_determinism_compares_successor_labels() {
        let mut ts = chain();
        ts.add_atomic_proposition("p");
        // successors of 1 are {1, 2}: identically (un)labeled -> not AP-deterministic
        assert!(!ts.is_ap_deterministic().unwrap());
        ts.add_to_label(&2, "p").unwrap();
        assert!(ts.is_ap_deterministic().unwrap());
    }
}
