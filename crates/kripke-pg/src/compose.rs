//! Interleaving composition of program graphs.

use crate::program_graph::{PgTransition, ProgramGraph};
use std::hash::Hash;

/// Interleave two program graphs over pair locations. Transitions are
/// lifted unconditionally against every opposite-side location; there is
/// no action synchronization at the graph level (channel systems defer
/// synchronization to semantic extraction). Initialization sequences are
/// concatenated pairwise.
pub fn interleave<L1, L2, A>(
    pg1: &ProgramGraph<L1, A>,
    pg2: &ProgramGraph<L2, A>,
) -> ProgramGraph<(L1, L2), A>
where
    L1: Clone + Eq + Hash,
    L2: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    let mut pg = ProgramGraph::with_name(format!("{}|||{}", pg1.name(), pg2.name()));

    for l1 in pg1.locations() {
        for l2 in pg2.locations() {
            pg.add_location((l1.clone(), l2.clone()));
        }
    }
    for l1 in pg1.initial_locations() {
        for l2 in pg2.initial_locations() {
            pg.set_initial(&(l1.clone(), l2.clone()), true);
        }
    }

    for i1 in pg1.initializations() {
        for i2 in pg2.initializations() {
            let mut init = i1.clone();
            init.extend(i2.iter().cloned());
            pg.add_initialization(init);
        }
    }

    for t in pg1.transitions() {
        for l2 in pg2.locations() {
            pg.add_transition(PgTransition::new(
                (t.from.clone(), l2.clone()),
                t.guard.clone(),
                t.action.clone(),
                (t.to.clone(), l2.clone()),
            ));
        }
    }
    for t in pg2.transitions() {
        for l1 in pg1.locations() {
            pg.add_transition(PgTransition::new(
                (l1.clone(), t.from.clone()),
                t.guard.clone(),
                t.action.clone(),
                (l1.clone(), t.to.clone()),
            ));
        }
    }

    pg
}
