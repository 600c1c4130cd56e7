//! Orientation of every segment for a satisfiable case.
use partial_ref::{partial, PartialRef};

use gridsat_formula::{Lit, Var};

use crate::context::{Context, SccsP, SolverStateP, UnitsP};
use crate::state::SatState;

/// Build a model of the current case, one literal per variable.
///
/// Variables fixed by a unit take that unit's value. Any other variable `x` is positive iff the
/// component of `x` was completed before the component of `!x`. Without components, i.e. when no
/// disjunction remained after propagation, unconstrained variables are positive.
///
/// Only valid if the solver state is SAT.
pub fn extract_model(ctx: partial!(Context, SccsP, SolverStateP, UnitsP)) -> Vec<Lit> {
    let state = ctx.part(SolverStateP);
    debug_assert_eq!(state.sat_state, SatState::Sat);

    let units = ctx.part(UnitsP);
    let sccs = ctx.part(SccsP);

    (0..state.grid.var_count())
        .map(|index| {
            let var = Var::from_index(index);
            let positive = var.positive();
            if units.is_known(positive) {
                positive
            } else if units.is_known(!positive) {
                !positive
            } else if sccs.is_empty() {
                positive
            } else {
                var.lit(sccs.component_of(positive) < sccs.component_of(!positive))
            }
        })
        .collect()
}
