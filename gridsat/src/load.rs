//! Loading the trips of a case.
use partial_ref::{partial, PartialRef};

use gridsat_formula::Trip;

use crate::clause::{build_clause, ClauseOutcome};
use crate::context::{Context, DisjunctionsP, SolverStateP, UnitsP};
use crate::normalize::distribute;
use crate::state::SatState;
use crate::units::record_unit;

/// Adds the constraint of a trip to the current case.
///
/// Units are recorded for later propagation, corner route alternatives are distributed into
/// binary disjunctions right away. Does nothing once the case is decided.
pub fn load_trip(
    mut ctx: partial!(Context, mut DisjunctionsP, mut SolverStateP, mut UnitsP),
    trip: &Trip,
) {
    if ctx.part(SolverStateP).sat_state != SatState::Unknown {
        return;
    }

    let grid = ctx.part(SolverStateP).grid;

    match build_clause(&grid, trip) {
        ClauseOutcome::None => (),
        ClauseOutcome::Unit(lit) => record_unit(ctx.borrow(), lit),
        ClauseOutcome::Binary4(lits) => {
            let disjunctions = ctx.part_mut(DisjunctionsP);
            for &clause in distribute(lits).iter() {
                disjunctions.add(clause);
            }
        }
    }
}
