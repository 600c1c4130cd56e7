//! Deciding satisfiability from the strongly connected components.
use log::debug;
use partial_ref::{partial, PartialRef};

use gridsat_formula::Lit;

use crate::context::{Context, SccsP, SolverStateP};
use crate::scc::Sccs;
use crate::state::SatState;

/// Whether the 2-CNF formula underlying an implication graph is satisfiable.
///
/// The formula is unsatisfiable iff a literal and its complement share a component. With
/// `fast_paths` a single component is unsatisfiable and one component per literal is satisfiable
/// without looking at the components themselves.
pub fn decide(sccs: &Sccs, lit_count: usize, fast_paths: bool) -> bool {
    if fast_paths {
        if sccs.len() == 1 && lit_count > 1 {
            return false;
        }
        if sccs.len() == lit_count {
            return true;
        }
    }

    (0..lit_count)
        .step_by(2)
        .map(Lit::from_code)
        .all(|lit| sccs.component_of(lit) != sccs.component_of(!lit))
}

/// Decide the current case from its components.
pub fn decide_case(mut ctx: partial!(Context, mut SolverStateP, SccsP), fast_paths: bool) {
    let lit_count = ctx.part(SolverStateP).grid.lit_count();
    let sccs = ctx.part(SccsP);

    let sat = decide(sccs, lit_count, fast_paths);

    debug!(
        "{} components for {} literals, {}",
        sccs.len(),
        lit_count,
        if sat { "satisfiable" } else { "unsatisfiable" }
    );

    ctx.part_mut(SolverStateP).sat_state = if sat { SatState::Sat } else { SatState::Unsat };
}
