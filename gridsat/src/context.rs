//! Central per-case data structure.
use partial_ref::{part, partial, PartialRef, PartialRefTarget};

use gridsat_formula::Grid;

use crate::graph::ImplicationGraph;
use crate::normalize::Disjunctions;
use crate::scc::Sccs;
use crate::state::SolverState;
use crate::units::Units;

/// Part declarations for the [`Context`] struct.
mod parts {
    use super::*;

    part!(pub DisjunctionsP: Disjunctions);
    part!(pub ImplGraphP: ImplicationGraph);
    part!(pub SccsP: Sccs);
    part!(pub SolverStateP: SolverState);
    part!(pub UnitsP: Units);
}

pub use parts::*;

/// Central per-case data structure.
///
/// This struct contains all data derived from a single case. A fresh context is created for every
/// case and dropped once the case is decided. Functions operating on multiple fields of the
/// context use partial references provided by the `partial_ref` crate.
#[derive(PartialRefTarget, Default)]
pub struct Context {
    #[part = "DisjunctionsP"]
    disjunctions: Disjunctions,
    #[part = "ImplGraphP"]
    impl_graph: ImplicationGraph,
    #[part = "SccsP"]
    sccs: Sccs,
    #[part = "SolverStateP"]
    solver_state: SolverState,
    #[part = "UnitsP"]
    units: Units,
}

/// Size the per-literal unit structures for the given grid.
///
/// The implication graph is only sized once a case needs it, see
/// [`build_graph`](crate::graph::build_graph).
pub fn set_grid(mut ctx: partial!(Context, mut SolverStateP, mut UnitsP), grid: Grid) {
    ctx.part_mut(UnitsP).set_var_count(grid.var_count());
    ctx.part_mut(SolverStateP).grid = grid;
}
