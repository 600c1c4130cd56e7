//! Unit facts.
use log::trace;
use partial_ref::{partial, PartialRef};

use gridsat_formula::Lit;

use crate::context::{Context, SolverStateP, UnitsP};
use crate::state::SatState;

/// Literals known to be true.
#[derive(Default)]
pub struct Units {
    /// A boolean for each literal, set once the literal is recorded.
    known: Vec<bool>,
    /// Recorded units that were not propagated yet.
    worklist: Vec<Lit>,
    /// All recorded units, in recording order.
    recorded: Vec<Lit>,
}

impl Units {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.known.resize(count * 2, false);
    }

    /// Whether the literal was recorded as a unit.
    pub fn is_known(&self, lit: Lit) -> bool {
        self.known[lit.code()]
    }

    /// All recorded units, in recording order.
    pub fn recorded(&self) -> &[Lit] {
        &self.recorded
    }

    /// Take the next unit to propagate.
    pub fn pop(&mut self) -> Option<Lit> {
        self.worklist.pop()
    }

    /// Drop all pending units without propagating them.
    pub fn clear_worklist(&mut self) {
        self.worklist.clear();
    }
}

/// Record a literal as known to be true.
///
/// Recording a literal whose complement is already known makes the case unsatisfiable. Recording
/// an already known literal does nothing.
pub fn record_unit(mut ctx: partial!(Context, mut SolverStateP, mut UnitsP), lit: Lit) {
    let (units, mut ctx) = ctx.split_part_mut(UnitsP);

    if units.is_known(lit) {
        return;
    }

    if units.is_known(!lit) {
        trace!("unit {:?} contradicts recorded unit {:?}", lit, !lit);
        ctx.part_mut(SolverStateP).sat_state = SatState::Unsat;
        return;
    }

    trace!("recorded unit {:?}", lit);
    units.known[lit.code()] = true;
    units.worklist.push(lit);
    units.recorded.push(lit);
}
