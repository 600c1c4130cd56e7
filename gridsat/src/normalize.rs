//! Conversion to 2-CNF and simplification using unit facts.
use log::trace;
use partial_ref::{partial, PartialRef};
use rustc_hash::FxHashSet as HashSet;
use vec_mut_scan::VecMutScan;

use gridsat_formula::Lit;

use crate::context::{Context, DisjunctionsP, SolverStateP, UnitsP};
use crate::state::SatState;
use crate::units::record_unit;

/// Binary disjunctions of the current case.
///
/// A disjunction `[p, q]` means `p ∨ q`. Disjunctions are kept in insertion order, adding a
/// disjunction that is already present, in either literal order, does nothing.
#[derive(Default)]
pub struct Disjunctions {
    clauses: Vec<[Lit; 2]>,
    /// Every added disjunction with its literals sorted.
    seen: HashSet<[Lit; 2]>,
}

impl Disjunctions {
    /// Add a disjunction unless it or its swapped version is present.
    ///
    /// Returns whether the disjunction was new.
    pub fn add(&mut self, lits: [Lit; 2]) -> bool {
        let key = if lits[0] <= lits[1] {
            lits
        } else {
            [lits[1], lits[0]]
        };
        if self.seen.insert(key) {
            self.clauses.push(lits);
            true
        } else {
            false
        }
    }

    /// Remaining disjunctions.
    pub fn clauses(&self) -> &[[Lit; 2]] {
        &self.clauses
    }

    /// Number of remaining disjunctions.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Distribute `(a ∧ b) ∨ (c ∧ d)` into `(a ∨ c) ∧ (a ∨ d) ∧ (b ∨ c) ∧ (b ∨ d)`.
pub fn distribute([a, b, c, d]: [Lit; 4]) -> [[Lit; 2]; 4] {
    [[a, c], [a, d], [b, c], [b, d]]
}

/// Propagate recorded units until no pending unit is left or a contradiction is found.
///
/// A disjunction containing a true unit is satisfied and removed. A disjunction containing the
/// complement of a unit is removed and its other literal becomes a new unit.
///
/// The outcome does not depend on the order in which units are processed: the remaining
/// disjunctions are exactly those without a literal whose variable ends up fixed.
pub fn propagate_units(
    mut ctx: partial!(Context, mut DisjunctionsP, mut SolverStateP, mut UnitsP),
) {
    while ctx.part(SolverStateP).sat_state == SatState::Unknown {
        let unit = match ctx.part_mut(UnitsP).pop() {
            Some(unit) => unit,
            None => break,
        };

        let (disjunctions, mut ctx) = ctx.split_part_mut(DisjunctionsP);
        let mut scan = VecMutScan::new(&mut disjunctions.clauses);

        while let Some(clause) = scan.next() {
            let [p, q] = *clause;
            if p == unit || q == unit {
                clause.remove();
            } else if p == !unit || q == !unit {
                let other = if p == !unit { q } else { p };
                clause.remove();
                trace!("{:?} forces {:?}", unit, other);
                record_unit(ctx.borrow(), other);
                if ctx.part(SolverStateP).sat_state != SatState::Unknown {
                    break;
                }
            }
        }
    }
}

/// Turn every recorded unit `u` into the disjunction `u ∨ u` instead of propagating it.
pub fn units_as_disjunctions(mut ctx: partial!(Context, mut DisjunctionsP, mut UnitsP)) {
    let (units, mut ctx) = ctx.split_part_mut(UnitsP);
    for &unit in units.recorded() {
        ctx.part_mut(DisjunctionsP).add([unit, unit]);
    }
    units.clear_worklist();
}

#[cfg(test)]
mod tests {
    use super::*;

    use partial_ref::IntoPartialRefMut;
    use proptest::{array, collection, prelude::*};

    use gridsat_formula::{lit::strategy::lit as lit_strategy, Grid, Var};

    use crate::context::set_grid;

    fn lit(index: usize, polarity: bool) -> Lit {
        Var::from_index(index).lit(polarity)
    }

    #[test]
    fn symmetric_duplicates() {
        let mut disjunctions = Disjunctions::default();
        let (a, b) = (lit(0, true), lit(1, false));

        assert!(disjunctions.add([a, b]));
        assert!(!disjunctions.add([a, b]));
        assert!(!disjunctions.add([b, a]));
        assert!(disjunctions.add([!a, b]));
        assert_eq!(disjunctions.clauses(), &[[a, b], [!a, b]]);
    }

    #[test]
    fn distribution() {
        let [a, b, c, d] = [lit(0, true), lit(1, true), lit(2, false), lit(3, true)];
        assert_eq!(distribute([a, b, c, d]), [[a, c], [a, d], [b, c], [b, d]]);
    }

    #[test]
    fn chain_of_units() {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();
        set_grid(ctx.borrow(), Grid::new(2, 2));

        // x0, x0 -> x1, x1 -> x2, x3 unrelated
        ctx.part_mut(DisjunctionsP).add([lit(0, false), lit(1, true)]);
        ctx.part_mut(DisjunctionsP).add([lit(1, false), lit(2, true)]);
        ctx.part_mut(DisjunctionsP).add([lit(3, true), lit(2, true)]);
        ctx.part_mut(DisjunctionsP).add([lit(3, true), lit(1, true)]);
        record_unit(ctx.borrow(), lit(0, true));

        propagate_units(ctx.borrow());

        assert_eq!(ctx.part(SolverStateP).sat_state, SatState::Unknown);
        assert!(ctx.part(DisjunctionsP).is_empty());
        assert_eq!(
            ctx.part(UnitsP).recorded(),
            &[lit(0, true), lit(1, true), lit(2, true)]
        );
    }

    #[test]
    fn contradicting_units() {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();
        set_grid(ctx.borrow(), Grid::new(2, 1));

        ctx.part_mut(DisjunctionsP).add([lit(0, false), lit(1, true)]);
        ctx.part_mut(DisjunctionsP).add([lit(0, false), lit(1, false)]);
        record_unit(ctx.borrow(), lit(0, true));

        propagate_units(ctx.borrow());

        assert_eq!(ctx.part(SolverStateP).sat_state, SatState::Unsat);
    }

    /// Propagates the given units in the given order, returns the resulting state.
    fn propagate_in_order(
        grid: Grid,
        clauses: &[[Lit; 2]],
        units: &[Lit],
    ) -> (SatState, Vec<[Lit; 2]>) {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();
        set_grid(ctx.borrow(), grid);

        for &clause in clauses {
            ctx.part_mut(DisjunctionsP).add(clause);
        }
        for &unit in units {
            record_unit(ctx.borrow(), unit);
        }
        propagate_units(ctx.borrow());

        let mut remaining = ctx.part(DisjunctionsP).clauses().to_vec();
        remaining.sort();
        (ctx.part(SolverStateP).sat_state, remaining)
    }

    proptest! {
        #[test]
        fn confluent(
            (clauses, units, permuted) in (
                collection::vec(array::uniform2(lit_strategy(0..6usize)), 0..30),
                collection::vec(lit_strategy(0..6usize), 0..4),
            ).prop_flat_map(|(clauses, units)| {
                let permuted = Just(units.clone()).prop_shuffle();
                (Just(clauses), Just(units), permuted)
            })
        ) {
            let grid = Grid::new(3, 3);

            let (state_a, remaining_a) = propagate_in_order(grid, &clauses, &units);
            let (state_b, remaining_b) = propagate_in_order(grid, &clauses, &permuted);

            prop_assert_eq!(state_a, state_b);
            if state_a == SatState::Unknown {
                prop_assert_eq!(remaining_a, remaining_b);
            }
        }
    }
}
