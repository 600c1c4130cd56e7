//! Miscellaneous per-case state.
use gridsat_formula::Grid;

/// Satisfiability state of the current case.
///
/// Every stage returns early once this is no longer `Unknown`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SatState {
    Unknown,
    Sat,
    Unsat,
}

impl Default for SatState {
    fn default() -> SatState {
        SatState::Unknown
    }
}

/// Miscellaneous per-case state.
#[derive(Default)]
pub struct SolverState {
    pub sat_state: SatState,
    pub grid: Grid,
}
