//! Grid orientation solver.
use std::io;

use anyhow::Error;
use log::{debug, info};
use partial_ref::{IntoPartialRefMut, PartialRef};
use thiserror::Error;

use gridsat_cases::CaseReader;
use gridsat_formula::{Case, Lit, Trip};

use crate::check::unserved_trip;
use crate::config::{SolverConfig, SolverConfigUpdate};
use crate::context::{set_grid, Context, DisjunctionsP, ImplGraphP, SccsP, SolverStateP, UnitsP};
use crate::decide::decide_case;
use crate::graph::build_graph;
use crate::load::load_trip;
use crate::model::extract_model;
use crate::normalize::{propagate_units, units_as_disjunctions};
use crate::scc::find_sccs;
use crate::state::SatState;

/// Possible errors while solving a case.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(
        "Self check failed: the model does not serve the trip from {} to {}",
        .trip.origin,
        .trip.destination
    )]
    SelfCheckFailed { trip: Trip },
}

/// Decides whether the streets and avenues of a grid can be oriented to serve all trips.
///
/// Every case is solved from scratch, nothing carries over from one case to the next except the
/// configuration.
#[derive(Default)]
pub struct Solver {
    config: SolverConfig,
    self_check: bool,
    model: Option<Vec<Lit>>,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Change the solver configuration.
    pub fn config(&mut self, config_update: &SolverConfigUpdate) {
        config_update.apply(&mut self.config);
    }

    /// Check every model against the trips of its case.
    pub fn enable_self_checking(&mut self) {
        self.self_check = true;
    }

    /// Check whether an orientation serving all trips of a case exists.
    pub fn solve_case(&mut self, case: &Case) -> Result<bool, SolverError> {
        self.model = None;

        let mut ctx = Box::new(Context::default());
        let mut ctx = ctx.into_partial_ref_mut();

        set_grid(ctx.borrow(), case.grid);

        for trip in case.trips.iter() {
            load_trip(ctx.borrow(), trip);
        }

        if self.config.unit_propagation {
            propagate_units(ctx.borrow());
        } else {
            units_as_disjunctions(ctx.borrow());
        }

        let unknown = ctx.part(SolverStateP).sat_state == SatState::Unknown;

        if unknown && ctx.part(DisjunctionsP).is_empty() {
            ctx.part_mut(SolverStateP).sat_state = SatState::Sat;
        } else if unknown {
            build_graph(ctx.borrow());
            find_sccs(ctx.borrow());
            decide_case(ctx.borrow(), self.config.scc_fast_paths);
        }

        debug!(
            "{} streets, {} avenues, {} trips: {} units, {} disjunctions, {} edges, {} components",
            case.grid.streets,
            case.grid.avenues,
            case.trips.len(),
            ctx.part(UnitsP).recorded().len(),
            ctx.part(DisjunctionsP).len(),
            ctx.part(ImplGraphP).edge_count(),
            ctx.part(SccsP).len(),
        );

        match ctx.part(SolverStateP).sat_state {
            SatState::Sat => {
                let model = extract_model(ctx.borrow());
                self.check_model(case, &model)?;
                self.model = Some(model);
                Ok(true)
            }
            SatState::Unsat => Ok(false),
            SatState::Unknown => unreachable!("case left undecided"),
        }
    }

    /// Verify a model against every trip of its case when self checking is enabled.
    fn check_model(&self, case: &Case, model: &[Lit]) -> Result<(), SolverError> {
        if self.self_check {
            if let Some(trip) = unserved_trip(case, model) {
                return Err(SolverError::SelfCheckFailed { trip });
            }
        }
        Ok(())
    }

    /// Orientation of every segment for the last solved case, if it was satisfiable.
    ///
    /// Contains one literal per variable, in variable order.
    pub fn model(&self) -> Option<Vec<Lit>> {
        self.model.clone()
    }

    /// Read a case file and solve all its cases in order.
    ///
    /// After each case `answer` is called with the case and, if it is satisfiable, its model.
    /// Returns the number of solved cases.
    pub fn solve_cases(
        &mut self,
        input: impl io::Read,
        mut answer: impl FnMut(&Case, Option<&[Lit]>) -> Result<(), Error>,
    ) -> Result<usize, Error> {
        let mut reader = CaseReader::new(input);
        let mut solved = 0;
        let mut satisfiable = 0;

        while let Some(case) = reader.next_case()? {
            if self.solve_case(&case)? {
                satisfiable += 1;
            }
            solved += 1;
            answer(&case, self.model.as_deref())?;
        }

        info!(
            "Solved {} cases, {} satisfiable, {} unsatisfiable",
            solved,
            satisfiable,
            solved - satisfiable
        );

        Ok(solved)
    }
}
