//! Gridsat decides whether the streets and avenues of a rectangular grid can be made one-way such
//! that every requested trip is still possible.
//!
//! Each street and each avenue is a boolean variable giving its direction. A trip that changes
//! both its street and its avenue can use one of two corner routes, which makes it a disjunction
//! of two conjunctions. Distributing these gives a [2-CNF][2sat] formula, which is decided in
//! linear time using the strongly connected components of its implication graph.
//!
//! [2sat]: https://en.wikipedia.org/wiki/2-satisfiability

pub mod config;
pub mod solver;

mod check;
mod clause;
mod context;
mod decide;
mod graph;
mod load;
mod model;
mod normalize;
mod scc;
mod state;
mod units;

#[cfg(test)]
mod test;

pub use gridsat_formula::{grid, lit, Case, Grid, Lit, Point, Segment, Trip, Var};

pub mod cases {
    //! Case file parser and writer.
    pub use gridsat_cases::*;
}
