//! Literal, grid and trip data types used by the gridsat orientation solver.

/// Shortcut for tests
///
/// `case![streets, avenues; (s1, a1) -> (s2, a2), ...]` builds a [`Case`] with the given trips.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! case {
    ( $streets:expr, $avenues:expr; $( ($s1:expr, $a1:expr) -> ($s2:expr, $a2:expr) ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut case = $crate::grid::Case::new($crate::grid::Grid::new($streets, $avenues));
        $( case.add_trip(($s1, $a1), ($s2, $a2)); )*
        case
    }};
}

pub mod grid;
pub mod lit;

#[cfg(any(test, feature = "internal-testing"))]
pub mod test;

pub use grid::{Case, Grid, Point, Segment, Trip};
pub use lit::{Lit, Var};
