//! Grids of one-way streets and avenues, and the trips requested on them.
//!
//! Streets run horizontally and are numbered from north to south, avenues run vertically and are
//! numbered from west to east. A point of the grid is the crossing of a street and an avenue.
//! Street and avenue numbers are 1-based.
//!
//! Each segment, i.e. each street and each avenue, is one boolean variable. A positive street
//! literal orients the street east-bound (towards increasing avenue numbers), a positive avenue
//! literal orients the avenue south-bound (towards increasing street numbers).
use std::fmt;

use crate::lit::{Lit, Var};

/// A street or avenue of a grid, 1-based.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Segment {
    Street(usize),
    Avenue(usize),
}

/// The crossing of a street and an avenue, 1-based.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Point {
    pub street: usize,
    pub avenue: usize,
}

impl Point {
    pub fn new(street: usize, avenue: usize) -> Point {
        Point { street, avenue }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.street, self.avenue)
    }
}

/// A requested trip between two points.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Trip {
    pub origin: Point,
    pub destination: Point,
}

impl Trip {
    pub fn new(origin: Point, destination: Point) -> Trip {
        Trip {
            origin,
            destination,
        }
    }
}

/// Dimensions of a grid and the literal encoding of its segments.
///
/// Streets use the variables `0..streets`, avenues the variables `streets..streets + avenues`.
/// Thus street literals have the codes `[0, 2 * streets)` and avenue literals the codes
/// `[2 * streets, 2 * (streets + avenues))`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Grid {
    pub streets: usize,
    pub avenues: usize,
}

impl Grid {
    pub fn new(streets: usize, avenues: usize) -> Grid {
        debug_assert!(streets + avenues <= Grid::max_var_count());
        Grid { streets, avenues }
    }

    /// Largest number of segments, i.e. streets plus avenues, of a supported grid.
    ///
    /// Solving keeps several arrays indexed by literal, so this stays well below
    /// [`Var::max_count`].
    pub const fn max_var_count() -> usize {
        1 << 22
    }

    /// Number of variables, one per segment.
    pub fn var_count(&self) -> usize {
        self.streets + self.avenues
    }

    /// Number of literals, i.e. nodes of the implication graph.
    pub fn lit_count(&self) -> usize {
        self.var_count() * 2
    }

    /// Whether the point lies on the grid.
    pub fn contains(&self, point: Point) -> bool {
        (1..=self.streets).contains(&point.street) && (1..=self.avenues).contains(&point.avenue)
    }

    /// Variable of a 1-based street number.
    #[inline]
    pub fn street(&self, index: usize) -> Var {
        debug_assert!((1..=self.streets).contains(&index));
        Var::from_index(index - 1)
    }

    /// Variable of a 1-based avenue number.
    #[inline]
    pub fn avenue(&self, index: usize) -> Var {
        debug_assert!((1..=self.avenues).contains(&index));
        Var::from_index(self.streets + index - 1)
    }

    /// Literal for a street being east-bound, or west-bound when `negated`.
    #[inline]
    pub fn street_lit(&self, index: usize, negated: bool) -> Lit {
        self.street(index).lit(!negated)
    }

    /// Literal for an avenue being south-bound, or north-bound when `negated`.
    #[inline]
    pub fn avenue_lit(&self, index: usize, negated: bool) -> Lit {
        self.avenue(index).lit(!negated)
    }

    /// The segment represented by a variable.
    pub fn segment(&self, var: Var) -> Segment {
        let index = var.index();
        assert!(
            index < self.var_count(),
            "variable {:?} outside of a grid with {} segments",
            var,
            self.var_count()
        );
        if index < self.streets {
            Segment::Street(index + 1)
        } else {
            Segment::Avenue(index - self.streets + 1)
        }
    }

    /// Whether a trip can be completed given an orientation for every segment.
    ///
    /// `oriented(var)` returns `true` when the segment's positive literal holds. A trip is
    /// served when the origin and destination coincide or when one of the two corner routes is
    /// open: along the origin street then along the destination avenue, or along the origin
    /// avenue then along the destination street.
    pub fn serves(&self, trip: &Trip, oriented: impl Fn(Var) -> bool) -> bool {
        let Trip {
            origin,
            destination,
        } = *trip;

        let street_open = |street: usize| {
            destination.avenue == origin.avenue
                || oriented(self.street(street)) == (destination.avenue > origin.avenue)
        };
        let avenue_open = |avenue: usize| {
            destination.street == origin.street
                || oriented(self.avenue(avenue)) == (destination.street > origin.street)
        };

        (street_open(origin.street) && avenue_open(destination.avenue))
            || (avenue_open(origin.avenue) && street_open(destination.street))
    }
}

/// One test case: a grid and the trips that have to be possible.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Case {
    pub grid: Grid,
    pub trips: Vec<Trip>,
}

impl Case {
    pub fn new(grid: Grid) -> Case {
        Case {
            grid,
            trips: vec![],
        }
    }

    /// Appends a trip between two points given as `(street, avenue)` pairs.
    pub fn add_trip(&mut self, origin: (usize, usize), destination: (usize, usize)) {
        debug_assert!(self.grid.contains(Point::new(origin.0, origin.1)));
        debug_assert!(self.grid.contains(Point::new(destination.0, destination.1)));
        self.trips.push(Trip::new(
            Point::new(origin.0, origin.1),
            Point::new(destination.0, destination.1),
        ));
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    pub fn grid(
        streets: impl Strategy<Value = usize>,
        avenues: impl Strategy<Value = usize>,
    ) -> impl Strategy<Value = Grid> {
        (streets, avenues).prop_map(|(streets, avenues)| Grid::new(streets, avenues))
    }

    pub fn point(grid: Grid) -> impl Strategy<Value = Point> {
        (1..=grid.streets, 1..=grid.avenues).prop_map(|(street, avenue)| Point::new(street, avenue))
    }

    pub fn trip(grid: Grid) -> impl Strategy<Value = Trip> {
        (point(grid), point(grid)).prop_map(|(origin, destination)| Trip::new(origin, destination))
    }

    pub fn case(
        streets: impl Strategy<Value = usize>,
        avenues: impl Strategy<Value = usize>,
        trips: impl Into<SizeRange>,
    ) -> impl Strategy<Value = Case> {
        let trips = trips.into();
        grid(streets, avenues).prop_flat_map(move |grid| {
            collection::vec(trip(grid), trips.clone()).prop_map(move |trips| Case { grid, trips })
        })
    }
}
