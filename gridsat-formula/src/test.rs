use proptest::{prelude::*, *};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Case, Grid, Point, Trip};

fn random_point(grid: Grid, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen_range(1, grid.streets + 1),
        rng.gen_range(1, grid.avenues + 1),
    )
}

/// Generate a satisfiable case.
///
/// This picks a random orientation for every segment and then only generates trips that this
/// orientation serves.
pub fn sat_case(
    streets: impl Strategy<Value = usize>,
    avenues: impl Strategy<Value = usize>,
    trip_count: impl Strategy<Value = usize>,
) -> impl Strategy<Value = Case> {
    (streets, avenues, trip_count).prop_flat_map(|(streets, avenues, trip_count)| {
        let grid = Grid::new(streets, avenues);
        collection::vec(bool::ANY, grid.var_count()).prop_perturb(move |orientation, mut rng| {
            let mut case = Case::new(grid);

            while case.trips.len() < trip_count {
                let trip = Trip::new(random_point(grid, &mut rng), random_point(grid, &mut rng));
                if grid.serves(&trip, |var| orientation[var.index()]) {
                    case.trips.push(trip);
                }
            }

            case
        })
    })
}

/// Generate an unsatisfiable case.
///
/// One street with at least two avenues is required to be traveled in both directions, hidden
/// between random trips.
pub fn unsat_case(
    streets: impl Strategy<Value = usize>,
    avenues: impl Strategy<Value = usize>,
    trip_count: impl Strategy<Value = usize>,
) -> impl Strategy<Value = Case> {
    (streets, avenues, trip_count).prop_flat_map(|(streets, avenues, trip_count)| {
        let grid = Grid::new(streets, avenues.max(2));
        Just(()).prop_perturb(move |(), mut rng| {
            let mut case = Case::new(grid);

            for _ in 0..trip_count {
                let trip = Trip::new(random_point(grid, &mut rng), random_point(grid, &mut rng));
                case.trips.push(trip);
            }

            let street = rng.gen_range(1, grid.streets + 1);
            let west = rng.gen_range(1, grid.avenues);
            let east = rng.gen_range(west + 1, grid.avenues + 1);

            case.add_trip((street, west), (street, east));
            case.add_trip((street, east), (street, west));

            case.trips.shuffle(&mut rng);
            case
        })
    })
}
