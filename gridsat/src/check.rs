//! Self checking of models.
use gridsat_formula::{Case, Lit, Trip};

/// Find a trip of the case that the model does not serve.
///
/// The model contains one literal per variable, in variable order.
pub fn unserved_trip(case: &Case, model: &[Lit]) -> Option<Trip> {
    debug_assert_eq!(model.len(), case.grid.var_count());

    case.trips
        .iter()
        .find(|trip| {
            !case
                .grid
                .serves(trip, |var| model[var.index()].is_positive())
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use gridsat_formula::{case, Point};

    #[test]
    fn finds_blocked_trip() {
        let case = case![2, 2; (1, 1) -> (2, 2), (2, 2) -> (2, 1)];
        let grid = case.grid;

        let east = vec![
            grid.street_lit(1, false),
            grid.street_lit(2, false),
            grid.avenue_lit(1, false),
            grid.avenue_lit(2, false),
        ];
        assert_eq!(
            unserved_trip(&case, &east),
            Some(Trip::new(Point::new(2, 2), Point::new(2, 1)))
        );

        let mixed = vec![
            grid.street_lit(1, false),
            grid.street_lit(2, true),
            grid.avenue_lit(1, false),
            grid.avenue_lit(2, false),
        ];
        assert_eq!(unserved_trip(&case, &mixed), None);
    }
}
