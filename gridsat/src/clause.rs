//! Constraints imposed by a single trip.
use gridsat_formula::{Grid, Lit, Trip};

/// What a trip requires from the orientation of the segments it may use.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ClauseOutcome {
    /// Origin and destination coincide.
    None,
    /// The trip stays on one street or avenue, which has to point the right way.
    Unit(Lit),
    /// `[p, q, r, s]` meaning `(p ∧ q) ∨ (r ∧ s)`, one conjunction per corner route.
    Binary4([Lit; 4]),
}

/// Derive the constraint a trip imposes.
///
/// A trip towards a larger avenue number needs east-bound streets, one towards a smaller avenue
/// number west-bound streets. Likewise towards a larger street number it needs south-bound
/// avenues, otherwise north-bound avenues.
///
/// When both coordinates change, the first conjunction of the result is the route along the
/// origin street and then along the destination avenue, the second one the route along the
/// origin avenue and then along the destination street.
pub fn build_clause(grid: &Grid, trip: &Trip) -> ClauseOutcome {
    let (origin, destination) = (trip.origin, trip.destination);

    let westward = destination.avenue < origin.avenue;
    let northward = destination.street < origin.street;

    let same_street = destination.street == origin.street;
    let same_avenue = destination.avenue == origin.avenue;

    match (same_street, same_avenue) {
        (true, true) => ClauseOutcome::None,
        (true, false) => ClauseOutcome::Unit(grid.street_lit(origin.street, westward)),
        (false, true) => ClauseOutcome::Unit(grid.avenue_lit(origin.avenue, northward)),
        (false, false) => ClauseOutcome::Binary4([
            grid.street_lit(origin.street, westward),
            grid.avenue_lit(destination.avenue, northward),
            grid.avenue_lit(origin.avenue, northward),
            grid.street_lit(destination.street, westward),
        ]),
    }
}
