//! Reference answers for small cases.
use gridsat_formula::Case;

/// Decide a case by trying every orientation of every segment.
///
/// Only usable for grids with few segments.
pub fn brute_force(case: &Case) -> bool {
    let var_count = case.grid.var_count();
    assert!(var_count < 24, "too many segments for brute force");

    (0..1u32 << var_count).any(|bits| {
        case.trips
            .iter()
            .all(|trip| case.grid.serves(trip, |var| bits & (1 << var.index()) != 0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use gridsat_formula::case;

    #[test]
    fn known_answers() {
        assert!(brute_force(&case![1, 1; (1, 1) -> (1, 1)]));
        assert!(brute_force(&case![2, 2; (1, 1) -> (2, 2)]));
        assert!(!brute_force(&case![1, 2; (1, 1) -> (1, 2), (1, 2) -> (1, 1)]));
    }
}
