use crate::{
    compare::OrdComparator,
    error::InternalError,
    obs::DistinctPairCounter,
    sort::merge_sort,
};
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64_with_seed;

///
/// QuestionEstimate
///
/// How many answers a full session over `elements` items is likely to need.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct QuestionEstimate {
    pub elements: usize,
    pub simulated: usize,
    pub worst_case: u64,
}

/// Simulate a session over `elements` pseudo-random keys derived from `seed`
/// and count the distinct pairs the sort asks about.
pub fn estimate_questions(elements: usize, seed: u64) -> Result<QuestionEstimate, InternalError> {
    let keys: Vec<u64> = (0..elements as u64)
        .map(|index| xxh3_64_with_seed(&index.to_le_bytes(), seed))
        .collect();

    let mut counter = DistinctPairCounter::new(OrdComparator);
    merge_sort(&keys, &mut counter)?;

    Ok(QuestionEstimate {
        elements,
        simulated: counter.distinct_pairs(),
        worst_case: worst_case_questions(elements),
    })
}

/// Upper bound on comparisons for top-down merge sort:
/// `n * ceil(lg n) - 2^ceil(lg n) + 1`.
#[must_use]
pub const fn worst_case_questions(elements: usize) -> u64 {
    if elements <= 1 {
        return 0;
    }

    let n = elements as u64;
    let ceil_log2 = u64::BITS - (n - 1).leading_zeros();

    n * ceil_log2 as u64 - (1u64 << ceil_log2) + 1
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_case_matches_known_values() {
        let expected = [(0, 0), (1, 0), (2, 1), (3, 3), (4, 5), (5, 8), (8, 17), (100, 573)];

        for (n, bound) in expected {
            assert_eq!(worst_case_questions(n), bound, "n = {n}");
        }
    }

    #[test]
    fn simulation_stays_within_the_bound() {
        for n in [0, 1, 2, 7, 33, 100] {
            let estimate = estimate_questions(n, 42).expect("estimate");

            assert!(estimate.simulated as u64 <= estimate.worst_case, "n = {n}");
        }
    }

    #[test]
    fn simulation_is_deterministic_per_seed() {
        let first = estimate_questions(64, 7).expect("estimate");
        let second = estimate_questions(64, 7).expect("estimate");

        assert_eq!(first, second);
        assert_eq!(estimate_questions(2, 9).expect("estimate").simulated, 1);
    }
}
