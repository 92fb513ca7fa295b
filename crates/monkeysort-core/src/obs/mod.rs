//! Observability: per-attempt comparison counters and question estimates.
//!
//! Counters wrap a `Comparator` and never change its verdicts.

mod counter;
mod estimate;

pub use counter::DistinctPairCounter;
pub use estimate::{QuestionEstimate, estimate_questions, worst_case_questions};

use crate::{
    compare::{Comparator, Verdict},
    error::InternalError,
};
use serde::Serialize;
use std::cmp::Ordering;

///
/// AttemptStats
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AttemptStats {
    /// Comparisons requested by the sort, including the pending one.
    pub comparisons: u64,

    /// Comparisons short-circuited because both sides were the same element.
    pub equal: u64,

    /// Comparisons answered by a recorded decision.
    pub answered: u64,

    /// Whether the attempt stopped on an unanswered pair.
    pub suspended: bool,
}

///
/// CountingComparator
///

pub struct CountingComparator<C> {
    inner: C,
    stats: AttemptStats,
}

impl<C> CountingComparator<C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            stats: AttemptStats::default(),
        }
    }

    #[must_use]
    pub const fn stats(&self) -> AttemptStats {
        self.stats
    }
}

impl<E, C: Comparator<E>> Comparator<E> for CountingComparator<C> {
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError> {
        self.stats.comparisons += 1;

        let verdict = self.inner.compare(left, right)?;
        match &verdict {
            Verdict::Decided(Ordering::Equal) => self.stats.equal += 1,
            Verdict::Decided(_) => self.stats.answered += 1,
            Verdict::Pending(_) => self.stats.suspended = true,
        }

        Ok(verdict)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compare::StoreComparator,
        sort::{SortOutcome, merge_sort},
        store::ComparisonStore,
    };

    fn s(text: &str) -> String {
        text.to_string()
    }

    #[test]
    fn counts_answered_equal_and_pending() {
        let mut store = ComparisonStore::new();
        store.insert(s("b"), s("a"));
        let elements = vec![s("a"), s("b"), s("b"), s("c")];

        let mut counter = CountingComparator::new(StoreComparator::new(&store));
        let outcome = merge_sort(&elements, &mut counter).expect("sort");

        // [a, b] answered, [b, c] pending.
        assert!(matches!(outcome, SortOutcome::Pending(_)));
        assert_eq!(
            counter.stats(),
            AttemptStats {
                comparisons: 2,
                equal: 0,
                answered: 1,
                suspended: true,
            }
        );
    }

    #[test]
    fn equal_pairs_are_counted_separately() {
        let store = ComparisonStore::new();
        let elements = vec![s("z"), s("z")];

        let mut counter = CountingComparator::new(StoreComparator::new(&store));
        let outcome = merge_sort(&elements, &mut counter).expect("sort");

        assert!(outcome.is_ordered());
        assert_eq!(counter.stats().equal, 1);
        assert!(!counter.stats().suspended);
    }
}
