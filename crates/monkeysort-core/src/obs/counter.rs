use crate::{
    compare::{Comparator, Verdict},
    error::InternalError,
};
use std::{collections::HashSet, hash::Hash};

///
/// DistinctPairCounter
///
/// Counts the distinct unordered pairs of different elements a comparator is
/// asked about. With an empty store, that is the number of questions an
/// interactive session would put to the oracle.
///

pub struct DistinctPairCounter<E, C> {
    inner: C,
    seen: HashSet<(E, E)>,
    distinct: usize,
}

impl<E, C> DistinctPairCounter<E, C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            seen: HashSet::new(),
            distinct: 0,
        }
    }

    #[must_use]
    pub const fn distinct_pairs(&self) -> usize {
        self.distinct
    }
}

impl<E, C> Comparator<E> for DistinctPairCounter<E, C>
where
    E: Clone + Eq + Hash,
    C: Comparator<E>,
{
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError> {
        if left != right && self.seen.insert((left.clone(), right.clone())) {
            // Record the mirror too so (b, a) is not counted again.
            if self.seen.insert((right.clone(), left.clone())) {
                self.distinct += 1;
            }
        }

        self.inner.compare(left, right)
    }
}

///
/// TESTS
///
