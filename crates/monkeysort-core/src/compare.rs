//! Module: compare
//! Responsibility: three-way comparison that may come back unanswered.
//! Boundary: any `Comparator` can drive `sort::merge_sort`.

use crate::{
    element::Element,
    error::InternalError,
    store::{ComparisonKey, ComparisonStore, Lookup},
};
use std::cmp::Ordering;

///
/// Verdict
///
/// Result of one comparison. `Pending` carries the unanswered pair in the
/// order the comparator was called with.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict<E> {
    Decided(Ordering),
    Pending(ComparisonKey<E>),
}

///
/// Comparator
///

pub trait Comparator<E> {
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError>;
}

impl<E, C: Comparator<E> + ?Sized> Comparator<E> for &mut C {
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError> {
        (**self).compare(left, right)
    }
}

///
/// StoreComparator
///
/// Answers from a `ComparisonStore`, suspending on pairs it has never seen.
///

pub struct StoreComparator<'a, E: Element> {
    store: &'a ComparisonStore<E>,
}

impl<'a, E: Element> StoreComparator<'a, E> {
    #[must_use]
    pub const fn new(store: &'a ComparisonStore<E>) -> Self {
        Self { store }
    }
}

impl<E: Element> Comparator<E> for StoreComparator<'_, E> {
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError> {
        for element in [left, right] {
            if !element.is_present() {
                return Err(InternalError::comparator_invalid(format!(
                    "cannot compare absent element {element:?}"
                )));
            }
        }

        if left == right {
            return Ok(Verdict::Decided(Ordering::Equal));
        }

        let verdict = match self.store.lookup(left, right) {
            Lookup::Known(sign) if sign > 0 => Verdict::Decided(Ordering::Greater),
            Lookup::Known(_) => Verdict::Decided(Ordering::Less),
            Lookup::Unknown => Verdict::Pending(ComparisonKey::new(left.clone(), right.clone())),
        };

        Ok(verdict)
    }
}

///
/// OrdComparator
///
/// Always-decided comparator over `Ord`; used for simulations and tests.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct OrdComparator;

impl<E: Ord> Comparator<E> for OrdComparator {
    fn compare(&mut self, left: &E, right: &E) -> Result<Verdict<E>, InternalError> {
        Ok(Verdict::Decided(left.cmp(right)))
    }
}

///
/// TESTS
///
