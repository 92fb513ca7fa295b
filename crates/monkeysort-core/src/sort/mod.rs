//! Module: sort
//! Responsibility: top-down merge sort over a comparator that may suspend.
//! Does not own: answer storage or persistence.
//!
//! The traversal is fixed: split at `len / 2`, sort the left half, then the
//! right half, then merge with ties going to the left. Which pair is reported
//! as pending depends on this order, so it must not change.
//!
//! A pending comparison abandons the whole attempt. Nothing partial is kept;
//! the caller records the answer and sorts the full list again.


use crate::{
    compare::{Comparator, Verdict},
    error::InternalError,
    store::ComparisonKey,
};
use serde::Serialize;
use std::cmp::Ordering;

///
/// SortOutcome
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum SortOutcome<E> {
    /// Every comparison was answered; elements ascend from least to greatest.
    Ordered(Vec<E>),

    /// This pair must be answered before the sort can get further.
    Pending(ComparisonKey<E>),
}

impl<E> SortOutcome<E> {
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::Ordered(_))
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&ComparisonKey<E>> {
        match self {
            Self::Pending(key) => Some(key),
            Self::Ordered(_) => None,
        }
    }
}

///
/// Interrupt
///
/// Early exit threaded through every recursive call via `?`.
///

enum Interrupt<E> {
    Pending(ComparisonKey<E>),
    Failed(InternalError),
}

impl<E> From<InternalError> for Interrupt<E> {
    fn from(err: InternalError) -> Self {
        Self::Failed(err)
    }
}

/// Sort `elements` ascending, or report the first unanswered pair.
///
/// Comparator errors end the attempt and are returned as `Err`.
pub fn merge_sort<E, C>(elements: &[E], comparator: &mut C) -> Result<SortOutcome<E>, InternalError>
where
    E: Clone,
    C: Comparator<E> + ?Sized,
{
    match sort_run(elements, comparator) {
        Ok(ordered) => Ok(SortOutcome::Ordered(ordered)),
        Err(Interrupt::Pending(key)) => Ok(SortOutcome::Pending(key)),
        Err(Interrupt::Failed(err)) => Err(err),
    }
}

fn sort_run<E, C>(elements: &[E], comparator: &mut C) -> Result<Vec<E>, Interrupt<E>>
where
    E: Clone,
    C: Comparator<E> + ?Sized,
{
    if elements.len() <= 1 {
        return Ok(elements.to_vec());
    }

    let median = elements.len() / 2;
    let (left, right) = elements.split_at(median);

    let left = sort_run(left, comparator)?;
    let right = sort_run(right, comparator)?;

    merge_runs(left, right, comparator)
}

fn merge_runs<E, C>(left: Vec<E>, right: Vec<E>, comparator: &mut C) -> Result<Vec<E>, Interrupt<E>>
where
    C: Comparator<E> + ?Sized,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let take_right = match comparator.compare(l, r)? {
            Verdict::Decided(ordering) => ordering == Ordering::Greater,
            Verdict::Pending(key) => return Err(Interrupt::Pending(key)),
        };

        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);

    Ok(merged)
}
