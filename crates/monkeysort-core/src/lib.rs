//! Core runtime for MonkeySort: a merge sort whose comparisons come from an
//! outside decision source, one pairwise question at a time.
//!
//! An attempt either finishes with the full order or stops on the first pair
//! nobody has answered yet. The caller records the answer and sorts again;
//! answers already given are replayed from the comparison store.
#![warn(unreachable_pub)]

pub mod codec;
pub mod compare;
pub mod element;
pub mod error;
pub mod obs;
pub mod session;
pub mod sort;
pub mod store;

///
/// Prelude
///
/// Domain vocabulary for front ends. Codec helpers and counters are not
/// re-exported here.
///

pub mod prelude {
    pub use crate::{
        compare::{Comparator, StoreComparator, Verdict},
        element::Element,
        error::InternalError,
        session::{
            Choice, FileStorage, Materializer, Oracle, SessionConfig, Selection, SortSession,
            StepOutcome,
        },
        sort::{SortOutcome, merge_sort},
        store::{ComparisonKey, ComparisonStore},
    };
}
