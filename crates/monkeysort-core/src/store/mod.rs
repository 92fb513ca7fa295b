//! Module: store
//! Responsibility: answered pairwise comparisons, keyed by directed pair.
//! Does not own: byte framing (see `codec`) or comparison semantics (see `compare`).


use crate::element::Element;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Value recorded by `insert`: the key's first element is the greater one.
pub const GREATER: i32 = 1;

///
/// ComparisonKey
///
/// Directed pair used as a storage key.
/// A stored positive value means `first` ranks above `second`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ComparisonKey<E> {
    pub first: E,
    pub second: E,
}

impl<E> ComparisonKey<E> {
    #[must_use]
    pub const fn new(first: E, second: E) -> Self {
        Self { first, second }
    }
}

impl<E: Clone> ComparisonKey<E> {
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.second.clone(), self.first.clone())
    }
}

///
/// Lookup
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup {
    Known(i32),
    Unknown,
}

///
/// ComparisonStore
///
/// Answers keep first-insertion order so that a load/save cycle writes the
/// entries back in the order they were read. Re-inserting a key overwrites
/// the value in place.
///
/// No transitivity checking happens here; contradictory answers may coexist
/// as `(a, b)` and `(b, a)`, in which case the forward key wins on lookup.
///
/// Slots are indexed first-then-second so lookups borrow the elements.
///

#[derive(Clone, Debug)]
pub struct ComparisonStore<E: Element> {
    entries: Vec<(ComparisonKey<E>, i32)>,
    slots: HashMap<E, HashMap<E, usize>>,
}

impl<E: Element> ComparisonStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Resolve a pair, falling back to the negated reverse-direction entry.
    #[must_use]
    pub fn lookup(&self, a: &E, b: &E) -> Lookup {
        if let Some(value) = self.value_of(a, b) {
            return Lookup::Known(value);
        }
        if let Some(value) = self.value_of(b, a) {
            return Lookup::Known(value.saturating_neg());
        }

        Lookup::Unknown
    }

    /// Record that `greater` ranks above `lesser`.
    ///
    /// The reverse-direction key is left untouched even if present.
    pub fn insert(&mut self, greater: E, lesser: E) {
        self.put(ComparisonKey::new(greater, lesser), GREATER);
    }

    /// Store a raw key/value pair exactly as given.
    pub(crate) fn put(&mut self, key: ComparisonKey<E>, value: i32) {
        if let Some(slot) = self.slot_of(&key.first, &key.second) {
            self.entries[slot].1 = value;
            return;
        }

        self.slots
            .entry(key.first.clone())
            .or_default()
            .insert(key.second.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    #[must_use]
    pub fn contains_pair(&self, a: &E, b: &E) -> bool {
        self.lookup(a, b) != Lookup::Unknown
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ComparisonKey<E>, i32)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }

    /// Count stored keys whose two sides both belong to `elements`.
    #[must_use]
    pub fn answered_pairs_within(&self, elements: &[E]) -> usize {
        let members: HashSet<&E> = elements.iter().collect();

        self.entries
            .iter()
            .filter(|(key, _)| members.contains(&key.first) && members.contains(&key.second))
            .count()
    }

    fn slot_of(&self, first: &E, second: &E) -> Option<usize> {
        self.slots.get(first)?.get(second).copied()
    }

    fn value_of(&self, a: &E, b: &E) -> Option<i32> {
        self.slot_of(a, b).map(|slot| self.entries[slot].1)
    }
}

impl<E: Element> Default for ComparisonStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
