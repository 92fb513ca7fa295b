//! Module: session
//! Responsibility: one resumable sort over a persisted store and working list.
//! Does not own: asking questions (`Oracle`) or writing results (`Materializer`).
//!
//! Contract:
//! - the store and working list are persisted before every sort attempt, and a
//!   failed write aborts the attempt;
//! - every attempt sorts the full working list from scratch;
//! - a decode failure while opening surfaces as corruption and nothing from
//!   the damaged file is adopted.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use crate::{
    codec::{decode_session, encode_session},
    compare::StoreComparator,
    element::Element,
    error::InternalError,
    obs::{AttemptStats, CountingComparator, worst_case_questions},
    sort::{SortOutcome, merge_sort},
    store::{ComparisonKey, ComparisonStore},
};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

///
/// SessionConfig
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// File name of the session inside the working directory.
    pub session_file_name: String,

    /// Extension that marks a picked file as a saved session.
    pub session_extension: String,
}

impl SessionConfig {
    pub const DEFAULT_FILE_NAME: &'static str = "sort.mky";
    pub const DEFAULT_EXTENSION: &'static str = "mky";

    /// Session file for the working directory that holds `element`.
    #[must_use]
    pub fn session_path_for(&self, element: &Path) -> PathBuf {
        let dir = element.parent().unwrap_or_else(|| Path::new(""));

        dir.join(&self.session_file_name)
    }

    #[must_use]
    pub fn is_session_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.session_extension.as_str())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_file_name: Self::DEFAULT_FILE_NAME.to_string(),
            session_extension: Self::DEFAULT_EXTENSION.to_string(),
        }
    }
}

///
/// Selection
///
/// What the user picked when opening a session.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection<E> {
    /// A fresh element list; any stored answers for the directory still apply.
    Fresh(Vec<E>),

    /// The saved session file itself; sort the persisted working list.
    Resume,
}

impl Selection<PathBuf> {
    /// A single picked file carrying the session extension means "resume".
    #[must_use]
    pub fn from_picked(paths: Vec<PathBuf>, config: &SessionConfig) -> Self {
        match paths.as_slice() {
            [only] if config.is_session_file(only) => Self::Resume,
            _ => Self::Fresh(paths),
        }
    }
}

///
/// Choice
///
/// Oracle answer for a pending key: which side ranks higher.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Choice {
    First,
    Second,
}

impl Choice {
    /// Split a key into `(greater, lesser)`.
    #[must_use]
    pub fn resolve<E>(self, key: ComparisonKey<E>) -> (E, E) {
        match self {
            Self::First => (key.first, key.second),
            Self::Second => (key.second, key.first),
        }
    }
}

///
/// Oracle
///

pub trait Oracle<E> {
    /// Answer one question, or `None` to stop asking for now.
    fn choose(&mut self, key: &ComparisonKey<E>) -> Result<Option<Choice>, InternalError>;
}

///
/// Materializer
///

pub trait Materializer<E> {
    /// Receive the final order, least element first.
    fn materialize(&mut self, ordered: &[E]) -> Result<(), InternalError>;
}

///
/// StepOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StepOutcome<E> {
    /// The working list is empty; nothing was persisted or sorted.
    Empty,

    /// The sort finished and the order was handed to the materializer.
    Complete(Vec<E>),

    /// This pair needs an answer.
    Question(ComparisonKey<E>),
}

///
/// SessionStatus
///

#[derive(Clone, Debug, Serialize)]
pub struct SessionStatus<E> {
    pub elements: usize,
    pub answers: usize,
    pub relevant_answers: usize,
    pub worst_case_questions: u64,
    pub outcome: SortOutcome<E>,
    pub attempt: AttemptStats,
}

///
/// SortSession
///

pub struct SortSession<E: Element, S: SessionStorage> {
    storage: S,
    elements: Vec<E>,
    store: ComparisonStore<E>,
    last_attempt: AttemptStats,
}

impl<E: Element, S: SessionStorage> SortSession<E, S> {
    /// Open a session, adopting any answers already persisted in `storage`.
    pub fn open(storage: S, selection: Selection<E>) -> Result<Self, InternalError> {
        let (persisted, store) = match storage.load()? {
            Some(bytes) => {
                let snapshot = decode_session(&bytes)?;
                (snapshot.elements, snapshot.store)
            }
            None => (Vec::new(), ComparisonStore::new()),
        };

        let elements = match selection {
            Selection::Resume => persisted,
            Selection::Fresh(elements) => elements,
        };
        info!(
            "opened session: {} elements, {} recorded answers",
            elements.len(),
            store.len()
        );

        Ok(Self {
            storage,
            elements,
            store,
            last_attempt: AttemptStats::default(),
        })
    }

    #[must_use]
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    #[must_use]
    pub const fn store(&self) -> &ComparisonStore<E> {
        &self.store
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub const fn last_attempt(&self) -> AttemptStats {
        self.last_attempt
    }

    /// Persist, then run one full sort attempt.
    pub fn step<M>(&mut self, materializer: &mut M) -> Result<StepOutcome<E>, InternalError>
    where
        M: Materializer<E> + ?Sized,
    {
        if self.elements.is_empty() {
            return Ok(StepOutcome::Empty);
        }

        self.persist()?;

        let (outcome, stats) = run_attempt(&self.elements, &self.store)?;
        self.last_attempt = stats;

        match outcome {
            SortOutcome::Ordered(ordered) => {
                info!(
                    "sort complete: {} elements after {} comparisons",
                    ordered.len(),
                    stats.comparisons
                );
                materializer.materialize(&ordered)?;

                Ok(StepOutcome::Complete(ordered))
            }
            SortOutcome::Pending(key) => {
                debug!(
                    "sort suspended on {:?} vs {:?} after {} comparisons",
                    key.first, key.second, stats.comparisons
                );

                Ok(StepOutcome::Question(key))
            }
        }
    }

    /// Record that `greater` ranks above `lesser`, then step again.
    pub fn answer<M>(
        &mut self,
        greater: E,
        lesser: E,
        materializer: &mut M,
    ) -> Result<StepOutcome<E>, InternalError>
    where
        M: Materializer<E> + ?Sized,
    {
        self.validate_answer(&greater, &lesser)?;
        self.store.insert(greater, lesser);

        self.step(materializer)
    }

    /// Alternate between stepping and asking until the sort completes or the
    /// oracle stops answering. A `Question` result means the oracle declined.
    pub fn run<O, M>(
        &mut self,
        oracle: &mut O,
        materializer: &mut M,
    ) -> Result<StepOutcome<E>, InternalError>
    where
        O: Oracle<E> + ?Sized,
        M: Materializer<E> + ?Sized,
    {
        let mut outcome = self.step(materializer)?;

        loop {
            let StepOutcome::Question(key) = outcome else {
                return Ok(outcome);
            };
            let Some(choice) = oracle.choose(&key)? else {
                info!("oracle stopped; answers so far are saved");
                return Ok(StepOutcome::Question(key));
            };

            let (greater, lesser) = choice.resolve(key);
            outcome = self.answer(greater, lesser, materializer)?;
        }
    }

    /// Where the session stands, without persisting anything.
    pub fn status(&self) -> Result<SessionStatus<E>, InternalError> {
        let (outcome, attempt) = run_attempt(&self.elements, &self.store)?;

        Ok(SessionStatus {
            elements: self.elements.len(),
            answers: self.store.len(),
            relevant_answers: self.store.answered_pairs_within(&self.elements),
            worst_case_questions: worst_case_questions(self.elements.len()),
            outcome,
            attempt,
        })
    }

    fn persist(&mut self) -> Result<(), InternalError> {
        let bytes = encode_session(&self.elements, &self.store)?;
        self.storage.save(&bytes)?;
        debug!(
            "persisted {} elements and {} answers",
            self.elements.len(),
            self.store.len()
        );

        Ok(())
    }

    fn validate_answer(&self, greater: &E, lesser: &E) -> Result<(), InternalError> {
        for element in [greater, lesser] {
            if !element.is_present() {
                return Err(InternalError::session_invalid(format!(
                    "answer names absent element {element:?}"
                )));
            }
            if !self.elements.contains(element) {
                return Err(InternalError::session_invalid(format!(
                    "answer names {element:?}, which is not in the working list"
                )));
            }
        }
        if greater == lesser {
            return Err(InternalError::session_invalid(format!(
                "cannot rank {greater:?} against itself"
            )));
        }

        Ok(())
    }
}

// One counted sort attempt over the current store.
fn run_attempt<E: Element>(
    elements: &[E],
    store: &ComparisonStore<E>,
) -> Result<(SortOutcome<E>, AttemptStats), InternalError> {
    let mut comparator = CountingComparator::new(StoreComparator::new(store));
    let outcome = merge_sort(elements, &mut comparator)?;

    Ok((outcome, comparator.stats()))
}
