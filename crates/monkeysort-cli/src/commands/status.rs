//! Report progress of a saved session without touching it.

use anyhow::{Context, Result, bail};
use clap::Parser;
use monkeysort_core::{
    prelude::*,
    session::{MemoryStorage, SessionStatus, SessionStorage},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::commands::command::Command;

/// Show how far a saved session has progressed.
#[derive(Debug, Parser)]
#[command(name = "status", about = "Show progress of a saved session")]
pub struct Status {
    /// Saved session file.
    pub session_file: PathBuf,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    session_file: &'a Path,
    #[serde(flatten)]
    status: SessionStatus<PathBuf>,
}

impl Command for Status {
    fn execute(&self) -> Result<()> {
        let report = StatusReport {
            session_file: &self.session_file,
            status: load_status(&self.session_file)?,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render(&report));
        }

        Ok(())
    }
}

/// Read the session file once and report on it without writing back.
fn load_status(session_file: &Path) -> Result<SessionStatus<PathBuf>> {
    let Some(bytes) = FileStorage::new(session_file).load()? else {
        bail!("no session saved at '{}'", session_file.display());
    };

    let storage = MemoryStorage::with_bytes(bytes);
    let session = SortSession::<PathBuf, _>::open(storage, Selection::Resume)
        .with_context(|| format!("failed to read '{}'", session_file.display()))?;

    Ok(session.status()?)
}

fn render(report: &StatusReport<'_>) -> String {
    let status = &report.status;
    let mut out = format!(
        "session:   {}\nelements:  {}\nanswers:   {} ({} for this list)\nworst case: {} questions\n",
        report.session_file.display(),
        status.elements,
        status.answers,
        status.relevant_answers,
        status.worst_case_questions,
    );

    match &status.outcome {
        SortOutcome::Ordered(_) => out.push_str("state:     complete\n"),
        SortOutcome::Pending(key) => out.push_str(&format!(
            "state:     waiting on {} vs {}\n",
            key.first.display(),
            key.second.display()
        )),
    }

    out
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn open(answers: &[(&str, &str)], elements: &[&str]) -> SessionStatus<PathBuf> {
        let mut store = ComparisonStore::new();
        for (greater, lesser) in answers {
            store.insert(PathBuf::from(greater), PathBuf::from(lesser));
        }
        let elements: Vec<PathBuf> = elements.iter().map(PathBuf::from).collect();
        let bytes = monkeysort_core::codec::encode_session(&elements, &store).expect("encode");
        let storage = MemoryStorage::with_bytes(bytes);

        SortSession::open(storage, Selection::Resume)
            .expect("open")
            .status()
            .expect("status")
    }

    #[test]
    fn load_status_reads_saved_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sort.mky");
        let elements = [PathBuf::from("a"), PathBuf::from("b")];
        let mut store = ComparisonStore::new();
        store.insert(PathBuf::from("b"), PathBuf::from("a"));
        let bytes = monkeysort_core::codec::encode_session(&elements, &store).expect("encode");
        std::fs::write(&path, &bytes).expect("write");

        let status = load_status(&path).expect("status");

        assert_eq!(status.elements, 2);
        assert!(status.outcome.is_ordered());
        assert_eq!(std::fs::read(&path).expect("read"), bytes);
    }

    #[test]
    fn load_status_without_session_fails() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = load_status(&dir.path().join("sort.mky")).expect_err("must fail");

        assert!(err.to_string().contains("no session saved"));
    }

    #[test]
    fn render_reports_pending_pair() {
        let report = StatusReport {
            session_file: Path::new("sort.mky"),
            status: open(&[], &["a", "b"]),
        };

        let text = render(&report);

        assert!(text.contains("elements:  2"));
        assert!(text.contains("waiting on a vs b"));
    }

    #[test]
    fn render_reports_complete_session() {
        let report = StatusReport {
            session_file: Path::new("sort.mky"),
            status: open(&[("a", "b")], &["a", "b"]),
        };

        let text = render(&report);

        assert!(text.contains("answers:   1 (1 for this list)"));
        assert!(text.contains("state:     complete"));
    }

    #[test]
    fn json_report_flattens_status() {
        let report = StatusReport {
            session_file: Path::new("sort.mky"),
            status: open(&[], &["a"]),
        };

        let json = serde_json::to_value(&report).expect("json");

        assert_eq!(json["session_file"], "sort.mky");
        assert_eq!(json["elements"], 1);
        assert!(json["outcome"]["Ordered"].is_array());
    }
}
