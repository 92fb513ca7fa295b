//! Rank a set of files by answering pairwise questions.
//!
//! Every answer is written to the session file before the next question is
//! asked, so quitting at the prompt loses nothing. Picking the session file
//! itself resumes the saved working list.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use monkeysort_core::prelude::*;
use std::{fs, path::PathBuf};

use crate::commands::command::Command;
use crate::materialize::NumberedCopyMaterializer;
use crate::oracle::PromptOracle;

/// Sort files by answering "which is better?" questions.
#[derive(Debug, Parser)]
#[command(
    name = "sort",
    about = "Rank files by answering pairwise questions",
    long_about = r#"
Rank files by answering one pairwise question at a time.

Each question shows two files; pick the one that ranks higher. Answers are
saved to the session file (sort.mky next to the first file by default), so
quitting with 'q' or Ctrl-D and running again continues where you stopped.

When every pair needed by the merge sort is answered, the files are copied
into the output directory as 0000_<name>, 0001_<name>, ... lowest ranked first.

EXAMPLES:

  # Start ranking photos
  monkeysort sort photos/*.jpg

  # Continue the saved working list
  monkeysort sort photos/sort.mky

  # Write the ranked copies elsewhere
  monkeysort sort photos/*.jpg --output-dir ranked
"#
)]
pub struct Sort {
    /// Files to rank, or a single saved session file to resume.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Directory for the ranked copies. Defaults to `sorted/` next to each file.
    #[arg(short = 'o', long = "output-dir", env = "MONKEYSORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Session file name inside the working directory.
    #[arg(
        long = "session-file",
        env = "MONKEYSORT_SESSION_FILE",
        default_value = SessionConfig::DEFAULT_FILE_NAME
    )]
    pub session_file: String,
}

impl Command for Sort {
    fn execute(&self) -> Result<()> {
        let config = SessionConfig {
            session_file_name: self.session_file.clone(),
            ..SessionConfig::default()
        };
        let (session_path, mut session) = open_session(&self.files, &config)?;
        let mut oracle = PromptOracle::new()?;
        let mut materializer = NumberedCopyMaterializer::new(self.output_dir.clone());

        match session.run(&mut oracle, &mut materializer)? {
            StepOutcome::Empty => info!("nothing to sort"),
            StepOutcome::Complete(ordered) => {
                info!("ranked {} files", ordered.len());
            }
            StepOutcome::Question(_) => {
                info!(
                    "stopped with {} answers saved to {}",
                    session.store().len(),
                    session_path.display()
                );
            }
        }

        Ok(())
    }
}

/// Canonical form of every picked file, so answers recorded under one
/// spelling of a path apply under any other.
fn resolve_picked(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    files
        .iter()
        .map(|file| -> Result<PathBuf> {
            let resolved = fs::canonicalize(file)
                .with_context(|| format!("'{}' does not exist", file.display()))?;
            if !resolved.is_file() {
                bail!("'{}' is not a file", file.display());
            }

            Ok(resolved)
        })
        .collect()
}

/// Open the session the picked files belong to.
fn open_session(
    files: &[PathBuf],
    config: &SessionConfig,
) -> Result<(PathBuf, SortSession<PathBuf, FileStorage>)> {
    let files = resolve_picked(files)?;
    let Some(first) = files.first().cloned() else {
        bail!("no files to sort");
    };

    let selection = Selection::from_picked(files, config);
    let session_path = match &selection {
        Selection::Resume => first,
        Selection::Fresh(_) => config.session_path_for(&first),
    };
    info!("using session file {}", session_path.display());

    let session = SortSession::open(FileStorage::new(&session_path), selection)
        .with_context(|| format!("failed to open session '{}'", session_path.display()))?;

    Ok((session_path, session))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use monkeysort_core::error::InternalError;
    use std::path::Path;

    struct Scripted(Vec<Choice>);

    impl Oracle<PathBuf> for Scripted {
        fn choose(&mut self, _: &ComparisonKey<PathBuf>) -> Result<Option<Choice>, InternalError> {
            Ok(self.0.pop())
        }
    }

    struct Discard;

    impl Materializer<PathBuf> for Discard {
        fn materialize(&mut self, _: &[PathBuf]) -> Result<(), InternalError> {
            Ok(())
        }
    }

    fn picked(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| dir.join(name)).collect()
    }

    #[test]
    fn answers_survive_a_different_spelling_of_the_same_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let photos = dir.path().join("photos");
        fs::create_dir(&photos).expect("mkdir");
        for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
            fs::write(photos.join(name), name).expect("write");
        }
        let config = SessionConfig::default();

        let names = ["a.txt", "b.txt", "c.txt", "d.txt"];
        let (path, mut session) =
            open_session(&picked(&photos, &names), &config).expect("open");
        let outcome = session
            .run(&mut Scripted(vec![Choice::First, Choice::First]), &mut Discard)
            .expect("run");
        assert!(matches!(outcome, StepOutcome::Question(_)));
        assert_eq!(session.store().len(), 2);

        let respelled = picked(&dir.path().join("photos/../photos/."), &names);
        let (again, session) = open_session(&respelled, &config).expect("reopen");
        assert_eq!(again, path);
        assert_eq!(session.status().expect("status").relevant_answers, 2);

        let resumed = [dir.path().join("./photos/sort.mky")];
        let (_, session) = open_session(&resumed, &config).expect("resume");
        assert_eq!(session.elements().len(), 4);
        assert!(session.elements().iter().all(|file| file.is_absolute() && file.is_file()));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = resolve_picked(&[dir.path().join("gone.txt")]).expect_err("must fail");

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = resolve_picked(&[dir.path().to_path_buf()]).expect_err("must fail");

        assert!(err.to_string().contains("is not a file"));
    }
}
