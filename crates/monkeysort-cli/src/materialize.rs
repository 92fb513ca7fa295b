//! Writes a finished ranking as numbered copies of the ranked files.

use log::{debug, info};
use monkeysort_core::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    prelude::*,
};
use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

/// Directory used next to each file when no output directory is given.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "sorted";

///
/// NumberedCopyMaterializer
///
/// Copies the file ranked `i` (lowest first) to `<dir>/{i:04}_<file name>`.
/// Existing targets are never overwritten.
///

#[derive(Clone, Debug)]
pub struct NumberedCopyMaterializer {
    output_dir: Option<PathBuf>,
}

impl NumberedCopyMaterializer {
    #[must_use]
    pub const fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    fn target_for(&self, rank: usize, source: &Path) -> Result<PathBuf, InternalError> {
        let Some(name) = source.file_name() else {
            return Err(InternalError::new(
                ErrorClass::InvalidArgument,
                ErrorOrigin::Session,
                format!("'{}' has no file name", source.display()),
            ));
        };
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => source
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_OUTPUT_SUBDIR),
        };

        let mut numbered = OsString::from(format!("{rank:04}_"));
        numbered.push(name);

        Ok(dir.join(numbered))
    }
}

fn copy_new(source: &Path, target: &Path) -> io::Result<u64> {
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(target)?;

    io::copy(&mut reader, &mut writer).inspect_err(|_| {
        let _ = fs::remove_file(target);
    })
}

fn copy_error(source: &Path, target: &Path, err: &io::Error) -> InternalError {
    InternalError::new(
        ErrorClass::Io,
        ErrorOrigin::Storage,
        format!(
            "copy '{}' to '{}': {err}",
            source.display(),
            target.display()
        ),
    )
}

impl Materializer<PathBuf> for NumberedCopyMaterializer {
    /// Copies are all-or-nothing: every target is checked before the first
    /// copy, and copies already made are removed if a later one fails.
    fn materialize(&mut self, ordered: &[PathBuf]) -> Result<(), InternalError> {
        let plan = ordered
            .iter()
            .enumerate()
            .map(|(rank, source)| -> Result<_, InternalError> {
                Ok((source, self.target_for(rank, source)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some((_, target)) = plan.iter().find(|(_, target)| target.exists()) {
            return Err(InternalError::new(
                ErrorClass::Io,
                ErrorOrigin::Storage,
                format!("refusing to overwrite '{}'", target.display()),
            ));
        }

        let mut written: Vec<&Path> = Vec::with_capacity(plan.len());
        for (source, target) in &plan {
            match copy_new(source, target) {
                Ok(bytes) => {
                    debug!("copied {} bytes to {}", bytes, target.display());
                    written.push(target);
                }
                Err(err) => {
                    for copy in written {
                        let _ = fs::remove_file(copy);
                    }
                    return Err(copy_error(source, target, &err));
                }
            }
        }
        info!("wrote {} ranked copies", ordered.len());

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn copies_land_in_sorted_next_to_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let low = write(dir.path(), "low.txt", "low");
        let high = write(dir.path(), "high.txt", "high");

        NumberedCopyMaterializer::new(None)
            .materialize(&[low, high])
            .expect("materialize");

        let sorted = dir.path().join(DEFAULT_OUTPUT_SUBDIR);
        assert_eq!(
            fs::read_to_string(sorted.join("0000_low.txt")).expect("read"),
            "low"
        );
        assert_eq!(
            fs::read_to_string(sorted.join("0001_high.txt")).expect("read"),
            "high"
        );
    }

    #[test]
    fn explicit_output_dir_is_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("ranked");
        let only = write(dir.path(), "only.png", "px");

        NumberedCopyMaterializer::new(Some(out.clone()))
            .materialize(&[only])
            .expect("materialize");

        assert!(out.join("0000_only.png").is_file());
    }

    #[test]
    fn existing_target_is_not_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = write(dir.path(), "a.txt", "new");
        fs::create_dir(dir.path().join(DEFAULT_OUTPUT_SUBDIR)).expect("mkdir");
        let existing = write(
            &dir.path().join(DEFAULT_OUTPUT_SUBDIR),
            "0000_a.txt",
            "old",
        );

        let err = NumberedCopyMaterializer::new(None)
            .materialize(&[source])
            .expect_err("must refuse");

        assert_eq!(err.class, ErrorClass::Io);
        assert_eq!(fs::read_to_string(existing).expect("read"), "old");
    }

    #[test]
    fn later_existing_target_blocks_every_copy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write(dir.path(), "a.txt", "a");
        let second = write(dir.path(), "b.txt", "b");
        let sorted = dir.path().join(DEFAULT_OUTPUT_SUBDIR);
        fs::create_dir(&sorted).expect("mkdir");
        write(&sorted, "0001_b.txt", "old");

        let err = NumberedCopyMaterializer::new(None)
            .materialize(&[first, second])
            .expect_err("must refuse");

        assert!(err.message.contains("refusing to overwrite"));
        assert!(!sorted.join("0000_a.txt").exists());
    }

    #[test]
    fn failed_copy_removes_earlier_copies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write(dir.path(), "a.txt", "a");
        let sorted = dir.path().join(DEFAULT_OUTPUT_SUBDIR);

        let err = NumberedCopyMaterializer::new(None)
            .materialize(&[first.clone(), dir.path().join("gone.txt")])
            .expect_err("must fail");
        assert_eq!(err.class, ErrorClass::Io);
        assert!(!sorted.join("0000_a.txt").exists());

        // A retry after the failure starts from a clean directory.
        let retry = write(dir.path(), "gone.txt", "back");
        NumberedCopyMaterializer::new(None)
            .materialize(&[first, retry])
            .expect("materialize");
        assert!(sorted.join("0001_gone.txt").is_file());
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = NumberedCopyMaterializer::new(None)
            .materialize(&[dir.path().join("gone.txt")])
            .expect_err("must fail");

        assert_eq!(err.class, ErrorClass::Io);
        assert_eq!(err.origin, ErrorOrigin::Storage);
    }
}
