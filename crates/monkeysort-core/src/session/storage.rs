//! Session bytes at rest.
//!
//! The session file is replaced atomically: bytes go to a sibling temporary
//! file, are synced, then renamed over the previous session.

use crate::error::InternalError;
use log::debug;
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

///
/// SessionStorage
///

pub trait SessionStorage {
    /// Persisted bytes, or `None` if no session has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, InternalError>;

    fn save(&mut self, bytes: &[u8]) -> Result<(), InternalError>;
}

///
/// FileStorage
///
/// One session file per working directory.
///

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");

        self.path.with_file_name(name)
    }

    fn write_staged(&self, staging: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = File::create(staging)?;
        file.write_all(bytes)?;
        file.sync_all()?;

        fs::rename(staging, &self.path)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, InternalError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(InternalError::storage_io(
                format_args!("read session file '{}'", self.path.display()),
                &err,
            )),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), InternalError> {
        let staging = self.staging_path();

        self.write_staged(&staging, bytes).map_err(|err| {
            // Best effort; the previous session file is still intact.
            let _ = fs::remove_file(&staging);
            InternalError::storage_io(
                format_args!("write session file '{}'", self.path.display()),
                &err,
            )
        })?;
        debug!("saved {} bytes to {}", bytes.len(), self.path.display());

        Ok(())
    }
}

///
/// MemoryStorage
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            saves: 0,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, InternalError> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), InternalError> {
        self.bytes = Some(bytes.to_vec());
        self.saves += 1;

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorClass, ErrorOrigin};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("sort.mky"));

        assert_eq!(storage.load().expect("load"), None);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("sort.mky"));

        storage.save(&[1, 2, 3, 4, 5]).expect("save");
        storage.save(&[9]).expect("save");

        assert_eq!(storage.load().expect("load"), Some(vec![9]));
        assert!(!dir.path().join("sort.mky.tmp").exists());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("gone").join("sort.mky"));

        let err = storage.save(&[0]).expect_err("must fail");

        assert_eq!(err.class, ErrorClass::Io);
        assert_eq!(err.origin, ErrorOrigin::Storage);
        assert!(err.message.contains("write session file"));
    }

    #[test]
    fn memory_storage_counts_saves() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load().expect("load"), None);

        storage.save(&[7]).expect("save");
        storage.save(&[8]).expect("save");

        assert_eq!(storage.bytes(), Some(&[8u8][..]));
        assert_eq!(storage.save_count(), 2);
    }
}
