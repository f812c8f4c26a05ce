use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use mission_core::{StorageError, StoragePort};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One `<key>.json` file per storage slot under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[tracing::instrument(skip(dir))]
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        info!(data_dir = %dir.display(), "opened file storage");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(file = %path.display(), bytes = raw.len(), "read storage slot");
                Ok(Some(raw))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {err}", path.display()),
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let fail = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|err| fail(err.to_string()))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|err| fail(err.to_string()))?;
        temp.persist(&path)
            .map_err(|err| fail(format!("{}: {}", path.display(), err)))?;

        debug!(file = %path.display(), bytes = value.len(), "wrote storage slot");
        Ok(())
    }
}
