use tracing::{
  debug,
  info,
  warn
};

use crate::error::{
  StorageError,
  TaskError
};
use crate::record::TaskRecord;
use crate::storage::{
  STORAGE_KEY,
  StoragePort
};

/// Mirrors the task list into the `workers` storage slot.
#[derive(Debug, Clone)]
pub struct PersistenceBridge<S> {
  storage:  S,
  degraded: bool
}

impl<S: StoragePort> PersistenceBridge<S> {
  pub fn new(storage: S) -> Self {
    Self {
      storage,
      degraded: false
    }
  }

  /// Reads the stored list. Never fails: an absent, unreadable or
  /// malformed slot yields an empty list. Only an unreadable slot marks
  /// the bridge degraded; malformed data is overwritten by the next write.
  #[tracing::instrument(skip(self))]
  pub fn hydrate(
    &mut self
  ) -> Vec<TaskRecord> {
    let raw =
      match self.storage.read(STORAGE_KEY)
      {
        | Ok(Some(raw)) => raw,
        | Ok(None) => {
          debug!(
            key = STORAGE_KEY,
            "storage slot is empty"
          );
          return Vec::new();
        }
        | Err(error) => {
          warn!(
            %error,
            "storage unreadable; \
             starting with an empty \
             task list"
          );
          self.degraded = true;
          return Vec::new();
        }
      };

    match parse_records(&raw) {
      | Ok(records) => {
        info!(
          count = records.len(),
          "hydrated task list from \
           storage"
        );
        records
      }
      | Err(error) => {
        warn!(
          %error,
          "ignoring malformed stored \
           task list"
        );
        Vec::new()
      }
    }
  }

  /// Overwrites the slot with the full list.
  #[tracing::instrument(skip(self, records), fields(count = records.len()))]
  pub fn persist(
    &mut self,
    records: &[TaskRecord]
  ) -> Result<(), StorageError> {
    let json =
      serde_json::to_string(records)
        .map_err(|err| {
          StorageError::Write {
            key:    STORAGE_KEY
              .to_string(),
            reason: err.to_string()
          }
        })?;

    match self
      .storage
      .write(STORAGE_KEY, &json)
    {
      | Ok(()) => {
        if self.degraded {
          info!(
            "storage writable again"
          );
        }
        self.degraded = false;
        debug!("persisted task list");
        Ok(())
      }
      | Err(error) => {
        self.degraded = true;
        Err(error)
      }
    }
  }

  /// Whether the last storage access failed.
  pub fn is_degraded(&self) -> bool {
    self.degraded
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn storage_mut(
    &mut self
  ) -> &mut S {
    &mut self.storage
  }

  pub fn into_storage(self) -> S {
    self.storage
  }
}

/// Parses the stored slot. A JSON `null` counts as an empty list.
pub fn parse_records(
  raw: &str
) -> Result<Vec<TaskRecord>, TaskError> {
  serde_json::from_str::<
    Option<Vec<TaskRecord>>
  >(raw)
  .map(Option::unwrap_or_default)
  .map_err(|err| {
    TaskError::MalformedStorageData(
      err.to_string()
    )
  })
}
