use tracing::{
  debug,
  info,
  warn
};

use crate::bridge::PersistenceBridge;
use crate::error::TaskError;
use crate::record::TaskRecord;
use crate::storage::StoragePort;

/// Authoritative ordered list of task records.
///
/// Every successful mutation is followed by a full rewrite of the storage
/// slot. If that write fails the store keeps working in memory and reports
/// itself as degraded until a later write succeeds.
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
  records:      Vec<TaskRecord>,
  current_user: String,
  bridge:       PersistenceBridge<S>
}

impl<S: StoragePort> TaskStore<S> {
  /// Loads whatever the storage slot holds and seeds the store with it.
  #[tracing::instrument(skip_all)]
  pub fn hydrate(storage: S) -> Self {
    let mut bridge =
      PersistenceBridge::new(storage);
    let records = bridge.hydrate();
    let current_user = records
      .last()
      .map(|record| {
        record.creator.clone()
      })
      .unwrap_or_default();

    info!(
      count = records.len(),
      current_user = %current_user,
      "task store ready"
    );

    Self {
      records,
      current_user,
      bridge
    }
  }

  pub fn list(&self) -> &[TaskRecord] {
    &self.records
  }

  pub fn get(
    &self,
    index: usize
  ) -> Option<&TaskRecord> {
    self.records.get(index)
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Creator of the most recently created or edited record. After a
  /// delete it falls back to the creator of the last remaining record, the
  /// same value a reload would seed.
  pub fn current_user(&self) -> &str {
    &self.current_user
  }

  pub fn storage_degraded(
    &self
  ) -> bool {
    self.bridge.is_degraded()
  }

  pub fn storage(&self) -> &S {
    self.bridge.storage()
  }

  /// Appends `record` and returns its index.
  #[tracing::instrument(skip(self, record), fields(title = %record.title))]
  pub fn create(
    &mut self,
    record: TaskRecord
  ) -> usize {
    self.current_user =
      record.creator.clone();
    self.records.push(record);
    let index = self.records.len() - 1;
    debug!(index, "created task");
    self.persist();
    index
  }

  /// Replaces the record at `index` in place and returns the old one.
  #[tracing::instrument(skip(self, record), fields(title = %record.title))]
  pub fn update(
    &mut self,
    index: usize,
    record: TaskRecord
  ) -> Result<TaskRecord, TaskError> {
    let len = self.records.len();
    let Some(slot) =
      self.records.get_mut(index)
    else {
      return Err(
        TaskError::IndexOutOfRange {
          index,
          len
        }
      );
    };

    self.current_user =
      record.creator.clone();
    let previous =
      std::mem::replace(slot, record);
    debug!(index, "updated task");
    self.persist();
    Ok(previous)
  }

  /// Removes the record at `index`; later records shift left.
  #[tracing::instrument(skip(self))]
  pub fn delete_at(
    &mut self,
    index: usize
  ) -> Result<TaskRecord, TaskError> {
    if index >= self.records.len() {
      return Err(
        TaskError::IndexOutOfRange {
          index,
          len: self.records.len()
        }
      );
    }

    let removed =
      self.records.remove(index);
    self.current_user = self
      .records
      .last()
      .map(|record| {
        record.creator.clone()
      })
      .unwrap_or_default();
    debug!(index, "deleted task");
    self.persist();
    Ok(removed)
  }

  /// Empties the list and returns how many records were dropped.
  #[tracing::instrument(skip(self))]
  pub fn delete_all(&mut self) -> usize {
    let removed = self.records.len();
    self.records.clear();
    self.current_user.clear();
    info!(removed, "deleted all tasks");
    self.persist();
    removed
  }

  fn persist(&mut self) {
    if let Err(error) =
      self.bridge.persist(&self.records)
    {
      warn!(
        %error,
        "could not persist task \
         list; continuing in memory"
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bridge::parse_records;
  use crate::error::StorageError;
  use crate::storage::{
    MemoryStorage,
    STORAGE_KEY
  };

  fn record(
    title: &str,
    creator: &str
  ) -> TaskRecord {
    TaskRecord::new(
      title, creator, "Engineer",
      "Bob"
    )
  }

  fn stored(
    store: &TaskStore<MemoryStorage>
  ) -> Vec<TaskRecord> {
    let raw = store
      .storage()
      .get(STORAGE_KEY)
      .expect("slot written");
    parse_records(raw)
      .expect("parse slot")
  }

  #[test]
  fn empty_storage_starts_empty() {
    let store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    assert!(store.is_empty());
    assert_eq!(store.current_user(), "");
  }

  #[test]
  fn hydrate_seeds_current_user_from_last_record()
  {
    let raw = serde_json::to_string(&[
      record("a", "Amy"),
      record("b", "Dee"),
    ])
    .expect("serialize");
    let store = TaskStore::hydrate(
      MemoryStorage::with_slot(
        STORAGE_KEY,
        raw
      )
    );
    assert_eq!(store.len(), 2);
    assert_eq!(
      store.current_user(),
      "Dee"
    );
  }

  #[test]
  fn create_appends_and_persists() {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    assert_eq!(
      store.create(record("a", "Amy")),
      0
    );
    assert_eq!(
      store.create(record("b", "Dee")),
      1
    );
    assert_eq!(store.list()[1].title, "b");
    assert_eq!(stored(&store), store.list());
    assert_eq!(
      store.current_user(),
      "Dee"
    );
  }

  #[test]
  fn update_replaces_in_place() {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    store.create(record("a", "Amy"));
    store.create(record("b", "Dee"));

    let old = store
      .update(0, record("a2", "Cal"))
      .expect("update row 0");
    assert_eq!(old.title, "a");
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0].title, "a2");
    assert_eq!(store.list()[1].title, "b");
    assert_eq!(
      store.current_user(),
      "Cal"
    );
    assert_eq!(stored(&store), store.list());
  }

  #[test]
  fn out_of_range_is_rejected_without_change()
  {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    store.create(record("a", "Amy"));

    assert_eq!(
      store.update(3, record("x", "X")),
      Err(TaskError::IndexOutOfRange {
        index: 3,
        len:   1
      })
    );
    assert_eq!(
      store.delete_at(1),
      Err(TaskError::IndexOutOfRange {
        index: 1,
        len:   1
      })
    );
    assert_eq!(store.len(), 1);
    assert_eq!(
      store.current_user(),
      "Amy"
    );
  }

  #[test]
  fn delete_shifts_and_last_delete_clears_user()
  {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    store.create(record("a", "Amy"));
    store.create(record("b", "Dee"));
    store.create(record("c", "Eve"));

    let removed = store
      .delete_at(1)
      .expect("delete row 1");
    assert_eq!(removed.title, "b");
    let titles: Vec<&str> = store
      .list()
      .iter()
      .map(|r| r.title.as_str())
      .collect();
    assert_eq!(titles, ["a", "c"]);
    assert_eq!(
      store.current_user(),
      "Eve"
    );

    store.delete_at(0).expect("delete");
    store.delete_at(0).expect("delete");
    assert_eq!(store.current_user(), "");
    assert!(stored(&store).is_empty());
  }

  #[test]
  fn delete_of_latest_row_matches_reload() {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    store.create(record("a", "Amy"));
    store.create(record("b", "Dee"));
    store.delete_at(1).expect("delete row 1");
    assert_eq!(
      store.current_user(),
      "Amy"
    );

    let raw = store
      .storage()
      .get(STORAGE_KEY)
      .expect("slot written")
      .to_string();
    let reloaded = TaskStore::hydrate(
      MemoryStorage::with_slot(
        STORAGE_KEY,
        raw
      )
    );
    assert_eq!(
      reloaded.current_user(),
      store.current_user()
    );
  }

  #[test]
  fn delete_all_empties_everything() {
    let mut store = TaskStore::hydrate(
      MemoryStorage::new()
    );
    store.create(record("a", "Amy"));
    store.create(record("b", "Dee"));
    assert_eq!(store.delete_all(), 2);
    assert!(store.list().is_empty());
    assert_eq!(store.current_user(), "");
    assert_eq!(
      store.storage().get(STORAGE_KEY),
      Some("[]")
    );
    assert_eq!(store.delete_all(), 0);
  }

  struct ReadOnlyStorage;

  impl StoragePort for ReadOnlyStorage {
    fn read(
      &self,
      _key: &str
    ) -> Result<Option<String>, StorageError>
    {
      Ok(None)
    }

    fn write(
      &mut self,
      key: &str,
      _value: &str
    ) -> Result<(), StorageError> {
      Err(StorageError::Unavailable(
        format!("{key} is read-only")
      ))
    }
  }

  #[test]
  fn failed_writes_degrade_to_memory() {
    let mut store =
      TaskStore::hydrate(ReadOnlyStorage);
    assert!(!store.storage_degraded());

    store.create(record("a", "Amy"));
    assert_eq!(store.len(), 1);
    assert!(store.storage_degraded());
    store
      .update(0, record("b", "Dee"))
      .expect("update in memory");
    assert_eq!(store.list()[0].title, "b");
  }
}
