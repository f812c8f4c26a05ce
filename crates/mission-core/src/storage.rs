use std::collections::HashMap;

use crate::error::StorageError;

/// Fixed key of the slot that mirrors the task list.
pub const STORAGE_KEY: &str = "workers";

/// Durable key/value slot the task list is mirrored into.
///
/// Browser `localStorage`, a directory of files and an in-memory map all
/// fit behind this.
pub trait StoragePort {
  fn read(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;
}

impl<T: StoragePort + ?Sized> StoragePort
  for Box<T>
{
  fn read(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    (**self).read(key)
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    (**self).write(key, value)
  }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  slots: HashMap<String, String>
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Storage that already holds `value` under `key`.
  pub fn with_slot(
    key: &str,
    value: impl Into<String>
  ) -> Self {
    let mut slots = HashMap::new();
    slots.insert(
      key.to_string(),
      value.into()
    );
    Self { slots }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .slots
      .get(key)
      .map(String::as_str)
  }
}

impl StoragePort for MemoryStorage {
  fn read(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.slots.get(key).cloned())
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self.slots.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}
