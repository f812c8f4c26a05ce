use crate::error::TaskError;
use crate::record::TaskRecord;
use crate::storage::StoragePort;
use crate::store::TaskStore;

/// Read-only overlay showing one record.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct DetailView {
  shown: Option<(usize, TaskRecord)>
}

impl DetailView {
  pub fn show<S: StoragePort>(
    &mut self,
    store: &TaskStore<S>,
    index: usize
  ) -> Result<(), TaskError> {
    let record = store.get(index).ok_or(
      TaskError::IndexOutOfRange {
        index,
        len: store.len()
      }
    )?;
    self.shown =
      Some((index, record.clone()));
    Ok(())
  }

  pub fn close(&mut self) {
    self.shown = None;
  }

  pub fn current(
    &self
  ) -> Option<&TaskRecord> {
    self
      .shown
      .as_ref()
      .map(|(_, record)| record)
  }

  pub fn index(&self) -> Option<usize> {
    self.shown.as_ref().map(|(i, _)| *i)
  }

  /// Re-snapshots the shown row after it was edited.
  pub fn on_row_updated(
    &mut self,
    index: usize,
    record: &TaskRecord
  ) {
    if let Some((shown, snapshot)) =
      self.shown.as_mut()
      && *shown == index
    {
      *snapshot = record.clone();
    }
  }

  pub fn on_row_removed(
    &mut self,
    removed: usize
  ) {
    let Some(index) = self.index() else {
      return;
    };
    if index == removed {
      self.shown = None;
    } else if index > removed
      && let Some((shown, _)) =
        self.shown.as_mut()
    {
      *shown -= 1;
    }
  }
}
