use std::fmt;

use thiserror::Error;

use crate::form::DraftField;

/// Failures surfaced by the task core.
///
/// None of these are fatal: callers log them and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
  #[error(
    "row {index} does not exist \
     (list has {len} tasks)"
  )]
  IndexOutOfRange {
    index: usize,
    len:   usize
  },

  #[error(transparent)]
  Validation(#[from] ValidationFailure),

  #[error("no task form is open")]
  FormNotOpen,

  #[error(
    "stored task data is malformed: \
     {0}"
  )]
  MalformedStorageData(String),

  #[error(transparent)]
  Storage(#[from] StorageError)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
  #[error(
    "storage is unavailable: {0}"
  )]
  Unavailable(String),

  #[error(
    "failed reading slot {key}: \
     {reason}"
  )]
  Read {
    key:    String,
    reason: String
  },

  #[error(
    "failed writing slot {key}: \
     {reason}"
  )]
  Write {
    key:    String,
    reason: String
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageFetchError {
  #[error(
    "image request failed: {0}"
  )]
  Network(String),

  #[error(
    "image service answered with \
     status {0}"
  )]
  Status(u16),

  #[error(
    "image service returned no url"
  )]
  EmptyUrl
}

/// Required draft fields that were blank at submit time, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
  pub missing: Vec<DraftField>
}

impl fmt::Display for ValidationFailure {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    let labels: Vec<&str> = self
      .missing
      .iter()
      .map(|field| field.label())
      .collect();
    write!(
      f,
      "required fields are empty: {}",
      labels.join(", ")
    )
  }
}

impl std::error::Error
  for ValidationFailure
{
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_message_lists_fields_in_order() {
    let failure = ValidationFailure {
      missing: vec![
        DraftField::Title,
        DraftField::Assignee,
      ]
    };
    assert_eq!(
      failure.to_string(),
      "required fields are empty: \
       Title, Assignee"
    );
  }

  #[test]
  fn out_of_range_mentions_length() {
    let err = TaskError::IndexOutOfRange {
      index: 4,
      len:   2
    };
    assert_eq!(
      err.to_string(),
      "row 4 does not exist (list \
       has 2 tasks)"
    );
  }
}
