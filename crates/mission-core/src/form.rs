use tracing::debug;

use crate::error::{
  TaskError,
  ValidationFailure
};
use crate::record::TaskRecord;
use crate::storage::StoragePort;
use crate::store::TaskStore;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DraftField {
  Title,
  Creator,
  JobTitle,
  Assignee
}

impl DraftField {
  pub const ALL: [DraftField; 4] = [
    DraftField::Title,
    DraftField::Creator,
    DraftField::JobTitle,
    DraftField::Assignee
  ];

  pub fn label(self) -> &'static str {
    match self {
      | DraftField::Title => "Title",
      | DraftField::Creator => {
        "Task Creator"
      }
      | DraftField::JobTitle => {
        "Job Title"
      }
      | DraftField::Assignee => {
        "Assignee"
      }
    }
  }
}

/// Uncommitted form input.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskDraft {
  pub title:     String,
  pub creator:   String,
  pub job_title: String,
  pub assignee:  String
}

impl TaskDraft {
  pub fn from_record(
    record: &TaskRecord
  ) -> Self {
    Self {
      title:     record.title.clone(),
      creator:   record.creator.clone(),
      job_title: record
        .job_title
        .clone(),
      assignee:  record.assignee.clone()
    }
  }

  pub fn field(
    &self,
    field: DraftField
  ) -> &str {
    match field {
      | DraftField::Title => &self.title,
      | DraftField::Creator => {
        &self.creator
      }
      | DraftField::JobTitle => {
        &self.job_title
      }
      | DraftField::Assignee => {
        &self.assignee
      }
    }
  }

  pub fn set(
    &mut self,
    field: DraftField,
    value: impl Into<String>
  ) {
    let value = value.into();
    match field {
      | DraftField::Title => {
        self.title = value
      }
      | DraftField::Creator => {
        self.creator = value
      }
      | DraftField::JobTitle => {
        self.job_title = value
      }
      | DraftField::Assignee => {
        self.assignee = value
      }
    }
  }

  /// Builds the record to commit. Every field must be non-blank.
  pub fn validate(
    &self
  ) -> Result<TaskRecord, ValidationFailure> {
    let missing: Vec<DraftField> =
      DraftField::ALL
        .into_iter()
        .filter(|field| {
          self
            .field(*field)
            .trim()
            .is_empty()
        })
        .collect();

    if !missing.is_empty() {
      return Err(ValidationFailure {
        missing
      });
    }

    Ok(TaskRecord::new(
      self.title.trim(),
      self.creator.trim(),
      self.job_title.trim(),
      self.assignee.trim()
    ))
  }
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq,
)]
pub enum FormMode {
  #[default]
  Hidden,
  Creating,
  Editing {
    index: usize
  }
}

/// What a successful submit did to the store.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum SubmitOutcome {
  Created { index: usize },
  Updated { index: usize }
}

/// Create/edit lifecycle in front of the task store.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct FormController {
  mode:       FormMode,
  draft:      TaskDraft,
  last_error: Option<ValidationFailure>
}

impl FormController {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn mode(&self) -> FormMode {
    self.mode
  }

  pub fn draft(&self) -> &TaskDraft {
    &self.draft
  }

  pub fn is_open(&self) -> bool {
    self.mode != FormMode::Hidden
  }

  pub fn edit_target(
    &self
  ) -> Option<usize> {
    match self.mode {
      | FormMode::Editing { index } => {
        Some(index)
      }
      | _ => None
    }
  }

  /// Validation failure from the last rejected submit, if any.
  pub fn last_error(
    &self
  ) -> Option<&ValidationFailure> {
    self.last_error.as_ref()
  }

  pub fn start_create(&mut self) {
    debug!(from = ?self.mode, "opening create form");
    self.mode = FormMode::Creating;
    self.draft = TaskDraft::default();
    self.last_error = None;
  }

  pub fn start_edit<S: StoragePort>(
    &mut self,
    store: &TaskStore<S>,
    index: usize
  ) -> Result<(), TaskError> {
    let record =
      store.get(index).ok_or(
        TaskError::IndexOutOfRange {
          index,
          len: store.len()
        }
      )?;

    debug!(index, from = ?self.mode, "opening edit form");
    self.draft =
      TaskDraft::from_record(record);
    self.mode =
      FormMode::Editing { index };
    self.last_error = None;
    Ok(())
  }

  pub fn set_field(
    &mut self,
    field: DraftField,
    value: impl Into<String>
  ) {
    self.draft.set(field, value);
  }

  /// Commits the draft. On a validation failure the form stays open with
  /// the draft untouched.
  pub fn submit<S: StoragePort>(
    &mut self,
    store: &mut TaskStore<S>
  ) -> Result<SubmitOutcome, TaskError> {
    if self.mode == FormMode::Hidden {
      return Err(TaskError::FormNotOpen);
    }

    let record =
      match self.draft.validate() {
        | Ok(record) => record,
        | Err(failure) => {
          self.last_error =
            Some(failure.clone());
          return Err(failure.into());
        }
      };

    let outcome = match self.mode {
      | FormMode::Editing { index } => {
        if let Err(err) =
          store.update(index, record)
        {
          self.close();
          return Err(err);
        }
        SubmitOutcome::Updated { index }
      }
      | _ => {
        let index = store.create(record);
        SubmitOutcome::Created { index }
      }
    };

    self.close();
    Ok(outcome)
  }

  pub fn cancel(&mut self) {
    debug!(from = ?self.mode, "form cancelled");
    self.close();
  }

  /// Keeps an edit target pointing at the same record after the row at
  /// `removed` was deleted.
  pub fn on_row_removed(
    &mut self,
    removed: usize
  ) {
    if let FormMode::Editing { index } =
      self.mode
    {
      if index == removed {
        debug!(
          index,
          "edit target deleted; \
           closing form"
        );
        self.close();
      } else if index > removed {
        self.mode = FormMode::Editing {
          index: index - 1
        };
      }
    }
  }

  pub fn on_rows_cleared(&mut self) {
    if self.edit_target().is_some() {
      self.close();
    }
  }

  fn close(&mut self) {
    self.mode = FormMode::Hidden;
    self.draft = TaskDraft::default();
    self.last_error = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStorage;

  fn fill(
    form: &mut FormController,
    values: [&str; 4]
  ) {
    for (field, value) in
      DraftField::ALL.into_iter().zip(values)
    {
      form.set_field(field, value);
    }
  }

  fn store() -> TaskStore<MemoryStorage> {
    TaskStore::hydrate(
      MemoryStorage::new()
    )
  }

  #[test]
  fn create_flow_commits_and_hides() {
    let mut store = store();
    let mut form = FormController::new();
    form.start_create();
    assert_eq!(
      form.mode(),
      FormMode::Creating
    );
    fill(&mut form, [
      "Fix panel",
      "Amy",
      "Engineer",
      "Bob"
    ]);

    assert_eq!(
      form.submit(&mut store),
      Ok(SubmitOutcome::Created {
        index: 0
      })
    );
    assert_eq!(form.mode(), FormMode::Hidden);
    assert_eq!(
      form.draft(),
      &TaskDraft::default()
    );
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn blank_fields_block_submit_and_keep_draft()
  {
    let mut store = store();
    let mut form = FormController::new();
    form.start_create();
    fill(&mut form, [
      "Fix panel", "   ", "Engineer",
      ""
    ]);

    let err = form
      .submit(&mut store)
      .expect_err("blank fields");
    assert_eq!(
      err,
      TaskError::Validation(
        ValidationFailure {
          missing: vec![
            DraftField::Creator,
            DraftField::Assignee,
          ]
        }
      )
    );
    assert!(store.is_empty());
    assert_eq!(
      form.mode(),
      FormMode::Creating
    );
    assert_eq!(
      form.draft().title,
      "Fix panel"
    );
    assert!(form.last_error().is_some());
  }

  #[test]
  fn submitted_values_are_trimmed() {
    let mut store = store();
    let mut form = FormController::new();
    form.start_create();
    fill(&mut form, [
      "  Fix panel ",
      "Amy",
      "Engineer",
      " Bob"
    ]);
    form.submit(&mut store).expect("submit");
    assert_eq!(
      store.list()[0],
      TaskRecord::new(
        "Fix panel",
        "Amy",
        "Engineer",
        "Bob"
      )
    );
  }

  #[test]
  fn edit_prefills_and_updates_in_place() {
    let mut store = store();
    store.create(TaskRecord::new(
      "Fix panel",
      "Amy",
      "Engineer",
      "Bob"
    ));
    let mut form = FormController::new();
    form
      .start_edit(&store, 0)
      .expect("edit row 0");
    assert_eq!(
      form.draft().assignee,
      "Bob"
    );
    assert_eq!(form.edit_target(), Some(0));

    form.set_field(
      DraftField::Assignee,
      "Carol"
    );
    assert_eq!(
      form.submit(&mut store),
      Ok(SubmitOutcome::Updated {
        index: 0
      })
    );
    assert_eq!(store.len(), 1);
    assert_eq!(
      store.list()[0].assignee,
      "Carol"
    );
    assert_eq!(form.edit_target(), None);
  }

  #[test]
  fn edit_of_missing_row_leaves_form_alone() {
    let store = store();
    let mut form = FormController::new();
    assert_eq!(
      form.start_edit(&store, 0),
      Err(TaskError::IndexOutOfRange {
        index: 0,
        len:   0
      })
    );
    assert_eq!(form.mode(), FormMode::Hidden);
  }

  #[test]
  fn start_create_clears_edit_target() {
    let mut store = store();
    store.create(TaskRecord::new(
      "a", "b", "c", "d"
    ));
    let mut form = FormController::new();
    form.start_edit(&store, 0).expect("edit");
    form.start_create();
    assert_eq!(
      form.mode(),
      FormMode::Creating
    );
    assert_eq!(form.draft().title, "");
  }

  #[test]
  fn submit_without_open_form_is_rejected() {
    let mut store = store();
    let mut form = FormController::new();
    assert_eq!(
      form.submit(&mut store),
      Err(TaskError::FormNotOpen)
    );
  }

  #[test]
  fn stale_edit_target_closes_form() {
    let mut store = store();
    store.create(TaskRecord::new(
      "a", "b", "c", "d"
    ));
    let mut form = FormController::new();
    form.start_edit(&store, 0).expect("edit");
    store.delete_all();

    assert_eq!(
      form.submit(&mut store),
      Err(TaskError::IndexOutOfRange {
        index: 0,
        len:   0
      })
    );
    assert!(!form.is_open());
    assert!(store.is_empty());
  }

  #[test]
  fn row_removal_shifts_or_closes_edit_target()
  {
    let mut form = FormController {
      mode: FormMode::Editing { index: 2 },
      ..FormController::default()
    };
    form.on_row_removed(3);
    assert_eq!(form.edit_target(), Some(2));
    form.on_row_removed(0);
    assert_eq!(form.edit_target(), Some(1));
    form.on_row_removed(1);
    assert!(!form.is_open());
  }

  #[test]
  fn cancel_discards_draft() {
    let mut form = FormController::new();
    form.start_create();
    form.set_field(DraftField::Title, "x");
    form.cancel();
    assert!(!form.is_open());
    assert_eq!(form.draft().title, "");
  }
}
