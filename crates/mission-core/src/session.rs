use tracing::{
  debug,
  warn
};

use crate::detail::DetailView;
use crate::error::{
  ImageFetchError,
  TaskError
};
use crate::form::{
  DraftField,
  FormController,
  SubmitOutcome
};
use crate::image::ImageSlot;
use crate::record::TaskRecord;
use crate::storage::StoragePort;
use crate::store::TaskStore;

/// User and runtime events a front end feeds into a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  StartCreate,
  StartEdit(usize),
  SetField(DraftField, String),
  Submit,
  Cancel,
  Delete(usize),
  DeleteAll,
  View(usize),
  CloseView,
  ImageRequested,
  ImageResolved(
    Result<String, ImageFetchError>
  )
}

/// Everything one front end instance works with: the task store, the form,
/// the detail overlay and the decorative image.
#[derive(Debug, Clone)]
pub struct Session<S> {
  store:  TaskStore<S>,
  form:   FormController,
  detail: DetailView,
  image:  ImageSlot
}

impl<S: StoragePort> Session<S> {
  pub fn open(storage: S) -> Self {
    Self {
      store:  TaskStore::hydrate(
        storage
      ),
      form:   FormController::new(),
      detail: DetailView::default(),
      image:  ImageSlot::default()
    }
  }

  pub fn store(&self) -> &TaskStore<S> {
    &self.store
  }

  pub fn tasks(&self) -> &[TaskRecord] {
    self.store.list()
  }

  pub fn current_user(&self) -> &str {
    self.store.current_user()
  }

  pub fn form(&self) -> &FormController {
    &self.form
  }

  pub fn detail(&self) -> &DetailView {
    &self.detail
  }

  pub fn image(&self) -> &ImageSlot {
    &self.image
  }

  /// Applies `event`. Errors are logged here as well as returned; none of
  /// them leave the session in a broken state.
  pub fn dispatch(
    &mut self,
    event: Event
  ) -> Result<(), TaskError> {
    let label = event_label(&event);
    let result = self.apply(event);
    match &result {
      | Ok(()) => {
        debug!(event = label, "event applied")
      }
      | Err(error) => {
        warn!(event = label, %error, "event rejected")
      }
    }
    result
  }

  fn apply(
    &mut self,
    event: Event
  ) -> Result<(), TaskError> {
    match event {
      | Event::StartCreate => {
        self.form.start_create();
      }
      | Event::StartEdit(index) => {
        self
          .form
          .start_edit(&self.store, index)?;
      }
      | Event::SetField(field, value) => {
        self.form.set_field(field, value);
      }
      | Event::Submit => {
        self.submit()?;
      }
      | Event::Cancel => self.form.cancel(),
      | Event::Delete(index) => {
        self.delete_at(index)?;
      }
      | Event::DeleteAll => {
        self.store.delete_all();
        self.form.on_rows_cleared();
        self.detail.close();
      }
      | Event::View(index) => {
        self
          .detail
          .show(&self.store, index)?;
      }
      | Event::CloseView => {
        self.detail.close()
      }
      | Event::ImageRequested => {
        self.image.begin();
      }
      | Event::ImageResolved(result) => {
        self.image.resolve(result);
      }
    }
    Ok(())
  }

  /// Submits the open form and returns what it did.
  pub fn submit(
    &mut self
  ) -> Result<SubmitOutcome, TaskError> {
    let outcome =
      self.form.submit(&mut self.store)?;
    if let SubmitOutcome::Updated {
      index
    } = outcome
      && let Some(record) =
        self.store.get(index)
    {
      self
        .detail
        .on_row_updated(index, record);
    }
    Ok(outcome)
  }

  pub fn delete_at(
    &mut self,
    index: usize
  ) -> Result<TaskRecord, TaskError> {
    let removed =
      self.store.delete_at(index)?;
    self.form.on_row_removed(index);
    self.detail.on_row_removed(index);
    Ok(removed)
  }

  /// Claims the single image fetch attempt.
  pub fn begin_image_fetch(
    &mut self
  ) -> bool {
    self.image.begin()
  }
}

fn event_label(
  event: &Event
) -> &'static str {
  match event {
    | Event::StartCreate => {
      "start_create"
    }
    | Event::StartEdit(_) => {
      "start_edit"
    }
    | Event::SetField(..) => "set_field",
    | Event::Submit => "submit",
    | Event::Cancel => "cancel",
    | Event::Delete(_) => "delete",
    | Event::DeleteAll => "delete_all",
    | Event::View(_) => "view",
    | Event::CloseView => "close_view",
    | Event::ImageRequested => {
      "image_requested"
    }
    | Event::ImageResolved(_) => {
      "image_resolved"
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::form::FormMode;
  use crate::storage::MemoryStorage;

  fn session() -> Session<MemoryStorage> {
    Session::open(MemoryStorage::new())
  }

  fn create(
    session: &mut Session<MemoryStorage>,
    values: [&str; 4]
  ) {
    session
      .dispatch(Event::StartCreate)
      .expect("start create");
    for (field, value) in
      DraftField::ALL.into_iter().zip(values)
    {
      session
        .dispatch(Event::SetField(
          field,
          value.to_string()
        ))
        .expect("set field");
    }
    session
      .dispatch(Event::Submit)
      .expect("submit");
  }

  #[test]
  fn deleting_above_edit_target_keeps_editing_same_record()
  {
    let mut session = session();
    create(&mut session, ["a", "Amy", "Pilot", "Bob"]);
    create(&mut session, ["b", "Dee", "Medic", "Eve"]);

    session
      .dispatch(Event::StartEdit(1))
      .expect("edit row 1");
    session
      .dispatch(Event::Delete(0))
      .expect("delete row 0");
    assert_eq!(
      session.form().mode(),
      FormMode::Editing { index: 0 }
    );

    session
      .dispatch(Event::SetField(
        DraftField::Title,
        "b2".to_string()
      ))
      .expect("set title");
    session
      .dispatch(Event::Submit)
      .expect("submit edit");
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].title, "b2");
    assert_eq!(
      session.tasks()[0].creator,
      "Dee"
    );
  }

  #[test]
  fn delete_all_closes_edit_and_view() {
    let mut session = session();
    create(&mut session, ["a", "Amy", "Pilot", "Bob"]);
    session
      .dispatch(Event::View(0))
      .expect("view");
    session
      .dispatch(Event::StartEdit(0))
      .expect("edit");
    session
      .dispatch(Event::DeleteAll)
      .expect("delete all");

    assert!(session.tasks().is_empty());
    assert!(!session.form().is_open());
    assert!(session.detail().current().is_none());
    assert_eq!(session.current_user(), "");
  }

  #[test]
  fn view_follows_edits() {
    let mut session = session();
    create(&mut session, ["a", "Amy", "Pilot", "Bob"]);
    session
      .dispatch(Event::View(0))
      .expect("view");
    session
      .dispatch(Event::StartEdit(0))
      .expect("edit");
    session
      .dispatch(Event::SetField(
        DraftField::Assignee,
        "Carol".to_string()
      ))
      .expect("set");
    session
      .dispatch(Event::Submit)
      .expect("submit");
    assert_eq!(
      session
        .detail()
        .current()
        .map(|r| r.assignee.as_str()),
      Some("Carol")
    );
  }

  #[test]
  fn stale_indices_are_rejected_not_fatal() {
    let mut session = session();
    assert!(matches!(
      session.dispatch(Event::Delete(0)),
      Err(TaskError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
      session.dispatch(Event::StartEdit(5)),
      Err(TaskError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
      session.dispatch(Event::View(2)),
      Err(TaskError::IndexOutOfRange { .. })
    ));
    create(&mut session, ["a", "Amy", "Pilot", "Bob"]);
    assert_eq!(session.tasks().len(), 1);
  }

  #[test]
  fn second_image_result_keeps_first_url() {
    let mut session = session();
    session
      .dispatch(Event::ImageRequested)
      .expect("request image");
    session
      .dispatch(Event::ImageResolved(Ok(
        "https://images.example/mars.jpg"
          .to_string()
      )))
      .expect("resolve ok");
    session
      .dispatch(Event::ImageResolved(Err(
        ImageFetchError::Status(500)
      )))
      .expect("late result");
    assert_eq!(
      session.image().url(),
      Some("https://images.example/mars.jpg")
    );
  }
}
