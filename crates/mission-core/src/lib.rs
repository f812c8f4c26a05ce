//! Task list core shared by the browser and terminal front ends.
//!
//! A [`Session`] wires the [`TaskStore`] (mirrored into the `workers`
//! storage slot through a [`PersistenceBridge`]) to the create/edit form,
//! the detail overlay and the decorative image slot.

pub mod bridge;
pub mod detail;
pub mod error;
pub mod form;
pub mod image;
pub mod record;
pub mod session;
pub mod storage;
pub mod store;

pub use bridge::PersistenceBridge;
pub use detail::DetailView;
pub use error::{
  ImageFetchError,
  StorageError,
  TaskError,
  ValidationFailure
};
pub use form::{
  DraftField,
  FormController,
  FormMode,
  SubmitOutcome,
  TaskDraft
};
pub use image::{
  DEFAULT_IMAGE_ENDPOINT,
  ImageSlot,
  ImageState,
  check_image_response
};
pub use record::TaskRecord;
pub use session::{
  Event,
  Session
};
pub use storage::{
  MemoryStorage,
  STORAGE_KEY,
  StoragePort
};
pub use store::TaskStore;
