use mission_core::{
  StorageError,
  StoragePort
};

/// `window.localStorage` as a storage port.
///
/// Private browsing modes and disabled storage surface as
/// `StorageError::Unavailable`; the task store then keeps running in memory.
#[derive(
  Debug, Clone, Copy, Default, PartialEq,
)]
pub struct BrowserStorage;

fn local_storage()
-> Result<web_sys::Storage, StorageError> {
  web_sys::window()
    .ok_or_else(|| {
      StorageError::Unavailable(
        "no window".to_string()
      )
    })?
    .local_storage()
    .map_err(|err| {
      StorageError::Unavailable(format!(
        "{err:?}"
      ))
    })?
    .ok_or_else(|| {
      StorageError::Unavailable(
        "localStorage is disabled"
          .to_string()
      )
    })
}

impl StoragePort for BrowserStorage {
  fn read(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    local_storage()?.get_item(key).map_err(
      |err| StorageError::Read {
        key:    key.to_string(),
        reason: format!("{err:?}")
      }
    )
  }

  fn write(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    local_storage()?
      .set_item(key, value)
      .map_err(|err| {
        StorageError::Write {
          key:    key.to_string(),
          reason: format!("{err:?}")
        }
      })
  }
}
