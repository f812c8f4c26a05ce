use tracing::{
  debug,
  info,
  warn
};

use crate::error::ImageFetchError;

pub const DEFAULT_IMAGE_ENDPOINT: &str =
  "https://source.unsplash.com/random/800x600/?mars";

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub enum ImageState {
  #[default]
  Idle,
  Pending,
  Ready(String),
  Failed(String)
}

/// Holds the one decorative image URL of a session.
///
/// A fetch is attempted once; a failure leaves the slot empty for good.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ImageSlot {
  state: ImageState
}

impl ImageSlot {
  pub fn state(&self) -> &ImageState {
    &self.state
  }

  pub fn url(&self) -> Option<&str> {
    match &self.state {
      | ImageState::Ready(url) => {
        Some(url)
      }
      | _ => None
    }
  }

  /// Claims the single fetch attempt. Returns `false` if a fetch was
  /// already started.
  pub fn begin(&mut self) -> bool {
    if self.state != ImageState::Idle {
      debug!(state = ?self.state, "image fetch already attempted");
      return false;
    }
    self.state = ImageState::Pending;
    true
  }

  /// Records the outcome of the pending fetch. Results arriving in any
  /// other state are dropped.
  pub fn resolve(
    &mut self,
    result: Result<String, ImageFetchError>
  ) {
    if self.state != ImageState::Pending {
      debug!(
        state = ?self.state,
        "ignoring image result with no \
         pending fetch"
      );
      return;
    }
    self.state = match result {
      | Ok(url) => {
        info!(url = %url, "decorative image ready");
        ImageState::Ready(url)
      }
      | Err(error) => {
        warn!(
          %error,
          "decorative image \
           unavailable"
        );
        ImageState::Failed(
          error.to_string()
        )
      }
    };
  }
}

/// Turns a finished image request into the URL to display.
pub fn check_image_response(
  status: u16,
  final_url: &str
) -> Result<String, ImageFetchError> {
  if !(200..300).contains(&status) {
    return Err(ImageFetchError::Status(
      status
    ));
  }
  let url = final_url.trim();
  if url.is_empty() {
    return Err(ImageFetchError::EmptyUrl);
  }
  Ok(url.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_attempt_only() {
    let mut slot = ImageSlot::default();
    assert!(slot.begin());
    assert!(!slot.begin());
    slot.resolve(Err(
      ImageFetchError::Network(
        "offline".to_string()
      )
    ));
    assert!(!slot.begin());
    assert_eq!(slot.url(), None);
    assert!(matches!(
      slot.state(),
      ImageState::Failed(_)
    ));
  }

  #[test]
  fn success_exposes_url() {
    let mut slot = ImageSlot::default();
    slot.begin();
    slot.resolve(Ok(
      "https://images.example/mars.jpg"
        .to_string()
    ));
    assert_eq!(
      slot.url(),
      Some("https://images.example/mars.jpg")
    );
  }

  #[test]
  fn late_result_does_not_replace_ready_url()
  {
    let mut slot = ImageSlot::default();
    slot.begin();
    slot.resolve(Ok(
      "https://images.example/mars.jpg"
        .to_string()
    ));
    slot.resolve(Err(
      ImageFetchError::Status(500)
    ));
    assert_eq!(
      slot.url(),
      Some("https://images.example/mars.jpg")
    );
  }

  #[test]
  fn result_without_begin_is_ignored() {
    let mut slot = ImageSlot::default();
    slot.resolve(Ok(
      "https://images.example/mars.jpg"
        .to_string()
    ));
    assert_eq!(
      slot.state(),
      &ImageState::Idle
    );
    assert!(slot.begin());
  }

  #[test]
  fn response_check_rejects_failures() {
    assert_eq!(
      check_image_response(
        503,
        "https://x/y.jpg"
      ),
      Err(ImageFetchError::Status(503))
    );
    assert_eq!(
      check_image_response(200, "  "),
      Err(ImageFetchError::EmptyUrl)
    );
    assert_eq!(
      check_image_response(
        200,
        "https://x/y.jpg"
      ),
      Ok("https://x/y.jpg".to_string())
    );
  }
}
