use std::time::Duration;

use mission_core::{
  ImageFetchError,
  check_image_response
};
use tracing::{
  debug,
  info
};

/// Requests `endpoint` once, following redirects, and returns the final
/// image URL.
#[tracing::instrument(skip(timeout))]
pub fn fetch_image_url(
  endpoint: &str,
  timeout: Duration
) -> Result<String, ImageFetchError> {
  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .map_err(|err| {
        ImageFetchError::Network(format!(
          "failed starting runtime: \
           {err}"
        ))
      })?;

  runtime.block_on(fetch(
    endpoint, timeout
  ))
}

async fn fetch(
  endpoint: &str,
  timeout: Duration
) -> Result<String, ImageFetchError> {
  let client = reqwest::Client::builder()
    .timeout(timeout)
    .build()
    .map_err(|err| {
      ImageFetchError::Network(format!(
        "failed building HTTP client: \
         {err}"
      ))
    })?;

  info!(endpoint, "requesting decorative image");
  let response = client
    .get(endpoint)
    .send()
    .await
    .map_err(|err| {
      ImageFetchError::Network(
        err.to_string()
      )
    })?;

  let status = response.status();
  debug!(
    status = status.as_u16(),
    url = %response.url(),
    "image service answered"
  );
  check_image_response(
    status.as_u16(),
    response.url().as_str()
  )
}
