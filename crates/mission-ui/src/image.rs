use gloo::net::http::Request;
use mission_core::{
  ImageFetchError,
  check_image_response
};

/// One request to the image service; the browser follows the redirect and
/// the final response URL is the image.
pub async fn fetch_image_url(
  endpoint: &str
) -> Result<String, ImageFetchError> {
  let response = Request::get(endpoint)
    .send()
    .await
    .map_err(|err| {
      ImageFetchError::Network(
        err.to_string()
      )
    })?;

  check_image_response(
    response.status(),
    &response.url()
  )
}
