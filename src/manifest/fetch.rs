//! Fetch a previously published manifest over HTTP

use crate::core::error::{NetworkError, ReleaseResult};
use reqwest::blocking::Client;

/// GET `url` and return the response body as text
///
/// One unauthenticated request; no retries. Any non-2xx status is an error.
pub fn fetch_text(url: &str) -> ReleaseResult<String> {
  let client = Client::builder().build().map_err(|source| NetworkError::Request {
    url: url.to_string(),
    source,
  })?;
  fetch_text_with(&client, url)
}

/// Same as [`fetch_text`] with a caller-provided client
pub fn fetch_text_with(client: &Client, url: &str) -> ReleaseResult<String> {
  let response = client.get(url).send().map_err(|source| NetworkError::Request {
    url: url.to_string(),
    source,
  })?;

  let status = response.status();
  if !status.is_success() {
    return Err(
      NetworkError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      }
      .into(),
    );
  }

  let body = response.text().map_err(|source| NetworkError::Request {
    url: url.to_string(),
    source,
  })?;

  Ok(body)
}
