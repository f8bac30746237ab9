//! Minimal JSON fetch helper.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// GET a URL and parse the response body as JSON.
///
/// Deliberately bare: no headers, auth, timeout, or retry surface. The
/// blocking client keeps the library free of an async runtime; the host
/// environment is cooperative single-threaded anyway.
pub fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = reqwest::blocking::get(url)?;
    Ok(response.json()?)
}
