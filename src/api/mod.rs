pub mod auth;
pub mod user_words;
pub mod words;

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://rs-lang-2022.herokuapp.com";

const HTTP_TIMEOUT_SECS: u64 = 10;

/// Errors at the REST seam. `NotFound` is split out from other HTTP
/// failures because the progress store only creates records on a true 404.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("server returned status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("word fetch worker died")]
    Worker,
}

/// Blocking client for the remote word service. Cheap to clone; the
/// underlying reqwest client shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL for a server-relative media path (word audio/images).
    pub fn media_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Map a non-2xx response to an `ApiError`, keeping 404 distinct.
pub(crate) fn status_error(status: reqwest::StatusCode) -> ApiError {
    if status == reqwest::StatusCode::NOT_FOUND {
        ApiError::NotFound
    } else {
        ApiError::Status(status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://example.com/");
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.url("/words"), "https://example.com/words");
    }

    #[test]
    fn media_url_joins_relative_paths() {
        let client = ApiClient::new("https://example.com");
        assert_eq!(
            client.media_url("files/01_0001.mp3"),
            "https://example.com/files/01_0001.mp3"
        );
        assert_eq!(
            client.media_url("/files/01_0001.mp3"),
            "https://example.com/files/01_0001.mp3"
        );
    }

    #[test]
    fn status_error_distinguishes_not_found() {
        assert!(matches!(
            status_error(reqwest::StatusCode::NOT_FOUND),
            ApiError::NotFound
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Status(500)
        ));
    }
}
