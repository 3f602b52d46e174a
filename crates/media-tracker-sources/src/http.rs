use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::error::SourceError;

const USER_AGENT: &str = concat!("watchboard/", env!("CARGO_PKG_VERSION"));

fn build_http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Create a reqwest Client with the configured per-request timeout
pub fn create_http_client(timeout_secs: u64) -> Client {
    build_http_client(timeout_secs).unwrap_or_else(|e| {
        warn!(
            "Failed to build HTTP client ({}); falling back to defaults without the {}s timeout",
            e, timeout_secs
        );
        Client::new()
    })
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "status_message")]
    error: Option<String>,
}

/// Pull a human-readable message out of an error response body. Both the
/// persistence service (`{"error": ...}`) and TMDB (`{"status_message": ...}`)
/// are understood; anything else is returned as-is.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Turn a non-2xx response into a typed error, passing successes through
pub async fn ensure_success(service: &'static str, response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SourceError::rejected(service, status.as_u16(), error_message(&body)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_client_builds_without_fallback() {
        assert!(build_http_client(30).is_ok());
    }

    #[test]
    fn test_error_message_from_persistence_body() {
        assert_eq!(
            error_message(r#"{"error": "Media already exists in user library"}"#),
            "Media already exists in user library"
        );
    }

    #[test]
    fn test_error_message_from_tmdb_body() {
        assert_eq!(
            error_message(r#"{"status_code": 7, "status_message": "Invalid API key: You must be granted a valid key."}"#),
            "Invalid API key: You must be granted a valid key."
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }
}
