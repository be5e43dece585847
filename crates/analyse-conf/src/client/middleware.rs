//! Retry strategy for the HTTP client.
//!
//! The retry middleware handles transport failures and server errors; 429
//! responses are deliberately left to the client, which honors the API's
//! Retry-After header with its own bounded loop.

use reqwest_retry::{Retryable, RetryableStrategy, default_on_request_failure};

/// Retry transport failures and 5xx responses only.
pub(super) struct TransientOnly;

impl RetryableStrategy for TransientOnly {
    fn handle(
        &self,
        result: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match result {
            Ok(response) if response.status().is_server_error() => Some(Retryable::Transient),
            Ok(_) => None,
            Err(err) => default_on_request_failure(err),
        }
    }
}
