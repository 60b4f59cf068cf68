//! Shared HTTP plumbing for the resource clients

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};

use crate::config::ApiConfig;
use crate::errors::ApiError;

/// Build the shared HTTP client with the configured request timeout.
///
/// A request that exceeds the timeout fails as a communication error
/// instead of hanging its caller forever.
pub fn build_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?)
}

/// Request with the session's bearer token attached.
///
/// The caller reads the token before the request is issued, so the header
/// reflects the session at call time, not at resolution time.
pub(crate) fn bearer_request(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
) -> RequestBuilder {
    client
        .request(method, url)
        .header("Authorization", format!("Bearer {token}"))
}
