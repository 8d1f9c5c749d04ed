// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides the anonymous HTTP client and the repository search endpoint.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::error::GhReposError;

pub mod search;

/// Media type recommended by the GitHub REST API.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// User agent sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("ghrepos/", env!("CARGO_PKG_VERSION"));

/// Creates the unauthenticated HTTP client used for all GitHub requests.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn create_client(config: &GitHubConfig) -> crate::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

    debug!(
        api_url = %config.api_url,
        timeout_seconds = config.api_timeout_seconds,
        "Creating GitHub client"
    );

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.api_timeout_seconds))
        .build()?;

    Ok(client)
}

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Builds an `Api` error from a non-success response.
///
/// Uses GitHub's `message` field when the body carries one, otherwise the
/// canonical reason phrase of the status code.
pub(crate) fn api_error(status: StatusCode, body: &[u8]) -> GhReposError {
    let message = serde_json::from_slice::<ApiErrorBody>(body).map_or_else(
        |_| status.canonical_reason().unwrap_or("unknown error").to_string(),
        |b| b.message,
    );
    GhReposError::Api {
        status: status.as_u16(),
        message,
    }
}
