// SPDX-License-Identifier: Apache-2.0

//! Error types for ghrepos.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while fetching and filtering repositories.
#[derive(Error, Debug)]
pub enum GhReposError {
    /// Network/HTTP transport error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// GitHub answered with a non-success status code.
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the GitHub error body, or the status reason.
        message: String,
    },

    /// Response body was not the expected search payload.
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Username is empty or otherwise unusable in a search query.
    #[error("Invalid GitHub username: {0:?}")]
    InvalidUsername(String),
}

impl GhReposError {
    /// Returns true if GitHub reported an exhausted rate limit.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GhReposError::Api { status, message } => {
                *status == 429 || (*status == 403 && message.to_lowercase().contains("rate limit"))
            }
            _ => false,
        }
    }
}

impl From<config::ConfigError> for GhReposError {
    fn from(err: config::ConfigError) -> Self {
        GhReposError::Config {
            message: err.to_string(),
        }
    }
}

/// Failure of a single page fetch after the probe.
///
/// Page errors are reported and the pipeline carries on with the pages
/// that succeeded.
#[derive(Error, Debug)]
#[error("page {page}: {source}")]
pub struct PageError {
    /// Page number (1-based).
    pub page: u64,
    /// Underlying cause.
    #[source]
    pub source: GhReposError,
}
