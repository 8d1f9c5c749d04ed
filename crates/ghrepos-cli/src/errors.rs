// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `GhReposError` and appends a hint for the
//! error kinds a user can do something about.

use anyhow::Error;
use ghrepos_core::error::GhReposError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `GhReposError`, returns the original error message.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<GhReposError>() else {
        return error.to_string();
    };

    match err {
        GhReposError::Api { .. } if err.is_rate_limited() => format!(
            "{err}\n\nTip: Anonymous GitHub searches are rate limited. Wait a minute and try again."
        ),
        GhReposError::Api { status: 422, .. } => {
            format!("{err}\n\nTip: Check that the username exists on GitHub.")
        }
        GhReposError::Api { .. } | GhReposError::InvalidUsername(_) => err.to_string(),
        GhReposError::Network(_) => {
            format!("{err}\n\nTip: Check your internet connection and try again.")
        }
        GhReposError::Decode(_) => format!(
            "{err}\n\nTip: The server did not answer like the GitHub Search API. Check github.api_url in {}",
            ghrepos_core::config_file_path().display()
        ),
        GhReposError::Config { .. } => format!(
            "{err}\n\nTip: Check your config file at {}",
            ghrepos_core::config_file_path().display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate_limited_error() {
        let error = GhReposError::Api {
            status: 403,
            message: "API rate limit exceeded for 10.0.0.1.".to_string(),
        };
        let formatted = format_error(&anyhow::Error::new(error));

        assert!(formatted.contains("HTTP 403"));
        assert!(formatted.contains("rate limited"));
    }

    #[test]
    fn test_format_unknown_user_error() {
        let error = GhReposError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        let formatted = format_error(&anyhow::Error::new(error));

        assert!(formatted.contains("Validation Failed"));
        assert!(formatted.contains("username exists"));
    }

    #[test]
    fn test_format_config_error() {
        let error = GhReposError::Config {
            message: "invalid type".to_string(),
        };
        let formatted = format_error(&anyhow::Error::new(error));

        assert!(formatted.contains("Configuration error: invalid type"));
        assert!(formatted.contains("config.toml"));
    }

    #[test]
    fn test_format_error_through_context() {
        let error = anyhow::Error::new(GhReposError::Config {
            message: "bad".to_string(),
        })
        .context("Failed to load configuration");
        let formatted = format_error(&error);

        assert!(formatted.contains("Tip: Check your config file"));
    }

    #[test]
    fn test_format_non_ghrepos_error() {
        let error = anyhow::anyhow!("Some generic error");
        let formatted = format_error(&error);

        assert_eq!(formatted, "Some generic error");
    }
}
