// SPDX-License-Identifier: Apache-2.0

//! Configuration management for ghrepos.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `GHREPOS_`)
//! 2. Config file: `~/.config/ghrepos/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Point the tool at a GitHub Enterprise instance
//! GHREPOS_GITHUB__API_URL=https://github.example.com/api/v3 ghrepos octocat
//!
//! # Fetch at most 4 pages at a time
//! GHREPOS_FETCH__CONCURRENCY=4 ghrepos octocat
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::GhReposError;

/// Default GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default cap on in-flight page fetches.
pub const DEFAULT_CONCURRENCY: usize = 19;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Page fetch settings.
    pub fetch: FetchConfig,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root, without a trailing slash.
    pub api_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_seconds: 10,
        }
    }
}

/// Page fetch settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of pages fetched concurrently.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl FetchConfig {
    /// Concurrency limit, never below one.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Returns the ghrepos configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/ghrepos`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("ghrepos");
    }
    dirs::home_dir()
        .map_or_else(|| PathBuf::from(".config"), |home| home.join(".config"))
        .join("ghrepos")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `GHREPOS_` and double underscore
/// for nested keys (e.g., `GHREPOS_GITHUB__API_URL`).
///
/// # Errors
///
/// Returns `GhReposError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, GhReposError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("GHREPOS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
