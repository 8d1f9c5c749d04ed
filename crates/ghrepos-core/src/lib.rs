// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # ghrepos Core
//!
//! Core library for the ghrepos CLI - list and search a GitHub user's
//! public repositories.
//!
//! This crate provides reusable components for:
//! - Paginated GitHub repository search with bounded concurrency
//! - Search predicates over name, description, date, language and stars
//! - Sorted, column-aligned reports
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghrepos_core::{Criteria, Pipeline, Predicate, Report, load_config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config()?;
//! let pipeline = Pipeline::new(&config)?;
//!
//! let criteria = Criteria {
//!     lang: Some("rust".to_string()),
//!     ..Criteria::default()
//! };
//! let predicate = Predicate::build(criteria, false);
//!
//! let outcome = pipeline.run("octocat", predicate.clone()).await?;
//! let report = Report::new("octocat", &predicate, outcome.repositories);
//! report.render(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API client and search endpoint
//! - [`pipeline`] - Probe, fan-out and merge of result pages
//! - [`predicate`] - Search criteria
//! - [`report`] - Sorting and tabular output

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{GhReposError, PageError};

/// Convenience Result type for ghrepos operations.
///
/// This is equivalent to `std::result::Result<T, GhReposError>`.
pub type Result<T> = std::result::Result<T, GhReposError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{AppConfig, FetchConfig, GitHubConfig, config_dir, config_file_path, load_config};

// ============================================================================
// GitHub Search
// ============================================================================

pub use github::search::{PER_PAGE, Repository, SearchPage};

// ============================================================================
// Pipeline
// ============================================================================

pub use pipeline::{Pipeline, PipelineOutcome, RunStats};
pub use predicate::{Criteria, Predicate};
pub use results::ResultSet;

// ============================================================================
// Output
// ============================================================================

pub use report::{Mode, Report, SortKey};
pub use table::TablePrinter;

// ============================================================================
// Utilities
// ============================================================================

pub use utils::{format_created_at, format_timestamp, single_line, truncate};

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod predicate;
pub mod report;
pub mod results;
pub mod table;
pub mod utils;
