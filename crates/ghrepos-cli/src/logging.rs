// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the ghrepos CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging to stderr,
//! keeping stdout free for the report. Log level can be controlled via the
//! `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings (e.g. unparseable dates) only
//! ghrepos octocat
//!
//! # Per-page debug output
//! ghrepos octocat -v
//!
//! # Full control
//! RUST_LOG=ghrepos_core=trace,reqwest=debug ghrepos octocat
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: warnings from our crates, errors from dependencies.
const DEFAULT_FILTER: &str = "ghrepos_core=warn,ghrepos_cli=warn,reqwest=error";

/// Filter used with `-v`.
const VERBOSE_FILTER: &str = "ghrepos_core=debug,ghrepos_cli=debug,reqwest=warn";

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects between the
/// default and the debug filter.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
