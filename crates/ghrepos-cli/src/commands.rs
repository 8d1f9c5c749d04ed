// SPDX-License-Identifier: Apache-2.0

//! Command handler: fetch, filter and report a user's repositories.

use std::time::Duration;

use anyhow::Result;
use console::style;
use ghrepos_core::{AppConfig, Pipeline, Report};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Cli, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if !ctx.is_interactive() {
        return None;
    }
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .ok()?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Runs the pipeline for the user named on the command line and prints
/// the report.
///
/// Page errors are printed to stderr and do not fail the command; a failed
/// probe does, and nothing is printed to stdout in that case.
pub async fn run(cli: &Cli, ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    let predicate = cli.predicate();
    debug!(
        user = %cli.username,
        active_criteria = predicate.active_count(),
        must = predicate.must(),
        "Starting search"
    );

    let pipeline = Pipeline::new(config)?;

    let spinner = maybe_spinner(ctx, &format!("Fetching repositories of {}...", cli.username));
    let result = pipeline.run(&cli.username, predicate.clone()).await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
    let outcome = result?;

    for err in &outcome.page_errors {
        output::report_page_error(err);
    }

    let stats = outcome.stats();
    if ctx.verbose {
        let fetched = stats.pages.saturating_sub(stats.failed_pages as u64);
        eprintln!(
            "{}",
            style(format!(
                "Fetched {fetched}/{} page(s); GitHub reports {} repositories",
                stats.pages, stats.total_count
            ))
            .for_stderr()
            .dim()
        );
    }

    let report = Report::new(&cli.username, &predicate, outcome.repositories);
    output::render_report(&report, stats, ctx)
}
