// SPDX-License-Identifier: Apache-2.0

//! Output rendering for the CLI.
//!
//! The report goes to stdout in the selected format; page errors go to
//! stderr so a partial failure never corrupts the report.

use std::io::{self, Write};

use anyhow::{Context, Result};
use console::style;
use ghrepos_core::{PageError, Report, RunStats, single_line};
use serde::Serialize;

use crate::cli::{OutputContext, OutputFormat};

/// Trait for types that can be rendered in multiple output formats.
pub trait Renderable: Serialize {
    /// Render as human-readable text to the given writer.
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()>;

    /// Render as markdown. Defaults to text rendering.
    fn render_markdown(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        self.render_text(w, ctx)
    }
}

/// Generic render function - handles JSON via serde, delegates text/markdown to trait.
pub fn render<T: Renderable>(result: &T, ctx: &OutputContext, w: &mut dyn Write) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(result).context("Failed to serialize to JSON")?;
            writeln!(w, "{json}").context("Failed to write JSON")?;
        }
        OutputFormat::Markdown => {
            result
                .render_markdown(w, ctx)
                .context("Failed to render markdown")?;
        }
        OutputFormat::Text => {
            result.render_text(w, ctx).context("Failed to render text")?;
        }
    }
    Ok(())
}

/// Report plus run counters, as shown to the user.
#[derive(Serialize)]
pub struct ReportView<'a> {
    /// Sorted report.
    #[serde(flatten)]
    pub report: &'a Report,
    /// Counters from the pipeline run.
    pub stats: RunStats,
}

/// Flattens and escapes text so it stays inside one markdown table cell.
fn md_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

impl Renderable for ReportView<'_> {
    fn render_text(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        self.report.render(w)
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        writeln!(w, "## {}\n", self.report.summary())?;
        writeln!(w, "| {} |", ghrepos_core::report::COLUMNS.join(" | "))?;
        writeln!(w, "|---|---|---:|---|---|")?;
        for repo in &self.report.repositories {
            writeln!(
                w,
                "| {} | {} | {} | {} | {} |",
                md_cell(&repo.full_name),
                md_cell(&repo.description),
                repo.stars,
                md_cell(&repo.language),
                md_cell(&repo.created_at)
            )?;
        }
        Ok(())
    }
}

/// Prints the report to stdout.
pub fn render_report(report: &Report, stats: RunStats, ctx: &OutputContext) -> Result<()> {
    let view = ReportView { report, stats };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render(&view, ctx, &mut handle)
}

/// Prints a page error to stderr.
pub fn report_page_error(err: &PageError) {
    eprintln!("{} {err}", style("error:").for_stderr().red().bold());
}
