// SPDX-License-Identifier: Apache-2.0

//! ghrepos - list and search a GitHub user's public repositories.
//!
//! Fetches every page of the user's repositories concurrently, filters them
//! by name, description, creation date, language and stars, and prints an
//! aligned table.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ghrepos_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext, USAGE_EXIT_CODE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => return usage_error(&err),
    };

    if cli.username.trim().is_empty() {
        eprintln!("Error: a GitHub username is required\n");
        let _ = Cli::command().print_help();
        return ExitCode::from(USAGE_EXIT_CODE);
    }

    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output, cli.verbose);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    commands::run(&cli, &output_ctx, &config).await
}

/// Prints clap's message and maps it to an exit code.
///
/// `--version` exits 0; help and every usage error exit 3, usage errors
/// followed by the full help text.
fn usage_error(err: &clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            ExitCode::from(USAGE_EXIT_CODE)
        }
        _ => {
            println!();
            let _ = Cli::command().print_help();
            ExitCode::from(USAGE_EXIT_CODE)
        }
    }
}
