// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for ghrepos.
//!
//! Uses clap's derive API. Flags are documented with two dashes but are
//! also accepted with a single dash (`-lang go`, `-stars=10`); see
//! [`normalize_args`].

use std::ffi::OsString;
use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use ghrepos_core::{Criteria, Predicate};

/// Exit code for usage errors and help output.
pub const USAGE_EXIT_CODE: u8 = 3;

/// Long flags that may also be written with a single leading dash.
const LONG_FLAGS: &[&str] = &[
    "name", "desc", "date", "lang", "stars", "must", "help", "output", "verbose", "version",
];

/// Extended help text with a usage example.
const USAGE_EXAMPLE: &str = r"EXAMPLES

  List every public repository of a user:
    ghrepos octocat

  Repositories written in Go OR with at least 10 stars:
    ghrepos octocat -lang go -stars 10

  Repositories matching ALL criteria:
    ghrepos octocat -must -name hello -lang go -date 2020 -desc CLI -stars 0
";

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Markdown table
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, markdown)
    pub format: OutputFormat,
    /// Enable verbose output (debug-level logging)
    pub verbose: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && matches!(self.format, OutputFormat::Text)
    }
}

/// ghrepos - list and search a GitHub user's public repositories.
///
/// Without criteria every public repository is listed. With criteria, a
/// repository is shown when at least one criterion matches, or when all
/// of them match if --must is given. String criteria are case-insensitive
/// substrings.
#[derive(Parser, Debug)]
#[command(name = "ghrepos")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_long_help = USAGE_EXAMPLE)]
pub struct Cli {
    /// GitHub username to list repositories for
    pub username: String,

    /// Repository name to search for
    #[arg(long, value_name = "STR")]
    pub name: Option<String>,

    /// Repository description to search for
    #[arg(long, value_name = "STR")]
    pub desc: Option<String>,

    /// Creation date to search for (e.g. 2020, March)
    #[arg(long, value_name = "STR")]
    pub date: Option<String>,

    /// Primary language to search for
    #[arg(long, value_name = "STR")]
    pub lang: Option<String>,

    /// Minimum number of stars; also sorts results by stars
    #[arg(long, value_name = "INT")]
    pub stars: Option<u64>,

    /// Show only repositories matching all criteria
    #[arg(long)]
    pub must: bool,

    /// Output format (text, json, markdown)
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Search criteria given on the command line.
    pub fn criteria(&self) -> Criteria {
        Criteria {
            name: self.name.clone(),
            desc: self.desc.clone(),
            date: self.date.clone(),
            lang: self.lang.clone(),
            stars: self.stars,
        }
    }

    /// Builds the search predicate.
    pub fn predicate(&self) -> Predicate {
        Predicate::build(self.criteria(), self.must)
    }
}

/// Rewrites single-dash long flags (`-lang`, `-stars=3`) to their
/// double-dash form so clap can parse them.
///
/// The program name, short flags, values and unknown words pass through
/// unchanged.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_single_dash_long_flag(s) => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let flag = rest.split_once('=').map_or(rest, |(flag, _)| flag);
    LONG_FLAGS.contains(&flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn parse(list: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args(list))).expect("should parse")
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn normalize_single_dash_flags() {
        let normalized = normalize_args(args(&[
            "ghrepos", "alice", "-lang", "go", "-stars=10", "-must", "-v", "--name", "x",
        ]));
        assert_eq!(
            normalized,
            args(&[
                "ghrepos", "alice", "--lang", "go", "--stars=10", "--must", "-v", "--name", "x",
            ])
        );
    }

    #[test]
    fn normalize_leaves_values_and_program_name() {
        let normalized = normalize_args(args(&["-name", "alice", "-desc", "-name"]));
        assert_eq!(normalized, args(&["-name", "alice", "--desc", "--name"]));
    }

    #[test]
    fn parse_listing_mode() {
        let cli = parse(&["ghrepos", "alice"]);
        assert_eq!(cli.username, "alice");
        assert!(cli.predicate().is_empty());
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn parse_search_flags_after_username() {
        let cli = parse(&[
            "ghrepos", "alice", "-lang", "go", "-stars", "10", "-must", "-date=2020",
        ]);
        assert_eq!(cli.lang.as_deref(), Some("go"));
        assert_eq!(cli.stars, Some(10));
        assert_eq!(cli.date.as_deref(), Some("2020"));
        assert!(cli.must);

        let predicate = cli.predicate();
        assert!(predicate.must());
        assert_eq!(predicate.active_count(), 3);
    }

    #[test]
    fn parse_zero_stars_is_active() {
        let cli = parse(&["ghrepos", "alice", "-stars", "0"]);
        assert!(cli.predicate().has_stars());
    }

    #[test]
    fn parse_rejects_bad_stars() {
        let result = Cli::try_parse_from(normalize_args(args(&["ghrepos", "alice", "-stars", "many"])));
        assert!(result.is_err());
    }

    #[test]
    fn parse_requires_username() {
        let result = Cli::try_parse_from(normalize_args(args(&["ghrepos", "-lang", "go"])));
        assert!(result.is_err());
    }

    #[test]
    fn single_dash_help_is_help() {
        let err = Cli::try_parse_from(normalize_args(args(&["ghrepos", "-help"]))).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
