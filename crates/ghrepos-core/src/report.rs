// SPDX-License-Identifier: Apache-2.0

//! Sorted, tabular report of a user's repositories.
//!
//! The report re-establishes a deterministic order over the pipeline's
//! results (which arrive in arbitrary page order) before writing them.

use std::cmp::Reverse;
use std::io::{self, Write};

use serde::Serialize;

use crate::github::search::Repository;
use crate::predicate::Predicate;
use crate::table::TablePrinter;

/// Column headings, in output order.
pub const COLUMNS: [&str; 5] = [
    "Repository Name",
    "Description",
    "Stars",
    "Language",
    "Creation Date",
];

/// Whether any search criterion was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No criteria: every repository is listed.
    Listing,
    /// At least one criterion: only matches are listed.
    Search,
}

/// Ordering applied before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Full name, case-insensitive, ascending.
    Name,
    /// Star count, descending.
    Stars,
}

impl SortKey {
    /// Sort key implied by a predicate: stars when a star threshold is set.
    #[must_use]
    pub fn for_predicate(predicate: &Predicate) -> Self {
        if predicate.has_stars() {
            SortKey::Stars
        } else {
            SortKey::Name
        }
    }
}

/// Report over the frozen result set.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// GitHub username the report is about.
    pub user: String,
    /// Listing or search mode.
    pub mode: Mode,
    /// Ordering of `repositories`.
    pub sort: SortKey,
    /// Number of repositories in the report.
    pub count: usize,
    /// Repositories, sorted by `sort`.
    pub repositories: Vec<Repository>,
}

impl Report {
    /// Builds a sorted report for `user`.
    #[must_use]
    pub fn new(user: &str, predicate: &Predicate, repositories: Vec<Repository>) -> Self {
        let mode = if predicate.is_empty() {
            Mode::Listing
        } else {
            Mode::Search
        };
        let mut report = Self {
            user: user.to_string(),
            mode,
            sort: SortKey::for_predicate(predicate),
            count: repositories.len(),
            repositories,
        };
        report.sort();
        report
    }

    /// Sorts the repositories in place.
    ///
    /// Both orderings are stable, so repositories with equal keys keep
    /// their arrival order.
    pub fn sort(&mut self) {
        match self.sort {
            SortKey::Name => self
                .repositories
                .sort_by_cached_key(|r| r.full_name.to_lowercase()),
            SortKey::Stars => self.repositories.sort_by_key(|r| Reverse(r.stars)),
        }
    }

    /// One-line summary shown above the table.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.mode {
            Mode::Search => format!(
                "GitHub User {} has {} matching Repositories:",
                self.user, self.count
            ),
            Mode::Listing => format!("GitHub User {} has {} Repositories:", self.user, self.count),
        }
    }

    /// Writes the summary and the aligned table to `sink`, then flushes.
    pub fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        writeln!(sink, "{}", self.summary())?;
        writeln!(sink)?;

        let mut table = TablePrinter::new(COLUMNS.len());
        table.add_row(&COLUMNS);
        table.add_row(&["-----", "------", "------", "------", "------"]);
        for repo in &self.repositories {
            let stars = repo.stars.to_string();
            table.add_row(&[
                repo.full_name.as_str(),
                repo.description.as_str(),
                stars.as_str(),
                repo.language.as_str(),
                repo.created_at.as_str(),
            ]);
        }
        table.write_to(sink)?;
        sink.flush()
    }
}
