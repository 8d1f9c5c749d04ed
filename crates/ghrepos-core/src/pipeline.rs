// SPDX-License-Identifier: Apache-2.0

//! Paginated fetch-filter-merge pipeline.
//!
//! A run probes page 1 to learn the total count, ingests the probe's items,
//! then fans out one task per remaining page. Page tasks are spawned only
//! once a semaphore permit is available, which caps in-flight fetches.
//! Each task owns a clone of the outcome sender, so the channel closes once
//! the last task has finished; draining it is the join barrier after which
//! the result set is frozen.
//!
//! Only a failed probe aborts the run. Page failures are collected and
//! returned alongside whatever the other pages produced.

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::error::PageError;
use crate::github::create_client;
use crate::github::search::{Repository, fetch_page, page_count, search_url};
use crate::predicate::Predicate;
use crate::results::ResultSet;
use crate::utils::format_created_at;

/// Terminal outcome of one page task: matched count or a page error.
type PageOutcome = Result<(u64, usize), PageError>;

/// Everything a page task needs, shared by all tasks of one run.
struct PageContext {
    client: Client,
    base_url: String,
    predicate: Arc<Predicate>,
    results: ResultSet,
}

impl PageContext {
    /// Formats dates, filters, and appends one page worth of repositories.
    ///
    /// Items are evaluated in upstream order. Returns the number of matches.
    fn ingest(&self, items: Vec<Repository>) -> usize {
        let mut matched = 0;
        for mut repo in items {
            repo.created_at = format_created_at(&repo.created_at);
            if self.predicate.matches(&repo) {
                self.results.add(repo);
                matched += 1;
            }
        }
        matched
    }
}

/// Result of a pipeline run, frozen after the join barrier.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Total number of repositories GitHub reported for the user.
    pub total_count: u64,
    /// Number of pages requested, probe included.
    pub pages: u64,
    /// Matching repositories in arrival order.
    pub repositories: Vec<Repository>,
    /// Pages that could not be fetched or decoded.
    pub page_errors: Vec<PageError>,
}

/// Summary of a run, for logging and JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Total number of repositories GitHub reported for the user.
    pub total_count: u64,
    /// Number of pages requested, probe included.
    pub pages: u64,
    /// Number of pages that failed.
    pub failed_pages: usize,
}

impl PipelineOutcome {
    /// Returns counters describing the run.
    #[must_use]
    pub fn stats(&self) -> RunStats {
        RunStats {
            total_count: self.total_count,
            pages: self.pages,
            failed_pages: self.page_errors.len(),
        }
    }
}

/// Fetches a user's repositories and keeps those matching a predicate.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: Client,
    api_url: String,
    concurrency: usize,
}

impl Pipeline {
    /// Creates a pipeline from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &AppConfig) -> crate::Result<Self> {
        let client = create_client(&config.github)?;
        Ok(Self::with_client(
            client,
            &config.github.api_url,
            config.fetch.effective_concurrency(),
        ))
    }

    /// Creates a pipeline around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_url: &str, concurrency: usize) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            concurrency: concurrency.max(1),
        }
    }

    /// Runs the pipeline for `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is blank or the probe request fails
    /// for any reason. Failures of later pages are reported in
    /// [`PipelineOutcome::page_errors`] instead.
    #[instrument(skip(self, predicate), fields(search = !predicate.is_empty()))]
    pub async fn run(&self, user: &str, predicate: Predicate) -> crate::Result<PipelineOutcome> {
        let base_url = search_url(&self.api_url, user)?;
        let ctx = Arc::new(PageContext {
            client: self.client.clone(),
            base_url,
            predicate: Arc::new(predicate),
            results: ResultSet::new(),
        });

        let probe = fetch_page(&ctx.client, &ctx.base_url, 1).await?;
        let total_count = probe.total_count;
        let matched = ctx.ingest(probe.items);
        debug!(total_count, matched, "Probe page ingested");

        let pages = page_count(total_count);
        let page_errors = if pages > 1 {
            self.fan_out(&ctx, pages).await
        } else {
            Vec::new()
        };

        let repositories = ctx.results.freeze();
        info!(
            total_count,
            pages = pages.max(1),
            matched = repositories.len(),
            failed_pages = page_errors.len(),
            "Pipeline finished"
        );

        Ok(PipelineOutcome {
            total_count,
            pages: pages.max(1),
            repositories,
            page_errors,
        })
    }

    /// Fetches pages `2..=pages` concurrently and waits for all of them.
    ///
    /// A permit is acquired before each task is spawned, so at most
    /// `concurrency` page tasks exist at any time. The channel holds one
    /// slot per page, so a finished task never waits on the receiver.
    async fn fan_out(&self, ctx: &Arc<PageContext>, pages: u64) -> Vec<PageError> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let slots = usize::try_from(pages - 1)
            .unwrap_or(usize::MAX)
            .clamp(1, Semaphore::MAX_PERMITS);
        let (tx, mut rx) = mpsc::channel::<PageOutcome>(slots);

        debug!(pages, concurrency = self.concurrency, "Fanning out page fetches");
        for page in 2..=pages {
            // The semaphore is never closed; a failed acquire just runs unthrottled.
            let permit = Arc::clone(&semaphore).acquire_owned().await.ok();
            tokio::spawn(fetch_and_ingest(Arc::clone(ctx), permit, page, tx.clone()));
        }
        drop(tx);

        let mut errors = Vec::new();
        while let Some(outcome) = rx.recv().await {
            match outcome {
                Ok((page, matched)) => debug!(page, matched, "Page ingested"),
                Err(err) => {
                    debug!(page = err.page, error = %err.source, "Page failed");
                    errors.push(err);
                }
            }
        }
        errors.sort_by_key(|e| e.page);
        errors
    }
}

/// Page task: fetch, decode and ingest one page, then report the outcome.
///
/// The permit is held for the fetch and ingestion only and is released
/// before the outcome is sent.
async fn fetch_and_ingest(
    ctx: Arc<PageContext>,
    permit: Option<OwnedSemaphorePermit>,
    page: u64,
    tx: mpsc::Sender<PageOutcome>,
) {
    let outcome = match fetch_page(&ctx.client, &ctx.base_url, page).await {
        Ok(body) => Ok((page, ctx.ingest(body.items))),
        Err(source) => Err(PageError { page, source }),
    };
    drop(permit);
    // The receiver outlives every sender, so this only fails if the run was dropped.
    let _ = tx.send(outcome).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Criteria;

    fn raw(full_name: &str, created_at: &str, language: &str, stars: u64) -> Repository {
        Repository {
            full_name: full_name.to_string(),
            description: String::new(),
            created_at: created_at.to_string(),
            language: language.to_string(),
            stars,
        }
    }

    fn context(predicate: Predicate) -> PageContext {
        PageContext {
            client: Client::new(),
            base_url: "http://localhost/search/repositories?q=user:alice&per_page=100"
                .to_string(),
            predicate: Arc::new(predicate),
            results: ResultSet::new(),
        }
    }

    #[test]
    fn ingest_formats_dates_before_matching() {
        let ctx = context(Predicate::build(
            Criteria {
                date: Some("2020".to_string()),
                ..Criteria::default()
            },
            false,
        ));
        let matched = ctx.ingest(vec![
            raw("alice/x", "2020-03-01T00:00:00Z", "Go", 5),
            raw("alice/a", "2019-01-01T00:00:00Z", "", 0),
        ]);

        assert_eq!(matched, 1);
        let items = ctx.results.freeze();
        assert_eq!(items[0].full_name, "alice/x");
        assert_eq!(items[0].created_at, "March 1, 2020 0:0:0");
    }

    #[test]
    fn ingest_keeps_unparseable_dates() {
        let ctx = context(Predicate::default());
        ctx.ingest(vec![raw("alice/odd", "not a date", "", 0)]);
        assert_eq!(ctx.results.freeze()[0].created_at, "not a date");
    }

    #[test]
    fn stats_count_failed_pages() {
        let outcome = PipelineOutcome {
            total_count: 250,
            pages: 3,
            repositories: Vec::new(),
            page_errors: vec![PageError {
                page: 2,
                source: crate::error::GhReposError::InvalidUsername(String::new()),
            }],
        };
        let stats = outcome.stats();
        assert_eq!(stats.total_count, 250);
        assert_eq!(stats.pages, 3);
        assert_eq!(stats.failed_pages, 1);
    }

    #[test]
    fn concurrency_never_zero() {
        let pipeline = Pipeline::with_client(Client::new(), "http://localhost", 0);
        assert_eq!(pipeline.concurrency, 1);
    }
}
