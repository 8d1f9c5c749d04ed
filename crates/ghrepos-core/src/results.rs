// SPDX-License-Identifier: Apache-2.0

//! Shared collection of matching repositories.
//!
//! Page fetchers append concurrently; once every fetcher has finished the
//! set is frozen and handed to the report in arrival order.

use std::sync::{Mutex, PoisonError};

use crate::github::search::Repository;
use crate::utils::{single_line, truncate};

/// Maximum description length kept for display, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 70;

/// Thread-safe, append-only set of repositories.
#[derive(Debug, Default)]
pub struct ResultSet {
    items: Mutex<Vec<Repository>>,
}

impl ResultSet {
    /// Creates an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a repository, flattening its description to one line and
    /// truncating it for display.
    pub fn add(&self, mut repo: Repository) {
        repo.description = single_line(&repo.description);
        if repo.description.chars().count() > MAX_DESCRIPTION_LEN {
            repo.description = truncate(&repo.description, MAX_DESCRIPTION_LEN);
        }
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(repo);
    }

    /// Number of repositories collected so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Takes the collected repositories out of the set, in arrival order.
    ///
    /// Call after the join barrier; the set is left empty.
    #[must_use]
    pub fn freeze(&self) -> Vec<Repository> {
        std::mem::take(&mut *self.items.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn repo(full_name: &str, description: &str) -> Repository {
        Repository {
            full_name: full_name.to_string(),
            description: description.to_string(),
            created_at: String::new(),
            language: String::new(),
            stars: 0,
        }
    }

    #[test]
    fn add_keeps_short_description() {
        let set = ResultSet::new();
        set.add(repo("a/b", "short"));
        let items = set.freeze();
        assert_eq!(items[0].description, "short");
    }

    #[test]
    fn add_truncates_long_description() {
        let set = ResultSet::new();
        let long = "x".repeat(120);
        set.add(repo("a/b", &long));
        let items = set.freeze();
        assert_eq!(items[0].description.chars().count(), 73);
        assert!(items[0].description.ends_with("..."));
    }

    #[test]
    fn add_flattens_multiline_description() {
        let set = ResultSet::new();
        set.add(repo("a/b", "first line\nsecond line\r\nthird\tcol"));
        let items = set.freeze();
        assert_eq!(items[0].description, "first line second line third col");
    }

    #[test]
    fn add_flattens_before_truncating() {
        let set = ResultSet::new();
        let long = "line\n".repeat(30);
        set.add(repo("a/b", &long));
        let items = set.freeze();
        assert!(!items[0].description.contains('\n'));
        assert_eq!(items[0].description.chars().count(), 73);
    }

    #[test]
    fn freeze_preserves_arrival_order_and_empties() {
        let set = ResultSet::new();
        set.add(repo("z/1", ""));
        set.add(repo("a/2", ""));
        assert_eq!(set.count(), 2);

        let items = set.freeze();
        let names: Vec<_> = items.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["z/1", "a/2"]);
        assert_eq!(set.count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_are_all_kept() {
        let set = Arc::new(ResultSet::new());
        let mut handles = Vec::new();
        for page in 0..8 {
            let set = Arc::clone(&set);
            handles.push(tokio::spawn(async move {
                for i in 0..100 {
                    set.add(repo(&format!("user/{page}-{i}"), ""));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(set.count(), 800);
    }
}
