// SPDX-License-Identifier: Apache-2.0

//! Search predicate over repository records.
//!
//! A predicate is built once from the user's criteria and is read-only
//! afterwards. Only criteria that were actually supplied take part in
//! matching; a predicate with none of them accepts every repository.

use serde::Serialize;

use crate::github::search::Repository;

/// Raw search criteria as supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    /// Substring of the full name.
    pub name: Option<String>,
    /// Substring of the description.
    pub desc: Option<String>,
    /// Substring of the formatted creation date.
    pub date: Option<String>,
    /// Substring of the primary language.
    pub lang: Option<String>,
    /// Minimum number of stars.
    pub stars: Option<u64>,
}

/// Compiled search predicate.
///
/// String criteria are stored case-folded; empty strings are dropped so
/// they never count as active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Predicate {
    name: Option<String>,
    desc: Option<String>,
    date: Option<String>,
    lang: Option<String>,
    stars: Option<u64>,
    must: bool,
}

fn fold(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_lowercase())
}

fn substring(needle: Option<&str>, haystack: &str) -> Option<bool> {
    needle.map(|n| haystack.to_lowercase().contains(n))
}

impl Predicate {
    /// Builds a predicate from criteria.
    ///
    /// With `must` set every active criterion has to match; otherwise one
    /// is enough.
    #[must_use]
    pub fn build(criteria: Criteria, must: bool) -> Self {
        Self {
            name: fold(criteria.name),
            desc: fold(criteria.desc),
            date: fold(criteria.date),
            lang: fold(criteria.lang),
            stars: criteria.stars,
            must,
        }
    }

    /// Returns true if no criterion is active (listing mode).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active criteria.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.name.is_some(),
            self.desc.is_some(),
            self.date.is_some(),
            self.lang.is_some(),
            self.stars.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Returns true if the star threshold is active.
    #[must_use]
    pub fn has_stars(&self) -> bool {
        self.stars.is_some()
    }

    /// Returns true if all active criteria must match.
    #[must_use]
    pub fn must(&self) -> bool {
        self.must
    }

    /// Outcome of each criterion against `repo`, `None` where inactive.
    fn checks(&self, repo: &Repository) -> [Option<bool>; 5] {
        [
            substring(self.name.as_deref(), &repo.full_name),
            substring(self.desc.as_deref(), &repo.description),
            substring(self.date.as_deref(), &repo.created_at),
            substring(self.lang.as_deref(), &repo.language),
            self.stars.map(|min| repo.stars >= min),
        ]
    }

    /// Tests a repository against the predicate.
    ///
    /// The creation date is matched as stored on the record, so records
    /// must be ingested (date formatted) before they are tested.
    #[must_use]
    pub fn matches(&self, repo: &Repository) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut hits = self.checks(repo).into_iter().flatten();
        if self.must {
            hits.all(|hit| hit)
        } else {
            hits.any(|hit| hit)
        }
    }
}
