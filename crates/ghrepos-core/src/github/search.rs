// SPDX-License-Identifier: Apache-2.0

//! Repository search via the GitHub REST Search API.
//!
//! A user's public repositories are listed with the `user:` qualifier,
//! one fixed-size page per request. Only the fields the report needs are
//! decoded; everything else in the payload is ignored.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use crate::error::GhReposError;
use crate::github::api_error;

/// Repositories per page. GitHub allows at most 100.
pub const PER_PAGE: u64 = 100;

/// A repository as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Full name in "owner/name" format.
    pub full_name: String,
    /// Short description, empty when GitHub has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Creation date. RFC 3339 on the wire, human readable once ingested.
    pub created_at: String,
    /// Primary language, empty when GitHub has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    /// Number of stars.
    #[serde(rename(deserialize = "stargazers_count"))]
    pub stars: u64,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    /// Number of repositories matching the whole query, not just this page.
    pub total_count: u64,
    /// Repositories on this page, in GitHub's order.
    #[serde(default)]
    pub items: Vec<Repository>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Builds the search URL listing all repositories owned by `user`.
///
/// The returned URL has no `page` parameter; see [`page_url`].
///
/// # Errors
///
/// Returns `GhReposError::InvalidUsername` if `user` is blank.
pub fn search_url(api_url: &str, user: &str) -> crate::Result<String> {
    let user = user.trim();
    if user.is_empty() {
        return Err(GhReposError::InvalidUsername(user.to_string()));
    }
    let user = utf8_percent_encode(user, NON_ALPHANUMERIC);
    Ok(format!(
        "{}/search/repositories?q=user:{user}&per_page={PER_PAGE}",
        api_url.trim_end_matches('/')
    ))
}

/// Appends the page number to a search URL.
#[must_use]
pub fn page_url(base_url: &str, page: u64) -> String {
    format!("{base_url}&page={page}")
}

/// Number of pages needed to cover `total_count` results.
#[must_use]
pub fn page_count(total_count: u64) -> u64 {
    total_count.div_ceil(PER_PAGE)
}

/// Fetches and decodes one page of search results.
///
/// Transport failures, non-success statuses and malformed bodies are all
/// returned as errors; the caller decides whether they are fatal.
#[instrument(skip(client, base_url))]
pub async fn fetch_page(client: &Client, base_url: &str, page: u64) -> crate::Result<SearchPage> {
    let url = page_url(base_url, page);
    debug!(%url, "Fetching search page");

    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    let page: SearchPage = serde_json::from_slice(&body).map_err(GhReposError::Decode)?;
    debug!(
        total_count = page.total_count,
        items = page.items.len(),
        "Decoded search page"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_basic() {
        let url = search_url("https://api.github.com", "alice").unwrap();
        assert_eq!(
            url,
            "https://api.github.com/search/repositories?q=user:alice&per_page=100"
        );
    }

    #[test]
    fn search_url_trims_trailing_slash_and_encodes_user() {
        let url = search_url("http://localhost:8080/", "a b&c").unwrap();
        assert_eq!(
            url,
            "http://localhost:8080/search/repositories?q=user:a%20b%26c&per_page=100"
        );
    }

    #[test]
    fn search_url_rejects_blank_user() {
        assert!(matches!(
            search_url("https://api.github.com", "  "),
            Err(GhReposError::InvalidUsername(_))
        ));
    }

    #[test]
    fn page_url_appends_page() {
        assert_eq!(page_url("http://x/?q=user:a", 3), "http://x/?q=user:a&page=3");
    }

    #[test]
    fn page_count_boundaries() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(100), 1);
        assert_eq!(page_count(101), 2);
        assert_eq!(page_count(250), 3);
    }

    #[test]
    fn decode_keeps_only_needed_fields() {
        let json = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "id": 1,
                    "full_name": "alice/x",
                    "description": "A thing",
                    "created_at": "2020-03-01T00:00:00Z",
                    "language": "Go",
                    "stargazers_count": 5,
                    "owner": {"login": "alice"}
                },
                {
                    "full_name": "alice/a",
                    "description": null,
                    "created_at": "2019-01-01T00:00:00Z",
                    "language": null,
                    "stargazers_count": 0
                }
            ]
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].stars, 5);
        assert_eq!(page.items[0].language, "Go");
        assert_eq!(page.items[1].description, "");
        assert_eq!(page.items[1].language, "");
    }

    #[test]
    fn decode_missing_optional_fields() {
        let json = r#"{"total_count": 1, "items": [
            {"full_name": "bob/y", "created_at": "2020-01-01T00:00:00Z", "stargazers_count": 1}
        ]}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items[0].description, "");
        assert_eq!(page.items[0].language, "");
    }

    #[test]
    fn decode_rejects_error_shape() {
        let json = r#"{"message": "Validation Failed"}"#;
        assert!(serde_json::from_str::<SearchPage>(json).is_err());
    }
}
