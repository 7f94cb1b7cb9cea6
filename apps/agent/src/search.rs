//! Search client — queries the Tavily API and normalizes hits into postings.
//!
//! Failures here are never fatal: transport errors and non-success statuses
//! are logged and yield an empty posting list, so the cycle continues.

use std::num::NonZeroUsize;

use lru::LruCache;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Preferences;
use crate::models::Posting;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// Job boards the search is scoped to.
const INCLUDE_DOMAINS: [&str; 5] = [
    "linkedin.com",
    "indeed.com",
    "glassdoor.com",
    "monster.com",
    "ziprecruiter.com",
];

/// Bound on remembered posting identity keys. Least recently seen keys are
/// evicted first, so memory stays flat over a long-lived process.
const SEEN_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    include_domains: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default = "unknown_position")]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

fn unknown_position() -> String {
    "Unknown Position".to_string()
}

/// Process-lifetime posting de-duplication, capacity-bounded.
pub struct SeenCache {
    keys: LruCache<String, ()>,
}

impl SeenCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            keys: LruCache::new(capacity),
        }
    }

    /// Records the key and returns `true` if it was not already present.
    /// A repeated key refreshes its recency instead of being re-admitted.
    pub fn insert(&mut self, key: String) -> bool {
        self.keys.put(key, ()).is_none()
    }
}

pub struct SearchClient {
    client: Client,
    api_key: String,
    seen: SeenCache,
}

impl SearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            seen: SeenCache::new(SEEN_CACHE_CAPACITY),
        }
    }

    /// Runs one search against the candidate profile and returns the new
    /// postings. Any failure is logged and collapses to an empty list.
    pub async fn search(&mut self, prefs: &Preferences) -> Vec<Posting> {
        let query = build_query(prefs);
        let request = SearchRequest {
            api_key: &self.api_key,
            query: &query,
            search_depth: "advanced",
            include_answer: true,
            include_domains: &INCLUDE_DOMAINS,
        };

        let response = match self
            .client
            .post(TAVILY_API_URL)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Job search request failed: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Job search returned {status}: {}", truncate_chars(&body, 200));
            return Vec::new();
        }

        let parsed: SearchResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Job search response was not valid JSON: {e}");
                return Vec::new();
            }
        };

        let postings = extract_postings(parsed.results, &mut self.seen);
        info!(
            "Search returned {} new posting(s) for query '{query}'",
            postings.len()
        );
        postings
    }
}

/// Builds the free-text search query from the candidate profile.
fn build_query(prefs: &Preferences) -> String {
    format!(
        "{} {} jobs in {}",
        prefs.job_title, prefs.experience_level, prefs.location
    )
}

/// Normalizes raw results and drops identity keys this process has already
/// seen. Duplicates inside a single response collapse to one posting.
fn extract_postings(results: Vec<RawResult>, seen: &mut SeenCache) -> Vec<Posting> {
    let mut postings = Vec::new();
    for result in results {
        let posting = Posting {
            source: source_domain(&result.url),
            title: result.title,
            url: result.url,
            content: result.content,
        };
        if !seen.insert(posting.identity_key()) {
            continue;
        }
        postings.push(posting);
    }
    postings
}

/// Host segment of the URL: the third `/`-delimited piece.
fn source_domain(url: &str) -> String {
    match url.split('/').nth(2) {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => "Unknown Source".to_string(),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, url: &str) -> RawResult {
        RawResult {
            title: title.to_string(),
            url: url.to_string(),
            content: String::new(),
        }
    }

    #[test]
    fn test_build_query_shape() {
        let prefs = Preferences {
            job_title: "machine learning engineer".to_string(),
            experience_level: "entry level".to_string(),
            location: "united states".to_string(),
            skills: vec![],
            minimum_match_score: 0.5,
        };
        assert_eq!(
            build_query(&prefs),
            "machine learning engineer entry level jobs in united states"
        );
    }

    #[test]
    fn test_response_deserializes_with_defaults() {
        let json = r#"{
            "results": [
                {"url": "https://indeed.com/viewjob?jk=1", "content": "ML role"},
                {"title": "Data Scientist", "url": "https://linkedin.com/jobs/2", "content": ""}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].title, "Unknown Position");
        assert_eq!(parsed.results[1].title, "Data Scientist");
    }

    #[test]
    fn test_response_without_results_is_empty() {
        let parsed: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_source_domain_is_url_host() {
        assert_eq!(
            source_domain("https://linkedin.com/jobs/view/123"),
            "linkedin.com"
        );
        assert_eq!(source_domain("http://indeed.com/viewjob"), "indeed.com");
    }

    #[test]
    fn test_source_domain_defaults_when_absent() {
        assert_eq!(source_domain(""), "Unknown Source");
        assert_eq!(source_domain("not-a-url"), "Unknown Source");
    }

    #[test]
    fn test_duplicate_results_collapse_to_one_posting() {
        let mut seen = SeenCache::new(16);
        let results = vec![
            raw("ML Engineer", "https://indeed.com/1"),
            raw("ML Engineer", "https://indeed.com/1"),
        ];
        let postings = extract_postings(results, &mut seen);
        assert_eq!(postings.len(), 1);
    }

    #[test]
    fn test_seen_keys_persist_across_extractions() {
        let mut seen = SeenCache::new(16);
        let first = extract_postings(vec![raw("ML Engineer", "https://indeed.com/1")], &mut seen);
        assert_eq!(first.len(), 1);

        let second = extract_postings(
            vec![
                raw("ML Engineer", "https://indeed.com/1"),
                raw("Data Scientist", "https://indeed.com/2"),
            ],
            &mut seen,
        );
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].title, "Data Scientist");
    }

    #[test]
    fn test_same_title_different_url_is_distinct() {
        let mut seen = SeenCache::new(16);
        let postings = extract_postings(
            vec![
                raw("ML Engineer", "https://indeed.com/1"),
                raw("ML Engineer", "https://indeed.com/2"),
            ],
            &mut seen,
        );
        assert_eq!(postings.len(), 2);
    }

    #[test]
    fn test_seen_cache_evicts_least_recently_seen() {
        let mut seen = SeenCache::new(2);
        assert!(seen.insert("a".to_string()));
        assert!(seen.insert("b".to_string()));
        // "a" is the least recently seen and falls out at capacity.
        assert!(seen.insert("c".to_string()));
        // Evicted keys may be emitted again.
        assert!(seen.insert("a".to_string()));
    }

    #[test]
    fn test_seen_cache_repeat_is_rejected() {
        let mut seen = SeenCache::new(2);
        assert!(seen.insert("a".to_string()));
        assert!(!seen.insert("a".to_string()));
    }
}
