//! Web search pipeline: discovery, concurrent enrichment, summary.
//!
//! [`WebSearch::search`] never fails. Every error is absorbed by the stage it
//! happens in, and anything that slips past that is turned into a fixed
//! "failed" response at the top.

use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinSet;

use crate::config::CONFIG;
use crate::data_models::{SearchResult, WebSearchResponse};
use crate::discovery::{self, DEFAULT_SEARCH_ENDPOINT};
use crate::enrichment::{self, ENRICH_TIMEOUT};
use crate::error::SearchError;
use crate::text::truncate_chars;

/// Only this many discovered results are fetched and returned.
pub const ENRICHED_RESULTS: usize = 3;
pub const MAX_SUMMARY_CHARS: usize = 1500;

pub const NO_RESULTS_SUMMARY: &str = "No search results found.";
pub const NO_CONTENT_SUMMARY: &str = "Search completed but no detailed content was extracted.";
pub const SEARCH_FAILED_SUMMARY: &str = "Search failed due to an error.";

#[derive(Debug, Clone)]
pub struct WebSearch {
    client: Client,
    endpoint: String,
    enrich_timeout: Duration,
}

impl Default for WebSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearch {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            enrich_timeout: ENRICH_TIMEOUT,
        }
    }

    /// Uses the provider endpoint from the environment configuration.
    pub fn from_config() -> Self {
        Self::new().with_endpoint(&CONFIG.search_endpoint)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_enrich_timeout(mut self, timeout: Duration) -> Self {
        self.enrich_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn search(&self, query: &str) -> WebSearchResponse {
        log::info!("searching for: {query:?}");
        into_response(query, self.try_search(query).await)
    }

    async fn try_search(&self, query: &str) -> Result<WebSearchResponse, SearchError> {
        let results = discovery::discover(&self.client, &self.endpoint, query).await;
        if results.is_empty() {
            return Ok(WebSearchResponse::new(query, Vec::new(), NO_RESULTS_SUMMARY));
        }

        let enriched = self.enrich_all(results).await?;
        let summary = summarize(&enriched);

        Ok(WebSearchResponse::new(query, enriched, summary))
    }

    /// Enrich the top results concurrently. The fetches live in a [`JoinSet`],
    /// so dropping the search future aborts whatever is still in flight.
    async fn enrich_all(&self, results: Vec<SearchResult>) -> Result<Vec<SearchResult>, SearchError> {
        let mut tasks = JoinSet::new();
        for (position, result) in results.into_iter().take(ENRICHED_RESULTS).enumerate() {
            let client = self.client.clone();
            let budget = self.enrich_timeout;
            tasks.spawn(async move {
                let content = enrichment::enrich(&client, &result.url, budget).await;
                (position, result.with_content(content))
            });
        }

        collect_enriched(tasks).await
    }
}

/// Wait for every enrichment task and put the results back in discovery
/// order. A task that panicked or was aborted fails the whole batch.
async fn collect_enriched(
    mut tasks: JoinSet<(usize, SearchResult)>,
) -> Result<Vec<SearchResult>, SearchError> {
    let mut enriched = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        enriched.push(joined?);
    }

    enriched.sort_by_key(|(position, _)| *position);
    Ok(enriched.into_iter().map(|(_, result)| result).collect())
}

fn into_response(query: &str, outcome: Result<WebSearchResponse, SearchError>) -> WebSearchResponse {
    match outcome {
        Ok(response) => response,
        Err(e) => {
            log::error!("web search error for {query:?}, error: {:#}", e);
            WebSearchResponse::new(query, Vec::new(), SEARCH_FAILED_SUMMARY)
        }
    }
}

/// Run the pipeline with the built-in provider endpoint and limits.
pub async fn search(query: &str) -> WebSearchResponse {
    WebSearch::new().search(query).await
}

/// `"<title>: <content>"` per result, blank line between, capped at
/// [`MAX_SUMMARY_CHARS`] characters.
pub fn summarize(results: &[SearchResult]) -> String {
    let joined = results
        .iter()
        .map(|r| format!("{}: {}", r.title, r.content.as_deref().unwrap_or(&r.snippet)))
        .collect::<Vec<String>>()
        .join("\n\n");

    let summary = truncate_chars(&joined, MAX_SUMMARY_CHARS);
    if summary.is_empty() {
        return NO_CONTENT_SUMMARY.to_string();
    }
    summary
}
