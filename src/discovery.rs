use std::time::Duration;

use reqwest::Client;
use scraper::ElementRef;

use crate::data_models::SearchResult;
use crate::dom::{self, Document};
use crate::error::SearchError;
use crate::fetcher;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
pub const MAX_DISCOVERED_RESULTS: usize = 5;

/// Upper bound on the provider request. The enrichment fetches have their own.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(15);

const RESULT_CONTAINER: &str = ".result";
const RESULT_LINK: &str = ".result__title a";
const RESULT_SNIPPET: &str = ".result__snippet";

/// Query the provider and parse its result page. Any failure yields no results.
pub async fn discover(client: &Client, endpoint: &str, query: &str) -> Vec<SearchResult> {
    match fetch_results_page(client, endpoint, query).await {
        Ok(html) => {
            let results = parse_results(&html);
            log::info!("discovered {} results for {query:?}", results.len());
            results
        }
        Err(e) => {
            log::error!("search provider request failed for {query:?}, error: {:#}", e);
            Vec::new()
        }
    }
}

async fn fetch_results_page(
    client: &Client,
    endpoint: &str,
    query: &str,
) -> Result<String, SearchError> {
    let request = client
        .get(endpoint)
        .query(&[("q", query)])
        .timeout(DISCOVERY_TIMEOUT);
    fetcher::fetch_html(request).await
}

/// Pull results out of a provider result page.
///
/// Only the first [`MAX_DISCOVERED_RESULTS`] containers are looked at, in
/// document order. A container missing its title, link, or snippet is skipped
/// but still counts toward that cap.
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let document = Document::parse(html);
    let containers = document.select_all(RESULT_CONTAINER);

    containers
        .iter()
        .take(MAX_DISCOVERED_RESULTS)
        .filter_map(parse_container)
        .collect()
}

fn parse_container(container: &ElementRef<'_>) -> Option<SearchResult> {
    let links = dom::select_within(container, RESULT_LINK);
    let link = links.first()?;

    let title = joined_text(&links);
    let url = dom::attribute(link, "href").unwrap_or("").trim();
    let snippet = joined_text(&dom::select_within(container, RESULT_SNIPPET));

    if title.is_empty() || url.is_empty() || snippet.is_empty() {
        log::debug!("skipping incomplete result container (title: {title:?}, url: {url:?})");
        return None;
    }

    Some(SearchResult::new(title, normalize_url(url), snippet))
}

/// Text of every match, concatenated in document order and trimmed.
fn joined_text(elements: &[ElementRef<'_>]) -> String {
    elements
        .iter()
        .map(dom::text)
        .collect::<String>()
        .trim()
        .to_string()
}

/// `//host/path` becomes `https://host/path`; everything else is left alone.
pub fn normalize_url(href: &str) -> String {
    match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_string(),
    }
}
