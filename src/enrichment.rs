use std::time::Duration;

use reqwest::Client;

use crate::dom::{self, Document};
use crate::error::SearchError;
use crate::fetcher;
use crate::text::{collapse_whitespace, truncate_chars};

pub const ENRICH_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Stripped before any text is read.
const NOISE_SELECTOR: &str = "script, style, nav, header, footer, aside";

/// Probed in order; the first one that matches anything wins.
const CONTENT_SELECTORS: [&str; 7] = [
    "main",
    "article",
    ".content",
    ".main-content",
    "#content",
    ".post-content",
    ".entry-content",
];

/// Fetch `url` and return a plain-text excerpt of its main content.
///
/// Returns an empty string when the page cannot be fetched within `budget`,
/// answers with a non-2xx status, or has no text.
pub async fn enrich(client: &Client, url: &str, budget: Duration) -> String {
    match fetch_page(client, url, budget).await {
        Ok(html) => {
            let content = extract_content(&html);
            log::debug!("extracted {} chars from {url}", content.chars().count());
            content
        }
        Err(e) => {
            log::warn!("error scraping {url}, error: {:#}", e);
            String::new()
        }
    }
}

async fn fetch_page(client: &Client, url: &str, budget: Duration) -> Result<String, SearchError> {
    // Dropping the future on expiry aborts the in-flight request.
    tokio::time::timeout(budget, fetcher::fetch_html(client.get(url)))
        .await
        .map_err(|_| SearchError::Timeout(budget))?
}

/// Best-effort readable text of an HTML page, whitespace-collapsed and capped
/// at [`MAX_CONTENT_CHARS`] characters.
pub fn extract_content(html: &str) -> String {
    let mut document = Document::parse(html);
    document.remove_all(NOISE_SELECTOR);

    let content = primary_content(&document)
        .filter(|text| !text.trim().is_empty())
        .or_else(|| body_text(&document))
        .unwrap_or_default();

    truncate_chars(&collapse_whitespace(&content), MAX_CONTENT_CHARS)
}

/// Text of every element matched by the first content selector that matches at all.
fn primary_content(document: &Document) -> Option<String> {
    CONTENT_SELECTORS.iter().find_map(|selector| {
        let matches = document.select_all(selector);
        if matches.is_empty() {
            return None;
        }
        Some(matches.iter().map(dom::text).collect::<String>())
    })
}

fn body_text(document: &Document) -> Option<String> {
    document.select_all("body").first().map(dom::text)
}
