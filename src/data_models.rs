use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,

    /// Set by enrichment. Falls back to `snippet` when the page yielded nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SearchResult {
    pub fn new(title: String, url: String, snippet: String) -> SearchResult {
        SearchResult {
            title,
            url,
            snippet,
            content: None, // will be populated later by enrichment.
        }
    }

    /// Attach enriched page text, keeping the snippet when the page gave us nothing.
    pub fn with_content(mut self, content: String) -> SearchResult {
        self.content = if content.is_empty() {
            Some(self.snippet.clone())
        } else {
            Some(content)
        };
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebSearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub summary: String,
}

impl WebSearchResponse {
    pub fn new(query: &str, results: Vec<SearchResult>, summary: impl Into<String>) -> Self {
        WebSearchResponse {
            query: query.to_string(),
            results,
            summary: summary.into(),
        }
    }
}

#[test]
fn test_with_content_falls_back_to_snippet() {
    let result = SearchResult::new(
        "Steel".to_string(),
        "https://example.com".to_string(),
        "steel snippet".to_string(),
    );

    let enriched = result.clone().with_content(String::new());
    assert_eq!(enriched.content.as_deref(), Some("steel snippet"));

    let enriched = result.with_content("page text".to_string());
    assert_eq!(enriched.content.as_deref(), Some("page text"));
}

#[test]
fn test_content_omitted_from_json_until_enriched() {
    let result = SearchResult::new(
        "Steel".to_string(),
        "https://example.com".to_string(),
        "snippet".to_string(),
    );
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("content").is_none());

    let json = serde_json::to_value(result.with_content("text".to_string())).unwrap();
    assert_eq!(json["content"], "text");
}
