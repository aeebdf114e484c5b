use serde::{Deserialize, Serialize};

use crate::completion::ChatMessage;
use crate::data_models::SearchResult;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub summary: String,
    pub processing_time_ms: u128,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    pub sources: Vec<Source>,
}

#[derive(Debug, Serialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ParsePdfResponse {
    pub success: bool,
    pub text: String,
    pub metadata: PdfMetadata,
}

#[derive(Debug, Serialize)]
pub struct PdfMetadata {
    pub pages: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
