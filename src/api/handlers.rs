use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;

use crate::chat;
use crate::completion::ChatMessage;
use crate::pdf::{self, MAX_PDF_BYTES};

use super::AppState;
use super::models::{
    ChatRequest, ChatResponse, ErrorResponse, ParsePdfResponse, PdfMetadata, SearchRequest,
    SearchResponse, Source,
};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    let query = request.query.trim();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Query cannot be empty"));
    }

    let response = state.web_search.search(query).await;
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query: response.query,
        results: response.results,
        summary: response.summary,
        processing_time_ms,
    }))
}

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Some(completion) = state.completion.as_ref() else {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured",
        ));
    };

    if request.messages.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Messages cannot be empty"));
    }

    let search_query = chat::latest_user_message(&request.messages)
        .map(|m| m.content.trim().to_string())
        .filter(|content| chat::might_need_web_search(content));

    let search = match &search_query {
        Some(query) => Some(state.web_search.search(query).await),
        None => None,
    };

    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage::system(chat::build_system_prompt(search.as_ref())));
    messages.extend(request.messages);

    let message = completion.complete(&messages).await.map_err(|e| {
        log::error!("chat completion error: {:#}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    let sources = search
        .map(|s| {
            s.results
                .into_iter()
                .map(|r| Source {
                    title: r.title,
                    url: r.url,
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(ChatResponse {
        message,
        search_query,
        sources,
    }))
}

pub async fn parse_pdf_handler(
    mut multipart: Multipart,
) -> Result<Json<ParsePdfResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(|ct| ct.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| api_error(e.status(), e.body_text()))?;
        upload = Some((content_type, bytes));
        break;
    }

    let Some((content_type, bytes)) = upload else {
        return Err(api_error(StatusCode::BAD_REQUEST, "No file provided"));
    };

    if content_type.as_deref() != Some("application/pdf") {
        return Err(api_error(StatusCode::BAD_REQUEST, "File must be a PDF"));
    }

    if bytes.len() > MAX_PDF_BYTES {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "File too large. Maximum size is 10MB.",
        ));
    }

    log::info!("parsing uploaded pdf ({} bytes)", bytes.len());
    let parsed = tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&bytes)).await;

    match parsed {
        Ok(Ok(pdf)) => Ok(Json(ParsePdfResponse {
            success: true,
            text: pdf.text,
            metadata: PdfMetadata { pages: pdf.pages },
        })),
        Ok(Err(e)) => {
            log::error!("pdf parsing error: {:#}", e);
            Err(pdf_failure())
        }
        Err(e) => {
            log::error!("pdf parsing task failed: {}", e);
            Err(pdf_failure())
        }
    }
}

fn pdf_failure() -> ApiError {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to parse PDF. The file may be corrupted or password-protected.",
    )
}
