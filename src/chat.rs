use crate::completion::ChatMessage;
use crate::data_models::WebSearchResponse;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Be concise, friendly, and helpful in your responses.";

const WEB_SEARCH_KEYWORDS: [&str; 22] = [
    "current",
    "latest",
    "recent",
    "today",
    "now",
    "this year",
    "2024",
    "2025",
    "news",
    "update",
    "what happened",
    "weather",
    "price",
    "cost",
    "regulation",
    "code update",
    "new standard",
    "trending",
    "market",
    "industry news",
    "project examples",
    "case studies",
];

/// Plain substring match, so "known" trips "now" and "costume" trips "cost".
pub fn might_need_web_search(message: &str) -> bool {
    let message = message.to_lowercase();
    WEB_SEARCH_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}

/// Most recent message sent by the user, if any.
pub fn latest_user_message(messages: &[ChatMessage]) -> Option<&ChatMessage> {
    messages.iter().rev().find(|m| m.role == "user")
}

/// System prompt for a turn, with search findings spliced in when a search ran.
pub fn build_system_prompt(search: Option<&WebSearchResponse>) -> String {
    let Some(search) = search else {
        return SYSTEM_PROMPT.to_string();
    };

    if search.results.is_empty() {
        return format!(
            "{SYSTEM_PROMPT}\n\nA web search for \"{}\" was attempted but returned no usable \
             results ({}). Answer from general knowledge and say that current information \
             could not be retrieved.",
            search.query, search.summary
        );
    }

    let sources = search
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {} - {}", i + 1, r.title, r.url))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "{SYSTEM_PROMPT}\n\nCurrent web search results for \"{}\":\n\n{}\n\nSources:\n{}\n\n\
         Use this information to answer the user's question. Cite the sources you rely on \
         by their number, and say so if the results do not cover the question.",
        search.query, search.summary, sources
    )
}
