use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::truncate_chars;

pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_TEXT_CHARS: usize = 50_000;

const TRUNCATION_NOTICE: &str = "\n\n[Content truncated due to length...]";
const SCRIPT_PLACEHOLDER: &str = "[Script removed for security]";

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("script pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct PdfText {
    pub text: String,
    pub pages: usize,
}

/// Extract text from an in-memory PDF. CPU-bound; call from a blocking thread.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<PdfText> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .context("Failed to extract text from PDF")?;

    let text = clean_extracted_text(&pages.join("\n"));
    Ok(PdfText {
        text,
        pages: pages.len(),
    })
}

/// Cap the length, then neutralise any embedded `<script>` blocks.
pub fn clean_extracted_text(text: &str) -> String {
    let text = if text.chars().count() > MAX_TEXT_CHARS {
        format!("{}{TRUNCATION_NOTICE}", truncate_chars(text, MAX_TEXT_CHARS))
    } else {
        text.to_string()
    };
    SCRIPT_BLOCK.replace_all(&text, SCRIPT_PLACEHOLDER).into_owned()
}
