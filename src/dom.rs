//! Thin HTML access layer over `scraper`.
//!
//! Everything the pipeline needs from an HTML tree goes through here: parse,
//! select, drop subtrees, read text and attributes. Selectors are plain CSS
//! strings; a selector that fails to parse simply matches nothing.
//!
//! `scraper::Html` is not `Send`, so a [`Document`] must be built and dropped
//! without crossing an `.await`.

use scraper::{ElementRef, Html, Selector};

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Document {
        Document {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                log::warn!("invalid selector {selector:?}: {e}");
                Vec::new()
            }
        }
    }

    /// Detach every element matching `selector` (and its subtree) from the tree.
    pub fn remove_all(&mut self, selector: &str) {
        let ids = self
            .select_all(selector)
            .into_iter()
            .map(|el| el.id())
            .collect::<Vec<_>>();

        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Descendants of `element` matching `selector`, in document order.
pub fn select_within<'a>(element: &ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Concatenated text of the element's subtree, untrimmed.
pub fn text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

pub fn attribute<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}
