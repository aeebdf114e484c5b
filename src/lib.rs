pub mod api;
pub mod chat;
pub mod completion;
pub mod config;
pub mod data_models;
pub mod discovery;
pub mod dom;
pub mod enrichment;
pub mod error;
pub mod fetcher;
pub mod pdf;
pub mod search;
pub mod text;

pub use data_models::{SearchResult, WebSearchResponse};
pub use search::{WebSearch, search};
