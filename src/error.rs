use std::time::Duration;

use thiserror::Error;

/// Failures inside the search pipeline. None of these leave `search`: each
/// stage converts them into its degraded output at its own boundary.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("enrichment task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
