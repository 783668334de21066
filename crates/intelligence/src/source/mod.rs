//! Learning-content sources queried per missing capability.

mod coursera;

pub use coursera::{course_url, CourseraClient, COURSERA_API_BASE};

use crate::types::CandidateItem;
use async_trait::async_trait;
use std::time::Duration;

/// Failures fetching candidates. Always recoverable for a recommendation:
/// the capability that triggered the fetch is skipped.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("content source timed out after {0:?}")]
    Timeout(Duration),
    #[error("content source unavailable: {0}")]
    Unavailable(String),
}

/// Catalogue searched for candidate learning content.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Up to `limit` items relevant to `query`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, SourceError>;
}
