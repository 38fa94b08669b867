//! Folder data source contract.
//!
//! The backend is consumed, never implemented, so it appears here only as an
//! async trait plus its error type. The HTTP client lives in the application
//! crate; tests drive the orchestrator with scripted implementations.

use async_trait::async_trait;

use crate::folder::ListingPage;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("bad response body: {0}")]
    Decode(String),
}

/// The paged folder listing service.
#[async_trait]
pub trait FolderSource: Send + Sync {
    /// Fetch the session token. Display-only; listing fetches do not depend
    /// on it succeeding.
    async fn auth(&self) -> Result<String, SourceError>;

    /// Fetch the listing at `dir_id`, or the root (artist) listing when
    /// `None`.
    async fn listing(&self, dir_id: Option<&str>) -> Result<ListingPage, SourceError>;
}
