//! Data-source failures.
//!
//! Unknown vehicle ids are deliberately absent: ride commands for an id the
//! backend does not know succeed as no-ops so that retries stay idempotent.

use fleet_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection, timeout, or other transport-level failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// A snapshot or history payload failed to decode.  The whole fetch
    /// fails; records are never skipped individually.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid backend URL {0}")]
    InvalidUrl(String),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}

impl SourceError {
    /// `true` for failures caused by the network or the remote server.
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Transport(_) | SourceError::Status { .. })
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::MalformedPayload(e.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
