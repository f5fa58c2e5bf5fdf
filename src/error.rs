use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the layer that owns fetching and startup.
///
/// Classification itself never produces one of these: a record that lacks a
/// field a predicate looks at simply does not match.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("http client build failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("invalid {what} json: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{what} document is not a sequence of records")]
    NotASequence { what: &'static str },

    #[error("reference file {}: {source}", path.display())]
    ReferenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("match {0} not found")]
    UnknownMatch(u64),

    #[error("fetch worker is no longer running")]
    WorkerGone,
}

impl DataError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DataError::Request { .. } => true,
            DataError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
