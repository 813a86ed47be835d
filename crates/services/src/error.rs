//! Shared error types for the services crate.

use practice_core::session::ReviewError;
use thiserror::Error;

/// Fatal startup failures. The app shows a terminal screen; there is no retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BootstrapError {
    #[error("this app must be opened from inside the messenger")]
    NoHostContext,
    #[error("the messenger did not provide a user identity")]
    NoIdentity,
}

/// Failures of a single request or of a fail-fast aggregate.
///
/// Recoverable: views render an error state with a manual retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// Non-2xx response. `detail` comes from the `{"detail": ...}` body when
    /// present, otherwise it reads `HTTP <status>`.
    #[error("{detail}")]
    Http { status: u16, detail: String },
    #[error("network error, please check your connection")]
    Network,
    #[error("unexpected response from server")]
    Parse,
    /// Rejected before any request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    #[must_use]
    pub fn http(status: u16, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or_else(|| format!("HTTP {status}"));
        Self::Http { status, detail }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A grade could not be saved. Reported to the user, never blocks progression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not save review for \"{word}\": {source}")]
pub struct GradeError {
    pub word: String,
    #[source]
    pub source: FetchError,
}

/// A review session could not be (re)started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StartError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Invalid client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base url {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base url {0:?} cannot carry a path")]
    NotABase(String),
}
