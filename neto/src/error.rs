//! Error types shared across the client.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a backend call.
///
/// Display yields the message meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401. Carries the status text.
    #[error("{0}")]
    Unauthorized(String),
    /// Any other failure. Carries the server message or a fallback.
    #[error("{0}")]
    RequestFailed(String),
}

impl ApiError {
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err.to_string())
    }
}

/// Failure of the local key/value storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode profile")]
    Encode(#[from] serde_json::Error),
}

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// The backend failure, if this is one.
    pub const fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Store(_) => None,
        }
    }
}
