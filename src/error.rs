//! Unified SDK error types.

use thiserror::Error;

use crate::domain::admin::ReviewError;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered an admin review with rows that cannot be signed.
    #[error("Review rejected: {0}")]
    Review(#[from] ReviewError),

    #[error("Wallet not connected")]
    NotConnected,
}

impl SdkError {
    /// Whether the failure happened before anything left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, SdkError::Validation(_))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend could not be reached (gateways other than reqwest).
    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A 2xx response whose body is not the expected payload.
    ///
    /// The backend renders failures as HTML message pages, usually with a
    /// 200 status, so this is the common shape of a server-side rejection.
    #[error("Unexpected response: {body}")]
    UnexpectedResponse { body: String },
}

impl HttpError {
    /// Whether the request never got an answer from the backend.
    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => !e.is_status(),
            HttpError::Transport(_) => true,
            _ => false,
        }
    }
}

/// Wallet bridge errors.
///
/// Every variant means "the user declined or the extension is unavailable";
/// none of them is fatal to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet extension is not installed")]
    NotInstalled,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}
