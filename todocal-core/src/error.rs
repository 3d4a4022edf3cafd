//! Error types for todocal.

use thiserror::Error;

/// Errors raised while obtaining an access token.
#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    #[error("No stored credentials: {0}")]
    Missing(String),

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Interactive consent failed: {0}")]
    Consent(String),

    #[error("Credential storage error: {0}")]
    Storage(String),
}

/// Errors returned by a calendar gateway.
///
/// These never become HTTP faults; the server renders them in-band.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("<HttpError {status} returned \"{body}\">")]
    Api { status: u16, body: String },

    #[error("Calendar request failed: {0}")]
    Transport(String),

    #[error("Calendar request timed out after {0}s")]
    Timeout(u64),

    #[error("Unexpected calendar response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while building todocal types.
#[derive(Error, Debug)]
pub enum TodocalError {
    #[error("Malformed prioritized entry: {0:?}")]
    MalformedEntry(String),
}

/// Result type alias for todocal operations.
pub type TodocalResult<T> = Result<T, TodocalError>;
