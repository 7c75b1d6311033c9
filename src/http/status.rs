//! Response status classification for completed HTTP exchanges.

use reqwest::StatusCode;

/// Failure buckets for HTTP responses, as surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    /// Client error (HTTP 400-499)
    InvalidRequest,
    /// Server error (HTTP 501+)
    InternalServer,
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusError::InvalidRequest => write!(f, "Invalid Request Exception"),
            StatusError::InternalServer => write!(f, "Internal Server Exception"),
        }
    }
}

impl std::error::Error for StatusError {}

/// Reports whether a completed response counts as an error (status >= 400).
pub fn has_error(status: StatusCode) -> bool {
    status.as_u16() >= 400
}

/// Maps an error status to its failure bucket.
///
/// Statuses in [400, 500) are client failures and statuses above 500 are
/// server failures. Exactly 500 matches neither bucket and returns `Ok(())`
/// even though [`has_error`] reports it as an error; callers see the reply
/// unchanged in that case.
pub fn check_status(status: StatusCode) -> Result<(), StatusError> {
    let code = status.as_u16();
    if (400..500).contains(&code) {
        Err(StatusError::InvalidRequest)
    } else if code > 500 {
        Err(StatusError::InternalServer)
    } else {
        Ok(())
    }
}
