//! Error types for authentication

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Transport-level failure talking to the API
    #[error("request failed: {0}")]
    Request(String),

    /// API answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// API answered with a payload we could not read
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Configured endpoint is not a valid URL
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// Rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Session file could not be read or written
    #[error("session storage error: {0}")]
    Storage(String),

    /// User agent could not be sent to the authorization endpoint
    #[error("redirect failed: {0}")]
    Redirect(String),
}

impl AuthError {
    /// Check if the API rejected the credentials themselves
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value.to_string())
    }
}
