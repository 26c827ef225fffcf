//! Error types for the Web API data layer.

use thiserror::Error;

/// Errors surfaced by the token provider and every repository call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No session, an expired session that could not be refreshed, or HTTP 401
    #[error("Not authenticated")]
    Unauthenticated,

    /// Network failure or a non-2xx response
    #[error("Request failed (status {status:?}): {cause}")]
    RequestFailed { status: Option<u16>, cause: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeFailed(String),

    /// Rejected before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    pub(crate) fn network(cause: impl ToString) -> Self {
        Self::RequestFailed {
            status: None,
            cause: cause.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::Unauthenticated => Some(401),
            _ => None,
        }
    }

    /// Short text suitable for showing in a failed screen.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Your session has expired. Please log in again.".to_string(),
            Self::RequestFailed { status: Some(404), .. } => "Not found.".to_string(),
            Self::RequestFailed { status: Some(403), .. } => {
                "Action forbidden. Check your Spotify Premium status.".to_string()
            }
            Self::RequestFailed { status: Some(429), .. } => {
                "Rate limited. Please wait a moment.".to_string()
            }
            Self::RequestFailed { status: Some(status), cause } => {
                format!("Spotify returned an error ({status}): {cause}")
            }
            Self::RequestFailed { status: None, cause } => format!("Network error: {cause}"),
            Self::DecodeFailed(_) => "Received an unexpected response from Spotify.".to_string(),
            Self::InvalidArgument(reason) => reason.clone(),
        }
    }
}

/// Result type for data layer operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_not_found() {
        let err = ApiError::RequestFailed {
            status: Some(404),
            cause: "non existing id".into(),
        };
        assert_eq!(err.user_message(), "Not found.");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.status(), None);
        assert!(err.user_message().contains("connection refused"));
    }
}
