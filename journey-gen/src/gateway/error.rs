//! Gateway error types.

use crate::domain::DomainError;

/// Errors fetching or converting trips.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check API credentials")]
    Unauthorized,

    /// No trip exists for this identifier and date
    #[error("not found: {identifier}")]
    NotFound { identifier: String },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A required setting is missing
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The response parsed but its contents are unusable
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// The response described an invalid trip
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl GatewayError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GatewayError::InvalidData {
            message: message.into(),
        }
    }

    /// Whether the trip simply does not exist, as opposed to a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GatewayError::NotFound {
            identifier: "train/service/P12345/2024/3/15".into(),
        };
        assert_eq!(err.to_string(), "not found: train/service/P12345/2024/3/15");
        assert!(err.is_not_found());

        let err = GatewayError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert!(!err.is_not_found());

        let err = GatewayError::from(DomainError::EmptyTrip);
        assert_eq!(err.to_string(), "trip must have at least one stop");
    }
}
