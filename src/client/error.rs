//! Client-side failure categories

use thiserror::Error;

use crate::domain::FieldError;

/// Why a prediction attempt did not produce a price.
///
/// Failures are surfaced to the user once; the client never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Prediction failed with status code {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Invalid vehicle details: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Prediction service is not reachable: {0}")]
    Network(String),
}

impl ClientError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Short category name used in logs and status lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Server { .. } => "server_error",
            Self::Validation(_) => "validation_error",
            Self::Network(_) => "network_error",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::server(status.as_u16(), err.to_string())
        } else if err.is_decode() {
            Self::server(200, format!("unreadable response: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_fields() {
        let err = ClientError::Validation(vec![
            FieldError::new("Fuel_Type", "'Hybrid' is not one of: Petrol, Diesel, CNG"),
            FieldError::new("Owner", "must be between 0 and 3"),
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid vehicle details: Fuel_Type: 'Hybrid' is not one of: Petrol, Diesel, CNG; Owner: must be between 0 and 3"
        );
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_server_display() {
        let err = ClientError::server(503, "Prediction model is not available");
        assert_eq!(
            err.to_string(),
            "Prediction failed with status code 503: Prediction model is not available"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ClientError::Timeout.kind(), "timeout");
        assert_eq!(ClientError::network("refused").kind(), "network_error");
    }
}
