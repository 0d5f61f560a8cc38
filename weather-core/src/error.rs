use serde::Serialize;
use thiserror::Error;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Failure reported by a [`WeatherGateway`](crate::WeatherGateway) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
    pub code: Option<String>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Rejected before any network call.
    Validation,
    Gateway,
}

/// Error surfaced by the store to its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct WeatherError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl WeatherError {
    pub fn empty_city() -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: EMPTY_CITY_MESSAGE.to_string(),
            code: None,
        }
    }
}

impl From<GatewayError> for WeatherError {
    fn from(err: GatewayError) -> Self {
        let message = if err.message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            err.message
        };

        Self {
            kind: ErrorKind::Gateway,
            message,
            code: err.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_message_passes_through() {
        let err = WeatherError::from(GatewayError::with_code("city not found", "404"));
        assert_eq!(err.kind, ErrorKind::Gateway);
        assert_eq!(err.message, "city not found");
        assert_eq!(err.code.as_deref(), Some("404"));
        assert_eq!(err.to_string(), "city not found");
    }

    #[test]
    fn blank_gateway_message_gets_fallback() {
        let err = WeatherError::from(GatewayError::new("  "));
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
        assert!(err.code.is_none());
    }

    #[test]
    fn empty_city_is_validation() {
        let err = WeatherError::empty_city();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Please enter a city name");
    }
}
