use thiserror::Error;

/// The only error kind the client produces: the backend rejected a
/// request, could not be reached, or answered with something unreadable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn network(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("{}: network error: {}", operation, cause))
    }

    pub fn status(operation: &str, status: u16, detail: &str) -> Self {
        if detail.is_empty() {
            Self::new(format!("{}: HTTP {}", operation, status))
        } else {
            Self::new(format!("{}: HTTP {} ({})", operation, status, detail))
        }
    }

    pub fn decode(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("{}: invalid response: {}", operation, cause))
    }

    pub fn timeout(operation: &str, timeout_ms: u64) -> Self {
        Self::new(format!("{}: timed out after {}ms", operation, timeout_ms))
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::new(format!("serialization error: {}", e))
    }
}
