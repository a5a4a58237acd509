use super::validator::ValidationErrors;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    Validation(ValidationErrors),
    Rejected { status: u16, message: Option<String> },
    Network(String),
    Timeout(String),
    Parse(String),
    Serialization(String),
    Busy,
    NotIdle,
}

impl FormError {
    /// Transport faults end the attempt before a structured response was read.
    #[must_use]
    pub const fn is_transport_fault(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Parse(_) | Self::Serialization(_)
        )
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Validation(errors) => {
                write!(formatter, "Validation failed: {errors}")
            }
            FormError::Rejected { status, message } => match message {
                Some(message) => write!(formatter, "Request rejected ({status}): {message}"),
                None => write!(formatter, "Request rejected ({status})"),
            },
            FormError::Network(message) => write!(formatter, "Network error: {message}"),
            FormError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            FormError::Parse(message) => write!(formatter, "Response error: {message}"),
            FormError::Serialization(message) => write!(formatter, "Request error: {message}"),
            FormError::Busy => write!(formatter, "A submission is already in flight"),
            FormError::NotIdle => write!(formatter, "The previous result has not been dismissed"),
        }
    }
}

impl std::error::Error for FormError {}

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FormError::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_decode() {
            FormError::Parse(format!("Failed to decode response: {err}"))
        } else if err.is_builder() {
            FormError::Serialization(format!("Failed to build request: {err}"))
        } else {
            FormError::Network(format!("Unable to reach the server: {err}"))
        }
    }
}
