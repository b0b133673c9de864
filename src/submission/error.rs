//! Errors raised at the prediction transport boundary

use thiserror::Error;

/// Shown when the service gave no usable message
pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to connect. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Service answered with a non-success status
    #[error("Prediction rejected: {status} - {}", message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// Success status with a body that is not a prediction
    #[error("Parse error: {0}")]
    Parse(String),
}

impl PredictionError {
    /// Message for the failure banner
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PredictionError::Timeout
        } else if err.is_connect() {
            PredictionError::Network(format!("Connection error: {}", err))
        } else if err.is_decode() {
            PredictionError::Parse(err.to_string())
        } else {
            PredictionError::Network(err.to_string())
        }
    }
}

pub type PredictionResult<T> = Result<T, PredictionError>;
