use rulekit_builder::ValidationError;
use thiserror::Error;

/// Message used when a failed response carries no `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "unknown error";

/// Failures talking to the rules API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid rules API url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("rules API request failed: {0}")]
    Network(String),
    #[error("rules API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("failed to decode rules API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user for this failure.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}

/// Failure of a validated submission. Validation errors never reach the network.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
