use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for jobtrigger
#[derive(Error, Debug)]
pub enum JobTriggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("No job found with name '{0}'")]
    JobNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the identity and data platform APIs
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else {
            ApiError::RequestFailed(err.to_string())
        }
    }
}

impl JobTriggerError {
    /// HTTP status code of a failed API call, if the failure carried one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            JobTriggerError::Api(ApiError::HttpError { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JobTriggerError>;
