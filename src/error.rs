use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Please login first")]
    Unauthenticated,

    #[error("Cancelled")]
    Cancelled,

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text shown to the user in the notification sink.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http(_) => "Could not reach the server".to_string(),
            AppError::Decode(_) => "Unexpected response from the server".to_string(),
            other => other.to_string(),
        }
    }
}
