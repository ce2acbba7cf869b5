use thiserror::Error;

/// Error type that captures configuration and persistence failures.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
