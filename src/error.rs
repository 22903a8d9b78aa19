//! Error types for the decision task.

/// Top-level error type for the decision task.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Queue service errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("createTask request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("createTask returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the decision task.
pub type Result<T> = std::result::Result<T, Error>;
