use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("classifier artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("message is empty or whitespace-only")]
    EmptyInput,

    #[error("batch contains no records")]
    EmptyBatch,

    #[error("batch record {row} is missing required field '{field}'")]
    MissingField { field: String, row: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
