use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing form element: {0}")]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
