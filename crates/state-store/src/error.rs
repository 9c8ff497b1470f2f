use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("An error occurred during JSON serialization of the state: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Another run holds the state lock at {0}; refusing to race on the state file.")]
    Locked(String),
}
