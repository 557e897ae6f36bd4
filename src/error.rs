use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a git repository: {0}")]
    Repository(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No commits found in range {from}..{to}")]
    InvalidRange { from: String, to: String },

    #[error("Failed to extract diff: {0}")]
    Diff(String),

    #[error("Provider credentials are required but were not configured")]
    ConfigRequired,

    #[error("Model API error: {0}")]
    ModelApi(String),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the flow stopped because the user dismissed a prompt,
    /// as opposed to an actual failure.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, Error::Cancelled | Error::ConfigRequired)
    }
}
