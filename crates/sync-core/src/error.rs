use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid output mode '{0}': expected quiet, summary, or verbose")]
    InvalidOutputMode(String),

    #[error("invalid sandbox env '{0}': expected default or dev")]
    InvalidSandboxEnv(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
