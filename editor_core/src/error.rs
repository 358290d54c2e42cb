//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("'{0}' is not a registered action")]
    UnregisteredAction(String),

    #[error("Invalid key binding '{0}'")]
    InvalidKeyChord(String),

    #[error("Invalid header level '{0}', expected h1 through h6")]
    InvalidHeaderLevel(String),

    #[error("Invalid position '{0}', expected LINE:COL")]
    InvalidPosition(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
