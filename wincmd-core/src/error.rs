//! Error types for the command prompt.

use thiserror::Error;

/// Errors that can occur while running the shell.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("The system cannot find the path specified.")]
    PathNotFound(String),

    #[error(" File Not Found")]
    FileNotFound(String),

    #[error("'{0}' is not recognized as an internal or external command, operable program or batch file.")]
    UnknownCommand(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// True when the terminal has no more input to deliver.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, ShellError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;
