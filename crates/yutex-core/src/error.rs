//! Error types for yutex

use thiserror::Error;

/// Main error type for yutex operations
#[derive(Error, Debug)]
pub enum YutexError {
    /// IO error while reading documents or config files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Render error during output generation
    #[error("Render error: {0}")]
    Render(String),

    /// Document ended while blocks were still open
    #[error("unterminated block(s) at end of document: {}", .open.join(", "))]
    Unterminated {
        /// Display names of the contexts left on the stack, innermost last
        open: Vec<String>,
    },
}

/// Result type alias for yutex operations
pub type Result<T> = std::result::Result<T, YutexError>;
