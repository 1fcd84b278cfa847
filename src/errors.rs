use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("short write: {written} of {expected} bytes accepted")]
    ShortWrite { expected: usize, written: usize },

    /// Error reported by the output sink itself.
    #[error(transparent)]
    Write(std::io::Error),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("outline line {line}: {reason}")]
    Outline { line: usize, reason: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
}

impl ArborError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn outline(line: usize, reason: impl Into<String>) -> Self {
        Self::Outline {
            line,
            reason: reason.into(),
        }
    }
}

pub type ArborResult<T> = Result<T, ArborError>;
