//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::errors::ArborError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Arbor(#[from] ArborError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("trees differ")]
    TreesDiffer,
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::TreesDiffer => crate::exitcode::DIFFERENT,
            CliError::Arbor(e) => match e {
                ArborError::Outline { .. } => crate::exitcode::DATAERR,
                ArborError::FileNotFound(_) => crate::exitcode::NOINPUT,
                ArborError::Io { .. } | ArborError::Write(_) | ArborError::ShortWrite { .. } => {
                    crate::exitcode::IOERR
                }
                ArborError::Config { .. } => crate::exitcode::CONFIG,
                ArborError::Domain(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
