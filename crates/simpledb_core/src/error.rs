//! Error types for SimpleDB core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Protocol text for [`CoreError::UnrecognizedCommand`].
pub const UNRECOGNIZED_COMMAND_MESSAGE: &str = "Unrecognized command. Please try again.";

/// Protocol text for [`CoreError::MissingArgument`].
pub const MISSING_ARGUMENT_MESSAGE: &str = "Not enough arguments. Please try again.";

/// Protocol text for [`CoreError::NoActiveTransaction`].
pub const NO_TRANSACTION_MESSAGE: &str = "NO TRANSACTION";

/// Errors that can occur in SimpleDB core operations.
///
/// All of them are recoverable: none leaves the store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The command token is not part of the protocol.
    #[error("unrecognized command: {name:?}")]
    UnrecognizedCommand {
        /// The offending command token.
        name: String,
    },

    /// Fewer arguments than the command requires.
    #[error("{command} requires {expected} argument(s), got {actual}")]
    MissingArgument {
        /// Command or operation name.
        command: &'static str,
        /// Number of arguments required.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// `ROLLBACK` or `COMMIT` with no open transaction.
    #[error("no active transaction")]
    NoActiveTransaction,
}

impl CoreError {
    /// Creates an unrecognized command error.
    pub fn unrecognized_command(name: impl Into<String>) -> Self {
        Self::UnrecognizedCommand { name: name.into() }
    }

    /// Creates a missing argument error.
    pub fn missing_argument(command: &'static str, expected: usize, actual: usize) -> Self {
        Self::MissingArgument {
            command,
            expected,
            actual,
        }
    }

    /// Returns the fixed text the command protocol prints for this error.
    ///
    /// These literals are the protocol's entire error surface and must not change.
    #[must_use]
    pub fn protocol_message(&self) -> &'static str {
        match self {
            Self::UnrecognizedCommand { .. } => UNRECOGNIZED_COMMAND_MESSAGE,
            Self::MissingArgument { .. } => MISSING_ARGUMENT_MESSAGE,
            Self::NoActiveTransaction => NO_TRANSACTION_MESSAGE,
        }
    }
}
