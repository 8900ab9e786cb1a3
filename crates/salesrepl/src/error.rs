//! Errors reported by the session for a single command.

use salesrepl_core::{LedgerError, ValidationError};
use salesrepl_query::{ArgumentError, ParseError};
use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportError;
use crate::io::InputError;

/// Broad category of a [`CommandError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed command text.
    Parse,
    /// Well-formed command with an unacceptable argument.
    Validation,
    /// Unknown variable.
    Reference,
    /// Missing sale identifier.
    NotFound,
    /// Rendering or writing a ledger failed.
    Export,
    /// The line input stopped while a command was reading from it.
    Input,
}

/// A command that could not be carried out.
///
/// Every variant leaves all ledgers as they were before the command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The line could not be parsed.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The method name is not part of the command language.
    #[error(
        "invalid command {0:?}. You can exit the REPL by typing 'exit' or ask for help by typing 'help'"
    )]
    InvalidCommand(String),

    /// The variable was never assigned.
    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    /// Arguments do not fit the method.
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    /// A field entered during interactive insertion was rejected.
    #[error("aborting insertion: {0}")]
    InsertAborted(ValidationError),

    /// The ledger refused the mutation.
    #[error("{0}")]
    NotFound(#[from] LedgerError),

    /// Saving the ledger failed.
    #[error("failed to save to {}: {source}", path.display())]
    Export {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: ExportError,
    },

    /// The ledger dump could not be rendered.
    #[error("failed to render ledger: {0}")]
    Render(#[from] serde_json::Error),

    /// Input ended while interactive insertion was waiting for a field.
    #[error("aborting insertion: {0}")]
    Input(InputError),
}

impl CommandError {
    /// The category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) | Self::InvalidCommand(_) => ErrorKind::Parse,
            Self::Argument(_) | Self::InsertAborted(_) => ErrorKind::Validation,
            Self::UnknownVariable(_) => ErrorKind::Reference,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Export { .. } | Self::Render(_) => ErrorKind::Export,
            Self::Input(_) => ErrorKind::Input,
        }
    }

    /// Whether the session must stop after reporting this error.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Input(InputError::Interrupted | InputError::Eof)
        )
    }
}
