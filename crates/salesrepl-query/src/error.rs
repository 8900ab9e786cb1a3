//! Command language error types.

use salesrepl_core::ValidationError;
use thiserror::Error;

/// Error returned when a line cannot be parsed into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at position {position}: {kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Byte offset in the input line where the error occurred.
    pub position: usize,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Blank line.
    #[error("empty query")]
    Empty,
    /// Line matches none of the command forms.
    #[error("unrecognized query {0:?}")]
    Unrecognized(String),
    /// Name that is not a valid identifier.
    #[error("invalid variable name {0:?}")]
    InvalidVariableName(String),
    /// Right-hand side of an assignment is not a supported constructor.
    #[error("unsupported expression {0:?}, only SalesDB() can be assigned")]
    UnsupportedExpression(String),
    /// Method call without a name before `(`.
    #[error("missing method name")]
    MissingMethodName,
    /// Method name that is not an identifier.
    #[error("invalid method name {0:?}")]
    InvalidMethodName(String),
    /// Method call without an argument list.
    #[error("expected '(' after method name")]
    MissingParenthesis,
    /// `(` never closed.
    #[error("unclosed '('")]
    UnclosedParenthesis,
    /// Delimiter in a place it cannot appear.
    #[error("unexpected {0:?}")]
    UnexpectedChar(char),
    /// Input after the closing `)`.
    #[error("unexpected input after ')'")]
    TrailingInput,
    /// Quote never closed.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Argument that is not a string, integer or float literal.
    #[error("invalid literal {token:?}: {reason}")]
    InvalidLiteral {
        /// The offending argument text.
        token: String,
        /// What went wrong.
        reason: String,
    },
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// Error returned when a method's arguments do not fit its signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Wrong number of arguments.
    #[error("{method}() takes {expected} argument(s), {found} given")]
    Count {
        /// Method name.
        method: &'static str,
        /// Number expected.
        expected: usize,
        /// Number given.
        found: usize,
    },
    /// No arguments given to a method that needs at least one.
    #[error("{method}() takes at least one argument")]
    Missing {
        /// Method name.
        method: &'static str,
    },
    /// Argument of the wrong literal type.
    #[error("{method}() argument {index} must be {expected}, got {found}")]
    Type {
        /// Method name.
        method: &'static str,
        /// 1-based argument position.
        index: usize,
        /// Accepted type.
        expected: &'static str,
        /// Type given.
        found: &'static str,
    },
    /// Well-typed argument with an unacceptable value.
    #[error("{method}(): {source}")]
    Value {
        /// Method name.
        method: &'static str,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },
}

/// Error returned when a method name is not part of the command language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method {0:?}")]
pub struct UnknownMethod(pub String);
