//! The salesrepl command language.
//!
//! This crate turns one line of REPL input into a structured [`Command`].
//!
//! # Grammar
//!
//! - `# ...` - A comment, ignored
//! - `help`, `exit` - Builtin commands
//! - `name = SalesDB()` - Bind `name` to a fresh, empty ledger
//! - `name.method(arg, ...)` - Call a ledger method; arguments are quoted
//!   strings, integers or floats
//!
//! Arguments are literals only: nothing in a line is ever evaluated as code.
//! Method names are resolved to the closed [`Method`] enum by
//! [`Method::bind`], which also checks argument count and types.
//!
//! # Example
//!
//! ```
//! use salesrepl_query::{parse, Command, Literal, Method, MethodName};
//!
//! let cmd = parse("x.month_summary(5, 1933)").unwrap();
//! let Command::Call { var, call } = cmd else { panic!() };
//! assert_eq!(var, "x");
//! assert_eq!(call.args, vec![Literal::Integer(5), Literal::Integer(1933)]);
//!
//! let name: MethodName = call.name.parse().unwrap();
//! assert!(matches!(Method::bind(name, &call.args), Ok(Method::MonthSummary(_))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod method;
pub mod parser;

pub use ast::*;
pub use error::{ArgumentError, ParseError, ParseErrorKind, UnknownMethod};
pub use method::{Method, MethodName};
pub use parser::{is_variable_name, parse};
