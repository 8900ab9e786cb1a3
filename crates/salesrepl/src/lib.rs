//! Interactive shell over in-memory sales ledgers.
//!
//! A [`Session`] binds variable names to [`SalesDb`](salesrepl_core::SalesDb)
//! ledgers and runs one command line at a time, reading interactive input from
//! a [`LineInput`] and writing results to a [`LineOutput`].
//!
//! # Example
//!
//! ```
//! use salesrepl::{ScriptedInput, Session};
//!
//! let mut session = Session::new(Vec::new());
//! let mut input = ScriptedInput::default();
//! session.run_line("x = SalesDB()", &mut input);
//! session.run_line("x._unsafe_insert('pen', 2.5, 4, 7, 'Bob', '01/02/2003', '')", &mut input);
//! session.run_line("x.month_summary(2, 2003)", &mut input);
//!
//! assert_eq!(
//!     session.output(),
//!     &vec![
//!         "Inserted sale with id 1".to_string(),
//!         "2/2003 summary: { total: 10.0, mean: 10.0 }".to_string(),
//!     ]
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod error;
pub mod export;
pub mod help;
pub mod io;
pub mod logging;
pub mod session;

pub use error::{CommandError, ErrorKind};
pub use export::{CsvExporter, ExportError, Exporter};
pub use io::{InputError, LineInput, LineOutput, ScriptedInput, StdoutLineWriter};
pub use session::{Session, SessionState, PROMPT};
