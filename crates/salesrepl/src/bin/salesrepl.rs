//! salesrepl binary.

use std::process::ExitCode;

fn main() -> ExitCode {
    salesrepl::cmd::repl::main()
}
