//! salesrepl - interactive shell over in-memory sales ledgers.
//!
//! Usage:
//!   salesrepl                     Start the interactive REPL
//!   salesrepl -F commands.txt     Run commands from a file
//!   salesrepl --test              Run the scripted self-test
//!   salesrepl --test-interactive  Run the interactive insertion self-test

use crate::cmd::selftest::{self, INTERACTIVE_SCRIPT, SCRIPT};
use crate::io::{ScriptedInput, StdoutLineWriter};
use crate::logging::debug_dispatch;
use crate::session::Session;
use anyhow::{Context, Result};
use clap::Parser;
use rustyline::DefaultEditor;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const BANNER: &str =
    "Starting REPL...\nType 'help' for more information or 'exit' for quitting the REPL.";

/// Interactive shell for building and querying sales ledgers.
#[derive(Parser, Debug)]
#[command(name = "salesrepl")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Run the scripted self-test and exit
    #[arg(short = 't', long = "test", conflicts_with_all = ["test_interactive", "script"])]
    test: bool,

    /// Run the interactive insertion self-test and exit
    #[arg(long = "test-interactive", conflicts_with = "script")]
    test_interactive: bool,

    /// Read commands from a file instead of the terminal
    #[arg(short = 'F', long = "script", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Log parsed commands and dispatch to standard error
    #[arg(short, long)]
    verbose: bool,

    /// Do not load or save readline history
    #[arg(long = "no-history")]
    no_history: bool,
}

/// Main entry point for the REPL.
pub fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    println!("{BANNER}");
    let mut session = Session::new(StdoutLineWriter);
    if args.verbose || args.test || args.test_interactive {
        session = session.with_logging(debug_dispatch());
    }

    if args.test {
        selftest::run_script(&mut session, SCRIPT, &mut ScriptedInput::default());
    } else if args.test_interactive {
        let mut editor = DefaultEditor::new().context("failed to open terminal")?;
        selftest::run_script(&mut session, INTERACTIVE_SCRIPT, &mut editor);
    } else if let Some(path) = &args.script {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        session.run(&mut ScriptedInput::new(contents.lines()));
    } else {
        run_interactive(&mut session, args)?;
    }
    Ok(())
}

/// Get the history file path
fn get_history_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("salesrepl").join("history"))
}

fn run_interactive(session: &mut Session<StdoutLineWriter>, args: &Args) -> Result<()> {
    let mut rl = DefaultEditor::new().context("failed to open terminal")?;

    let history_path = if args.no_history {
        None
    } else {
        get_history_path()
    };
    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.load_history(path);
    }

    session.run(&mut rl);

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
    Ok(())
}
