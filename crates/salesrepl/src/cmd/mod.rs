//! Command implementations for the CLI.
//!
//! The binary is a thin wrapper around [`repl::main`].

pub mod repl;
pub mod selftest;
