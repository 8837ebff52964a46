//! CLI Adapter
//!
//! Command-line interface for the SniffTools scoring service.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{execute, AnalyzeCmd, CheckConfigCmd, CliApp, Command, ServeCmd};
