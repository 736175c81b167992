//! Command-line interface for reviewscope
//!
//! Argument parsing with clap; each subcommand lives in its own module under
//! [`commands`].

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
