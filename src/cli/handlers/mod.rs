//! Command handlers for CLI operations
//!
//! Execution logic for each subcommand, kept apart from parsing.

pub mod check;
pub mod serve;

pub use check::CheckCommandHandler;
pub use serve::ServeCommandHandler;
