//! Presentation layer for codelens
//!
//! This crate contains the CLI definition and the text and JSON formatters
//! for tool catalogues and results.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
