//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for catalogues and tool results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for codelens_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => codelens_domain::OutputFormat::Text,
            OutputFormat::Json => codelens_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for codelens
#[derive(Parser, Debug)]
#[command(name = "codelens")]
#[command(author, version, about = "Sandboxed read-only workspace tools for coding agents")]
#[command(long_about = r#"
codelens exposes read-only views of the current directory as named tools:
ListFiles, ReadFile, GitStatus, GitLog and GitDiff. Every path is confined
to the directory codelens was started in.

Configuration files are loaded from (in priority order):
1. CODELENS_* environment variables (e.g. CODELENS_GIT__TIMEOUT_SECS=10)
2. --config <path>     Explicit config file
3. ./codelens.toml     Project-level config
4. ~/.config/codelens/config.toml   Global config

Example:
  codelens tools
  codelens call ListFiles '{"depth": 2}'
  codelens call ReadFile '{"path": "src/main.rs", "length": 4096}'
  codelens --output json call GitLog '{"maxEntries": 5}'
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors to the diagnostic log
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL record of every tool call to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Per tool call timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available tools and their parameters
    Tools,

    /// Print the tool catalogue as JSON Schema
    Schema,

    /// Invoke a single tool
    Call {
        /// Tool name, e.g. ReadFile
        tool: String,

        /// Arguments as a JSON object
        #[arg(value_name = "ARGS_JSON")]
        args: Option<String>,
    },
}
