//! Configuration file loading for codelens
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CODELENS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./codelens.toml` or `./.codelens.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/codelens/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_INVOCATION_TIMEOUT_SECS, FileConfig, FileGitConfig, FileInvocationConfig,
    FileLoggingConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
