//! CLI entrypoint for codelens
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use codelens_application::{
    InvocationContext, InvocationLogger, InvokeToolUseCase, RegistryError, ToolExecutorPort,
    ToolSchemaPort,
};
use codelens_domain::{OutputFormat, ToolCall};
use codelens_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, JsonlInvocationLogger, ToolRegistry,
    open_current_dir,
};
use codelens_presentation::{Cli, Command, formatter_for};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Diagnostics go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `codelens --help` for usage.");
    };

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let root = Arc::new(open_current_dir().context("Cannot open workspace")?);
    info!(
        root = %root.path().display(),
        output = format.as_str(),
        "Starting codelens"
    );

    let registry: Arc<dyn ToolExecutorPort> =
        Arc::new(ToolRegistry::with_builtins(root, config.git_settings()));
    let formatter = formatter_for(format);

    match command {
        Command::Tools => {
            let tools = registry.list();
            println!("{}", formatter.format_tools(&tools).trim_end());
        }
        Command::Schema => {
            let schema = JsonSchemaToolConverter.all_tools_schema(registry.tool_spec());
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Call { tool, args } => {
            let call = parse_call(&tool, args.as_deref())?;

            let mut use_case = InvokeToolUseCase::new(registry.clone());
            if let Some(logger) = invocation_logger(&cli, &config) {
                use_case = use_case.with_invocation_logger(logger);
            }

            let ctx = invocation_context(&cli, &config);
            let result = match use_case.execute(&call, &ctx).await {
                Ok(result) => result,
                Err(RegistryError::UnknownTool(name)) => bail!(
                    "Unknown tool: {}. Available tools: {}",
                    name,
                    registry.available_tools().join(", ")
                ),
            };

            // A tool-level error is still a completed invocation
            println!("{}", formatter.format_result(&result).trim_end());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        warn!("{}", issue.message);
        if !cli.quiet {
            eprintln!("Warning: {}", issue.message);
        }
    }
    Ok(config)
}

fn parse_call(tool: &str, args: Option<&str>) -> Result<ToolCall> {
    let value = match args {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
            .with_context(|| format!("Invalid ARGS_JSON for {}", tool))?,
        _ => serde_json::Value::Null,
    };
    ToolCall::from_json(tool, value).map_err(|e| anyhow!(e))
}

fn invocation_context(cli: &Cli, config: &FileConfig) -> InvocationContext {
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling tool call");
            on_interrupt.cancel();
        }
    });

    let timeout = match cli.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.invocation.timeout(),
    };
    debug!(timeout_secs = ?timeout.map(|t| t.as_secs()), "Invocation timeout");

    let ctx = InvocationContext::new().with_cancellation(token);
    match timeout {
        Some(limit) => ctx.with_timeout(limit),
        None => ctx,
    }
}

fn invocation_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn InvocationLogger>> {
    let path: PathBuf = cli
        .log_file
        .clone()
        .or_else(|| config.logging.invocation_log_path())?;
    let logger = JsonlInvocationLogger::new(&path)?;
    debug!(path = %logger.path().display(), "Invocation log enabled");
    Some(Arc::new(logger))
}
