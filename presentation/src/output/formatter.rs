//! Output formatter trait

use codelens_domain::OutputFormat;
use codelens_domain::tool::entities::ToolDefinition;
use codelens_domain::tool::value_objects::ToolResult;

use super::console::ConsoleFormatter;
use super::json::JsonFormatter;

/// Trait for formatting what the CLI prints to stdout
pub trait OutputFormatter {
    /// Format the tool catalogue, already sorted by name
    fn format_tools(&self, tools: &[&ToolDefinition]) -> String;

    /// Format the result of one invocation
    fn format_result(&self, result: &ToolResult) -> String;
}

/// Formatter for the selected output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
