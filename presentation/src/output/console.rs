//! Console output formatter for catalogues and tool results

use super::formatter::OutputFormatter;
use codelens_domain::tool::entities::ToolDefinition;
use codelens_domain::tool::value_objects::{ToolResult, ToolResultMetadata};
use colored::Colorize;
use serde_json::Value;

/// Formats tool output for a terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the tool catalogue
    pub fn format_tools(tools: &[&ToolDefinition]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Available tools"));

        for tool in tools {
            output.push_str(&format!(
                "\n{}\n{}\n",
                tool.name.yellow().bold(),
                Self::indent(&tool.description, "  ")
            ));
            for param in &tool.parameters {
                let mut line = format!(
                    "    {} ({}{})",
                    param.name.cyan(),
                    param.param_type,
                    if param.required { ", required" } else { "" }
                );
                if let Some(default) = &param.default {
                    line.push_str(&format!(" [default: {}]", default));
                }
                output.push_str(&line);
                output.push_str(&format!("\n      {}\n", param.description.dimmed()));
            }
        }

        output
    }

    /// Format one tool result.
    ///
    /// Known payload shapes get a readable layout; anything else is shown as
    /// pretty JSON.
    pub fn format_result(result: &ToolResult) -> String {
        let mut output = String::new();

        match (result.output(), result.error()) {
            (Some(payload), _) => output.push_str(&Self::payload(payload)),
            (None, Some(err)) => {
                output.push_str(&format!(
                    "{} {}\n",
                    format!("Error [{}]:", err.code).red().bold(),
                    err.message
                ));
                if let Some(details) = &err.details {
                    output.push_str(&format!("  {}\n", details.dimmed()));
                }
            }
            (None, None) => {}
        }

        let footer = Self::footer(&result.tool_name, &result.metadata);
        output.push_str(&format!("{}\n", footer.dimmed()));
        output
    }

    fn payload(payload: &Value) -> String {
        // ReadFile
        if let Some(content) = payload.get("content").and_then(Value::as_str) {
            let mut out = content.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            return out;
        }

        // ListFiles
        if let Some(files) = payload.get("files").and_then(Value::as_array) {
            return Self::lines(files, "(empty directory)");
        }

        // GitStatus
        if let (Some(modified), Some(untracked)) = (
            payload.get("modified").and_then(Value::as_array),
            payload.get("untracked").and_then(Value::as_array),
        ) {
            if modified.is_empty() && untracked.is_empty() {
                return "Working tree clean\n".to_string();
            }
            let mut out = String::new();
            for (title, paths) in [("Modified:", modified), ("Untracked:", untracked)] {
                if paths.is_empty() {
                    continue;
                }
                out.push_str(&format!("{}\n", title.cyan().bold()));
                out.push_str(&Self::indent(&Self::lines(paths, ""), "  "));
                out.push('\n');
            }
            return out;
        }

        // GitLog
        if let Some(commits) = payload.get("commits").and_then(Value::as_array) {
            if commits.is_empty() {
                return "(no commits)\n".to_string();
            }
            let mut out = String::new();
            for commit in commits {
                let hash = str_field(commit, "hash");
                out.push_str(&format!(
                    "{} {} {} {}\n",
                    hash.get(..12).unwrap_or(hash).yellow(),
                    str_field(commit, "date").dimmed(),
                    str_field(commit, "author").cyan(),
                    str_field(commit, "subject")
                ));
            }
            return out;
        }

        // GitDiff
        if let Some(diff) = payload.get("result").and_then(Value::as_str) {
            if diff.is_empty() {
                return "(no changes)\n".to_string();
            }
            let mut out = Self::colorize_diff(diff);
            if payload.get("truncated").and_then(Value::as_bool) == Some(true) {
                out.push_str(&format!("{}\n", "[diff truncated]".yellow()));
            }
            return out;
        }

        serde_json::to_string_pretty(payload).unwrap_or_default() + "\n"
    }

    fn lines(values: &[Value], empty: &str) -> String {
        if values.is_empty() {
            return if empty.is_empty() {
                String::new()
            } else {
                format!("{}\n", empty)
            };
        }
        values
            .iter()
            .map(|v| match v {
                Value::String(s) => format!("{}\n", s),
                other => format!("{}\n", other),
            })
            .collect()
    }

    fn colorize_diff(diff: &str) -> String {
        let mut out = String::new();
        for line in diff.lines() {
            let styled = if line.starts_with("+++") || line.starts_with("---") {
                line.bold().to_string()
            } else if line.starts_with('+') {
                line.green().to_string()
            } else if line.starts_with('-') {
                line.red().to_string()
            } else if line.starts_with("@@") {
                line.cyan().to_string()
            } else {
                line.to_string()
            };
            out.push_str(&styled);
            out.push('\n');
        }
        out
    }

    fn footer(tool_name: &str, metadata: &ToolResultMetadata) -> String {
        let mut parts = vec![tool_name.to_string()];
        if let Some(path) = &metadata.path {
            parts.push(path.clone());
        }
        if let Some(entries) = metadata.entries {
            parts.push(format!("{} entries", entries));
        }
        if let Some(bytes) = metadata.bytes {
            parts.push(format!("{} bytes", bytes));
        }
        if metadata.truncated == Some(true) {
            parts.push("truncated".to_string());
        }
        if let Some(ms) = metadata.duration_ms {
            parts.push(format!("{}ms", ms));
        }
        format!("── {} ──", parts.join(" · "))
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn str_field<'a>(value: &'a Value, name: &str) -> &'a str {
    value.get(name).and_then(Value::as_str).unwrap_or("")
}

impl OutputFormatter for ConsoleFormatter {
    fn format_tools(&self, tools: &[&ToolDefinition]) -> String {
        Self::format_tools(tools)
    }

    fn format_result(&self, result: &ToolResult) -> String {
        Self::format_result(result)
    }
}
