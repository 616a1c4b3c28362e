//! Shared helpers for tool use cases.

use codelens_domain::tool::entities::ToolCall;

/// Extract a short preview string from tool call arguments.
///
/// Looks for well-known keys (`path`, `directory`, `commit`) first, then
/// falls back to the first scalar value in key order.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    let keys = ["path", "directory", "commit"];
    for key in &keys {
        if let Some(serde_json::Value::String(s)) = call.arguments.get(*key) {
            return truncate_preview(s, 50);
        }
    }

    let mut names: Vec<&String> = call.arguments.keys().collect();
    names.sort();
    for name in names {
        match &call.arguments[name] {
            serde_json::Value::String(s) => return truncate_preview(s, 50),
            serde_json::Value::Number(n) => return format!("{}={}", name, n),
            _ => {}
        }
    }
    String::new()
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
