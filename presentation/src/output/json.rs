//! JSON output

use super::formatter::OutputFormatter;
use codelens_domain::tool::entities::ToolDefinition;
use codelens_domain::tool::value_objects::ToolResult;

/// Formats catalogues and results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_tools(&self, tools: &[&ToolDefinition]) -> String {
        serde_json::to_string_pretty(tools).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_result(&self, result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelens_domain::tool::value_objects::ToolError;
    use serde_json::json;

    #[test]
    fn test_result_envelope() {
        let ok = ToolResult::success("GitLog", json!({"commits": []}));
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_result(&ok)).unwrap();
        assert_eq!(value["tool_name"], "GitLog");
        assert_eq!(value["output"]["commits"], json!([]));
        assert!(value.get("error").is_none());

        let failed = ToolResult::failure("ReadFile", ToolError::not_found("a.txt"));
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_result(&failed)).unwrap();
        assert_eq!(value["error"]["code"], "NOT_FOUND");
        assert!(value.get("output").is_none());
    }

    #[test]
    fn test_tools_are_an_array() {
        let tool = ToolDefinition::new("GitStatus", "Show status");
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_tools(&[&tool])).unwrap();
        assert_eq!(value[0]["name"], "GitStatus");
    }
}
