//! Tool domain value objects — immutable result and error types
//!
//! Every tool invocation produces a [`ToolResult`]: either a structured
//! success payload or a [`ToolError`], never both. Operational failures
//! (bad paths, missing files, VCS errors) travel inside the result so the
//! calling agent can read the message and adjust its request.
//!
//! | Code | Meaning |
//! |------|---------|
//! | `INVALID_ARGUMENT` | Missing/wrong parameters — the agent can fix them |
//! | `ACCESS_DENIED` | Path escapes the workspace |
//! | `NOT_FOUND` | File, directory or revision does not exist |
//! | `EXECUTION_FAILED` | I/O or VCS failure |
//! | `CANCELLED` | The invocation context was cancelled |
//! | `TIMEOUT` | The invocation exceeded its deadline |

use serde::{Deserialize, Serialize};

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const EXECUTION_FAILED: &str = "EXECUTION_FAILED";
pub const CANCELLED: &str = "CANCELLED";
pub const TIMEOUT: &str = "TIMEOUT";

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "ACCESS_DENIED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(INVALID_ARGUMENT, message)
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ACCESS_DENIED, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(NOT_FOUND, format!("Not found: {}", resource.into()))
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(EXECUTION_FAILED, message)
    }

    pub fn cancelled() -> Self {
        Self::new(CANCELLED, "Invocation was cancelled")
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(TIMEOUT, format!("Operation timed out: {}", operation.into()))
    }

    pub fn is_access_denied(&self) -> bool {
        self.code == ACCESS_DENIED
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Either the success payload or the failure descriptor of an invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    Output(serde_json::Value),
    Error(ToolError),
}

/// Result of a tool invocation.
///
/// Serializes as `{"tool_name": ..., "output": {...}}` or
/// `{"tool_name": ..., "error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    #[serde(flatten)]
    pub outcome: ToolOutcome,
    /// Metadata about the execution
    #[serde(default, skip_serializing_if = "ToolResultMetadata::is_empty")]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of bytes returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// For file operations: the workspace-relative path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Number of entries returned (files, commits, status paths)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    /// Whether the output was cut at a size limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

impl ToolResultMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Output(output),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a successful result from any serializable payload
    pub fn from_payload<T: Serialize>(tool_name: impl Into<String>, payload: &T) -> Self {
        let tool_name = tool_name.into();
        match serde_json::to_value(payload) {
            Ok(value) => Self::success(tool_name, value),
            Err(e) => Self::failure(
                tool_name,
                ToolError::execution_failed(format!("Failed to encode result: {}", e)),
            ),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Error(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Output(_))
    }

    pub fn output(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            ToolOutcome::Output(value) => Some(value),
            ToolOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ToolError> {
        match &self.outcome {
            ToolOutcome::Output(_) => None,
            ToolOutcome::Error(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error() {
        let err = ToolError::not_found("src/missing.rs").with_details("No such file");

        assert_eq!(err.code, NOT_FOUND);
        assert!(err.message.contains("src/missing.rs"));
        assert_eq!(err.to_string(), "[NOT_FOUND] Not found: src/missing.rs (No such file)");
    }

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("ReadFile", json!({"content": "hi", "total": 2}));

        assert!(result.is_success());
        assert_eq!(result.output().unwrap()["total"], 2);
        assert!(result.error().is_none());
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure("ReadFile", ToolError::access_denied("outside"));

        assert!(!result.is_success());
        assert!(result.output().is_none());
        assert!(result.error().unwrap().is_access_denied());
    }

    #[test]
    fn test_result_serializes_exactly_one_side() {
        let ok = serde_json::to_value(ToolResult::success("GitStatus", json!({"modified": []})))
            .unwrap();
        assert_eq!(ok["tool_name"], "GitStatus");
        assert!(ok.get("output").is_some());
        assert!(ok.get("error").is_none());
        assert!(ok.get("metadata").is_none());

        let err = serde_json::to_value(
            ToolResult::failure("GitLog", ToolError::execution_failed("not a repo"))
                .with_duration(3),
        )
        .unwrap();
        assert_eq!(err["error"]["code"], EXECUTION_FAILED);
        assert!(err.get("output").is_none());
        assert_eq!(err["metadata"]["duration_ms"], 3);
    }

    #[test]
    fn test_from_payload() {
        #[derive(Serialize)]
        struct Payload {
            files: Vec<String>,
        }

        let result = ToolResult::from_payload(
            "ListFiles",
            &Payload {
                files: vec!["a".into()],
            },
        );
        assert_eq!(result.output().unwrap()["files"][0], "a");
    }
}
