//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async `Tool` and `ToolExecutorPort` traits are defined in the
//! application layer (ports).

use super::entities::{ToolCall, ToolDefinition, json_kind};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Rejects missing required parameters, unknown parameters and values whose
/// JSON type does not match the declared [`ParamType`](super::entities::ParamType).
/// An explicit `null` counts as omitted for optional parameters.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let present = call
                .arguments
                .get(&param.name)
                .is_some_and(|v| !v.is_null());
            if param.required && !present {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        // Sorted so the first reported problem is stable across runs
        let mut names: Vec<&String> = call.arguments.keys().collect();
        names.sort();

        for arg_name in names {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };

            let value = &call.arguments[arg_name];
            if value.is_null() {
                continue;
            }
            if !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' of tool '{}' must be {}, got {}",
                    arg_name,
                    definition.name,
                    param.param_type,
                    json_kind(value)
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, ToolParameter};
    use serde_json::json;

    fn read_file_definition() -> ToolDefinition {
        ToolDefinition::new("ReadFile", "Read a file")
            .with_parameter(ToolParameter::new("path", "File path", true).with_type(ParamType::Path))
            .with_parameter(
                ToolParameter::new("offset", "Byte offset", false).with_type(ParamType::Integer),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("ReadFile");
        let result = validator.validate(&call, &read_file_definition());
        assert!(result.unwrap_err().contains("Missing required parameter 'path'"));
    }

    #[test]
    fn test_validator_null_required_is_missing() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("ReadFile").with_arg("path", serde_json::Value::Null);
        assert!(validator.validate(&call, &read_file_definition()).is_err());
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("ReadFile")
            .with_arg("path", "a.txt")
            .with_arg("encoding", "utf-8");
        let result = validator.validate(&call, &read_file_definition());
        assert!(result.unwrap_err().contains("Unknown parameter 'encoding'"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("ReadFile")
            .with_arg("path", "a.txt")
            .with_arg("offset", "10");
        let err = validator
            .validate(&call, &read_file_definition())
            .unwrap_err();
        assert!(err.contains("must be integer, got string"));
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("ReadFile")
            .with_arg("path", "a.txt")
            .with_arg("offset", json!(-1));

        // Range checks belong to the tool, not the schema
        assert!(validator.validate(&call, &read_file_definition()).is_ok());

        let with_null = ToolCall::new("ReadFile")
            .with_arg("path", "a.txt")
            .with_arg("offset", serde_json::Value::Null);
        assert!(validator.validate(&with_null, &read_file_definition()).is_ok());
    }
}
