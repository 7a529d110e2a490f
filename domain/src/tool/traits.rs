//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

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
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        // Sorted so the first reported problem is deterministic
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

            if !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be {}, got {}",
                    param.name,
                    definition.name,
                    param.param_type,
                    json_kind(value)
                ));
            }

            if !param.allowed_values.is_empty()
                && let Some(text) = value.as_str()
                && !param.allowed_values.iter().any(|v| v == text)
            {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be one of: {} (got '{}')",
                    param.name,
                    definition.name,
                    param.allowed_values.join(", "),
                    text
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

    fn grep_like() -> ToolDefinition {
        ToolDefinition::new("grep", "Pattern search")
            .with_parameter(ToolParameter::new("pattern", "Regex", true))
            .with_parameter(
                ToolParameter::new("max_total_matches", "Cap", false)
                    .with_type(ParamType::Integer)
                    .with_range(1, 1000),
            )
            .with_parameter(
                ToolParameter::new("output_mode", "Mode", false)
                    .with_allowed_values(["content", "files_with_matches", "count"]),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let result = DefaultToolValidator.validate(&ToolCall::new("grep"), &grep_like());
        assert!(result.unwrap_err().contains("Missing required parameter 'pattern'"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let call = ToolCall::new("grep")
            .with_arg("pattern", "foo")
            .with_arg("regex", "bar");
        let result = DefaultToolValidator.validate(&call, &grep_like());
        assert!(result.unwrap_err().contains("Unknown parameter 'regex'"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let call = ToolCall::new("grep")
            .with_arg("pattern", "foo")
            .with_arg("max_total_matches", "lots");
        let err = DefaultToolValidator.validate(&call, &grep_like()).unwrap_err();
        assert!(err.contains("must be integer, got string"));
    }

    #[test]
    fn test_validator_enumeration() {
        let call = ToolCall::new("grep")
            .with_arg("pattern", "foo")
            .with_arg("output_mode", "lines");
        let err = DefaultToolValidator.validate(&call, &grep_like()).unwrap_err();
        assert!(err.contains("content, files_with_matches, count"));
    }

    #[test]
    fn test_out_of_range_is_not_a_validation_error() {
        let call = ToolCall::new("grep")
            .with_arg("pattern", "foo")
            .with_arg("max_total_matches", 5000);
        assert!(DefaultToolValidator.validate(&call, &grep_like()).is_ok());
    }
}
