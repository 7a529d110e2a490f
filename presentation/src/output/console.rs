//! Console output for one-shot commands

use niagate_domain::tool::value_objects::ToolResult;
use serde::Serialize;
use serde_json::Value;

/// Formats command results for stdout
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Pretty JSON, falling back to compact debug output if encoding fails
    pub fn json<T: Serialize + std::fmt::Debug>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
    }

    pub fn format_tool_result(result: &ToolResult) -> String {
        Self::json(result)
    }

    pub fn format_tools(schemas: &[Value]) -> String {
        Self::json(&schemas)
    }

    /// One line per configuration layer, `[FOUND]` when the file exists.
    pub fn format_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a std::path::Path, bool)>,
    ) -> String {
        let mut output = String::from("Configuration sources (lowest to highest priority):\n");
        output.push_str("  [BUILT-IN] Default values\n");
        for (label, path, found) in sources {
            let mark = if found { "[FOUND]   " } else { "[        ]" };
            output.push_str(&format!("  {} {:<8} {}\n", mark, format!("{}:", label), path.display()));
        }
        output
    }

    pub fn format_env_overrides(active: &[&str]) -> String {
        if active.is_empty() {
            "Environment overrides: none\n".to_string()
        } else {
            format!("Environment overrides: {}\n", active.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use niagate_domain::ToolError;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_format_tool_result_is_json() {
        let result = ToolResult::failure("grep", ToolError::upstream("boom"));
        let text = ConsoleFormatter::format_tool_result(&result);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(parsed["success"], false);
    }

    #[test]
    fn test_format_sources_marks_found() {
        let text = ConsoleFormatter::format_sources([
            ("Global", Path::new("/home/u/.config/niagate/config.toml"), false),
            ("Project", Path::new("niagate.toml"), true),
        ]);
        assert!(text.contains("[FOUND]    Project: niagate.toml"));
        assert!(text.contains("[        ] Global:"));
    }

    #[test]
    fn test_format_tools() {
        let text = ConsoleFormatter::format_tools(&[json!({"name": "search"})]);
        assert!(text.contains("\"search\""));
    }
}
