use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Pending => "pending",
            ToolStatus::Running => "running",
            ToolStatus::Completed => "completed",
            ToolStatus::Failed => "failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, ToolStatus::Completed | ToolStatus::Failed)
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tool invocation as reported by the service. `id` is stable across the
/// call's lifecycle and is the merge key within an assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub id: String,
    pub name: String,
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl ToolInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: ToolStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            result: None,
        }
    }

    pub fn with_result(mut self, result: impl Into<Value>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn kind(&self) -> ToolKind {
        ToolKind::from_name(&self.name)
    }

    /// Result rendered for display: strings as-is, structured values as
    /// pretty-printed JSON.
    pub fn result_text(&self) -> Option<String> {
        match self.result.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// Display category of a tool, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Weather,
    Calculator,
    ImageGenerator,
    DatabaseQuery,
    FileOperations,
}

impl ToolKind {
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("weather") {
            ToolKind::Weather
        } else if lower.contains("calculator") || lower.contains("calc") {
            ToolKind::Calculator
        } else if lower.contains("image") {
            ToolKind::ImageGenerator
        } else if lower.contains("database") || lower.contains("db") {
            ToolKind::DatabaseQuery
        } else {
            ToolKind::FileOperations
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Weather => "weather",
            ToolKind::Calculator => "calculator",
            ToolKind::ImageGenerator => "image_generator",
            ToolKind::DatabaseQuery => "database_query",
            ToolKind::FileOperations => "file_operations",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_info_without_result() {
        let tool: ToolInfo =
            serde_json::from_value(json!({"id": "1", "name": "weather", "status": "pending"}))
                .unwrap();
        assert_eq!(tool, ToolInfo::new("1", "weather", ToolStatus::Pending));
    }

    #[test]
    fn test_tool_info_structured_result() {
        let tool: ToolInfo = serde_json::from_value(json!({
            "id": "7",
            "name": "database_query",
            "status": "completed",
            "result": {"rows": [{"id": 1}]}
        }))
        .unwrap();
        assert_eq!(tool.result, Some(json!({"rows": [{"id": 1}]})));
        assert!(tool.result_text().unwrap().contains("\"rows\""));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let parsed = serde_json::from_value::<ToolInfo>(
            json!({"id": "1", "name": "calc", "status": "exploded"}),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_text_for_string() {
        let tool = ToolInfo::new("1", "calculator", ToolStatus::Completed).with_result("4");
        assert_eq!(tool.result_text(), Some("4".to_string()));
    }

    #[test]
    fn test_tool_kind_from_name() {
        assert_eq!(ToolKind::from_name("get_weather"), ToolKind::Weather);
        assert_eq!(ToolKind::from_name("Calc"), ToolKind::Calculator);
        assert_eq!(ToolKind::from_name("image_generator"), ToolKind::ImageGenerator);
        assert_eq!(ToolKind::from_name("user_db"), ToolKind::DatabaseQuery);
        assert_eq!(ToolKind::from_name("read_file"), ToolKind::FileOperations);
        assert_eq!(ToolKind::from_name("mystery"), ToolKind::FileOperations);
    }

    #[test]
    fn test_finished_statuses() {
        assert!(!ToolStatus::Pending.is_finished());
        assert!(!ToolStatus::Running.is_finished());
        assert!(ToolStatus::Completed.is_finished());
        assert!(ToolStatus::Failed.is_finished());
    }
}
