use super::tool::ToolInfo;
use crate::error::MalformedEventError;
use serde::{Deserialize, Serialize};

/// One record of the streamed chat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireEvent", into = "WireEvent")]
pub struct StreamEvent {
    pub kind: EventKind,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Text delta for the assistant message.
    Text(String),
    ToolCall(Option<ToolInfo>),
    ToolResult(Option<ToolInfo>),
    /// Error reported by the service. Informational; the stream continues.
    Error(String),
    Done,
}

impl StreamEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: String::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(EventKind::Text(content.into()))
    }

    pub fn tool_call(tool: ToolInfo) -> Self {
        Self::new(EventKind::ToolCall(Some(tool)))
    }

    pub fn tool_result(tool: ToolInfo) -> Self {
        Self::new(EventKind::ToolResult(Some(tool)))
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(EventKind::Error(message.into()))
    }

    pub fn done() -> Self {
        Self::new(EventKind::Done)
    }

    /// Decode one line of the response body.
    pub fn parse_line(line: &str) -> Result<Self, MalformedEventError> {
        serde_json::from_str(line).map_err(|source| MalformedEventError {
            line: line.to_string(),
            source,
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::Done)
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            EventKind::Text(_) => "text",
            EventKind::ToolCall(_) => "tool_call",
            EventKind::ToolResult(_) => "tool_result",
            EventKind::Error(_) => "error",
            EventKind::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EventType {
    Text,
    ToolCall,
    ToolResult,
    Error,
    Done,
}

#[derive(Serialize, Deserialize)]
struct WireEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool: Option<ToolInfo>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<WireEvent> for StreamEvent {
    fn from(wire: WireEvent) -> Self {
        let content = wire.content.unwrap_or_default();
        let kind = match wire.event_type {
            EventType::Text => EventKind::Text(content),
            EventType::ToolCall => EventKind::ToolCall(wire.tool),
            EventType::ToolResult => EventKind::ToolResult(wire.tool),
            EventType::Error => EventKind::Error(content),
            EventType::Done => EventKind::Done,
        };
        StreamEvent {
            kind,
            timestamp: wire.timestamp.unwrap_or_default(),
        }
    }
}

impl From<StreamEvent> for WireEvent {
    fn from(event: StreamEvent) -> Self {
        let (event_type, content, tool) = match event.kind {
            EventKind::Text(content) => (EventType::Text, content, None),
            EventKind::ToolCall(tool) => (EventType::ToolCall, String::new(), tool),
            EventKind::ToolResult(tool) => (EventType::ToolResult, String::new(), tool),
            EventKind::Error(content) => (EventType::Error, content, None),
            EventKind::Done => (EventType::Done, String::new(), None),
        };
        WireEvent {
            event_type,
            content: Some(content),
            tool,
            timestamp: Some(event.timestamp),
        }
    }
}
