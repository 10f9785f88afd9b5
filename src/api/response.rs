use crate::api::models::ToolDescriptor;
use crate::error::TransportError;
use serde_json::Value;

/// Normalise a `GET /tools` body into descriptors.
///
/// Accepts a bare array, an object with a `tools` array, or an object keyed
/// by tool name.
pub fn parse_tool_listing(body: Value) -> Result<Vec<ToolDescriptor>, TransportError> {
    match body {
        Value::Array(items) => items.into_iter().map(descriptor_from_value).collect(),
        Value::Object(mut map) => {
            if matches!(map.get("tools"), Some(Value::Array(_))) {
                let tools = map.remove("tools").unwrap_or_default();
                return parse_tool_listing(tools);
            }
            map.into_iter()
                .map(|(name, entry)| descriptor_from_entry(name, entry))
                .collect()
        }
        other => Err(TransportError::UnexpectedResponse(format!(
            "tool listing is neither an array nor an object: {}",
            other
        ))),
    }
}

fn descriptor_from_value(value: Value) -> Result<ToolDescriptor, TransportError> {
    serde_json::from_value(value)
        .map_err(|e| TransportError::UnexpectedResponse(format!("invalid tool descriptor: {}", e)))
}

fn descriptor_from_entry(name: String, entry: Value) -> Result<ToolDescriptor, TransportError> {
    match entry {
        Value::String(description) => Ok(ToolDescriptor {
            name,
            description,
            parameters: None,
        }),
        Value::Object(_) => {
            let mut descriptor = descriptor_from_value(entry)?;
            if descriptor.name.is_empty() {
                descriptor.name = name;
            }
            Ok(descriptor)
        }
        other => Err(TransportError::UnexpectedResponse(format!(
            "invalid descriptor for tool {}: {}",
            name, other
        ))),
    }
}
