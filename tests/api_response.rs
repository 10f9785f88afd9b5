use pretty_assertions::assert_eq;
use serde_json::json;
use streamchat::api::response::parse_tool_listing;
use streamchat::api::ToolDescriptor;
use streamchat::error::TransportError;

fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
    tools.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn test_parse_bare_array() {
    let body = json!([
        {"name": "calculator", "description": "Evaluates arithmetic"},
        {"name": "weather", "description": "Current conditions", "parameters": {"city": "string"}}
    ]);

    let tools = parse_tool_listing(body).unwrap();
    assert_eq!(names(&tools), vec!["calculator", "weather"]);
    assert_eq!(tools[1].parameters, Some(json!({"city": "string"})));
    assert_eq!(tools[0].parameters, None);
}

#[test]
fn test_parse_wrapped_array() {
    let body = json!({"tools": [{"name": "file_manager", "description": "Reads files"}]});

    let tools = parse_tool_listing(body).unwrap();
    assert_eq!(
        tools,
        vec![ToolDescriptor {
            name: "file_manager".to_string(),
            description: "Reads files".to_string(),
            parameters: None,
        }]
    );
}

#[test]
fn test_parse_object_keyed_by_name() {
    let body = json!({
        "calculator": "Evaluates arithmetic",
        "database_query": {"description": "Runs SQL"}
    });

    let mut tools = parse_tool_listing(body).unwrap();
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(names(&tools), vec!["calculator", "database_query"]);
    assert_eq!(tools[0].description, "Evaluates arithmetic");
    assert_eq!(tools[1].description, "Runs SQL");
}

#[test]
fn test_explicit_name_wins_over_key() {
    let body = json!({"calc": {"name": "calculator", "description": "Evaluates arithmetic"}});
    let tools = parse_tool_listing(body).unwrap();
    assert_eq!(names(&tools), vec!["calculator"]);
}

#[test]
fn test_missing_description_defaults_to_empty() {
    let tools = parse_tool_listing(json!([{"name": "weather"}])).unwrap();
    assert_eq!(tools[0].description, "");
}

#[test]
fn test_empty_listing() {
    assert!(parse_tool_listing(json!([])).unwrap().is_empty());
    assert!(parse_tool_listing(json!({})).unwrap().is_empty());
}

#[test]
fn test_rejects_scalar_body() {
    let result = parse_tool_listing(json!("calculator"));
    assert!(matches!(result, Err(TransportError::UnexpectedResponse(_))));
}

#[test]
fn test_rejects_invalid_entry() {
    let result = parse_tool_listing(json!({"calculator": 42}));
    match result {
        Err(TransportError::UnexpectedResponse(message)) => {
            assert!(message.contains("calculator"));
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}
