use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    /// Print completed tool results under each tool card.
    #[serde(default)]
    pub show_tool_results: Option<bool>,
}
