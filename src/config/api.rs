use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Seconds to wait for the next chunk of a streamed response.
    #[serde(default)]
    pub stream_timeout: Option<u64>,
    #[serde(default)]
    pub connect_timeout: Option<u64>,
}
