pub const DEFAULT_API_ENDPOINT: &str = "https://intern-test-frontend-mbcr.onrender.com";

pub fn default_stream_timeout() -> u64 {
    30
}

pub fn default_connect_timeout() -> u64 {
    10
}

pub fn default_show_tool_results() -> bool {
    true
}
