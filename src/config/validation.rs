use regex::Regex;
use std::sync::OnceLock;

fn env_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env reference pattern"))
}

/// Expand `${VAR_NAME}` references using `lookup`. Unknown variables are left
/// as written.
pub fn expand_env_var_in_string(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    env_reference()
        .replace_all(value, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Reduce an endpoint to the service base URL: no trailing slash and no
/// trailing `/chat`.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/chat")
        .unwrap_or(trimmed)
        .to_string()
}

pub fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(format!(
            "API endpoint must start with http:// or https:// (got {})",
            endpoint
        ))
    }
}
