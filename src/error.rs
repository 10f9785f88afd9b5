use std::time::Duration;
use thiserror::Error;

/// Failures of a single streaming request. Any of these aborts the turn.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("response has no readable body")]
    NoBody,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("connection timeout - no data received for {0:?}")]
    Timeout(Duration),

    #[error("request aborted")]
    Aborted,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// One event record that could not be decoded. Recovered locally by the
/// line decoder and never surfaced to the user.
#[derive(Debug, Error)]
#[error("malformed event record {line:?}: {source}")]
pub struct MalformedEventError {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("message is empty")]
    EmptyMessage,

    #[error("a response is still streaming")]
    TurnInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ChatError {
    /// Whether the error came from the network side of a turn, as opposed to
    /// local input or setup problems.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_))
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Config(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display() {
        let err = TransportError::RequestFailed {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (status 503): unavailable");
    }

    #[test]
    fn test_transport_error_is_transparent_in_chat_error() {
        let err: ChatError = TransportError::NoBody.into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "response has no readable body");
    }

    #[test]
    fn test_local_errors_are_not_transport() {
        assert!(!ChatError::EmptyMessage.is_transport());
        assert!(!ChatError::TurnInProgress.is_transport());
    }

    #[test]
    fn test_anyhow_becomes_config_error() {
        let err: ChatError = anyhow::anyhow!("bad file").context("loading").into();
        match err {
            ChatError::Config(msg) => assert_eq!(msg, "loading: bad file"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_event_keeps_line() {
        let source = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err = MalformedEventError {
            line: "{bad".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("malformed event record \"{bad\""));
    }
}
