use crate::api::models::{ChatRequest, StreamSummary, ToolDescriptor};
use crate::api::response::parse_tool_listing;
use crate::api::streaming::process_event_stream;
use crate::api::transport::ChatTransport;
use crate::config::Config;
use crate::error::TransportError;
use crate::models::StreamEvent;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// HTTP client for the chat service's `/chat` and `/tools` endpoints.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    stream_timeout: Duration,
}

impl ChatClient {
    pub fn new(base_url: &str, stream_timeout: Duration) -> Result<Self, TransportError> {
        Self::build(base_url, stream_timeout, None)
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::build(
            &config.api_endpoint,
            Duration::from_secs(config.stream_timeout),
            Some(Duration::from_secs(config.connect_timeout)),
        )
    }

    fn build(
        base_url: &str,
        stream_timeout: Duration,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidEndpoint(base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/x-ndjson, application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            stream_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    pub fn tools_url(&self) -> String {
        format!("{}/tools", self.base_url)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(TransportError::RequestFailed { status, message })
}

#[async_trait]
impl ChatTransport for ChatClient {
    async fn stream_chat(
        &self,
        message: &str,
        cancel: &CancellationToken,
        on_event: &mut (dyn FnMut(StreamEvent) + Send),
    ) -> Result<StreamSummary, TransportError> {
        debug!(url = %self.chat_url(), "sending chat message");

        let request = self.http.post(self.chat_url()).json(&ChatRequest { message });
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Aborted),
            response = timeout(self.stream_timeout, request.send()) => match response {
                Ok(response) => response?,
                Err(_) => return Err(TransportError::Timeout(self.stream_timeout)),
            },
        };
        debug!(status = %response.status(), "chat response");

        let response = ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Err(TransportError::NoBody);
        }

        process_event_stream(response.bytes_stream(), self.stream_timeout, cancel, on_event).await
    }

    async fn fetch_tools(&self) -> Result<Vec<ToolDescriptor>, TransportError> {
        let response = self
            .http
            .get(self.tools_url())
            .timeout(self.stream_timeout)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: serde_json::Value = response.json().await?;
        parse_tool_listing(body)
    }
}
