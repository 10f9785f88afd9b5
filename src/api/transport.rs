use crate::api::models::{StreamSummary, ToolDescriptor};
use crate::error::TransportError;
use crate::models::StreamEvent;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Source of streamed chat responses.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `message` and deliver every decoded event to `on_event`, in
    /// order, until the response ends.
    async fn stream_chat(
        &self,
        message: &str,
        cancel: &CancellationToken,
        on_event: &mut (dyn FnMut(StreamEvent) + Send),
    ) -> Result<StreamSummary, TransportError>;

    /// List the tools the service can run.
    async fn fetch_tools(&self) -> Result<Vec<ToolDescriptor>, TransportError>;
}
