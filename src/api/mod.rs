pub mod client;
pub mod models;
pub mod response;
pub mod streaming;
pub mod transport;

pub use client::ChatClient;
pub use models::{ChatRequest, StreamSummary, ToolDescriptor};
pub use streaming::{process_event_stream, LineDecoder};
pub use transport::ChatTransport;
