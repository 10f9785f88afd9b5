use crate::api::models::StreamSummary;
use crate::error::TransportError;
use crate::models::StreamEvent;
use futures::{Stream, StreamExt};
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Splits a byte stream into newline-delimited event records.
///
/// Bytes are held across chunks until a newline arrives, so a record split
/// between two network chunks (even inside a UTF-8 sequence) is decoded
/// whole.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
    malformed: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the events completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(event) = self.decode_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Decode whatever is left once the stream has ended.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let rest = std::mem::take(&mut self.pending);
        self.decode_line(&rest).into_iter().collect()
    }

    pub fn malformed(&self) -> usize {
        self.malformed
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<StreamEvent> {
        let text = String::from_utf8_lossy(raw);
        let line = text.trim();
        if line.is_empty() {
            return None;
        }

        match StreamEvent::parse_line(line) {
            Ok(event) => Some(event),
            Err(err) => {
                self.malformed += 1;
                warn!(line = %err.line, error = %err.source, "skipping malformed event record");
                None
            }
        }
    }
}

/// Drive a response body to completion, handing each decoded event to
/// `on_event` in arrival order.
///
/// Every read is bounded by `read_timeout`. Cancelling `cancel` aborts the
/// read in flight.
pub async fn process_event_stream<S, B, E, F>(
    stream: S,
    read_timeout: Duration,
    cancel: &CancellationToken,
    mut on_event: F,
) -> Result<StreamSummary, TransportError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<TransportError>,
    F: FnMut(StreamEvent),
{
    let mut stream = std::pin::pin!(stream);
    let mut decoder = LineDecoder::new();
    let mut summary = StreamSummary::default();

    let mut deliver = |event: StreamEvent, summary: &mut StreamSummary| {
        debug!(event_type = event.type_name(), "stream event");
        summary.events += 1;
        summary.saw_done |= event.is_terminal();
        on_event(event);
    };

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Aborted),
            next = timeout(read_timeout, stream.next()) => next,
        };

        match next {
            Ok(Some(chunk)) => {
                let chunk = chunk.map_err(Into::into)?;
                for event in decoder.push(chunk.as_ref()) {
                    deliver(event, &mut summary);
                }
            }
            Ok(None) => break,
            Err(_) => return Err(TransportError::Timeout(read_timeout)),
        }
    }

    for event in decoder.finish() {
        deliver(event, &mut summary);
    }
    summary.malformed = decoder.malformed();

    Ok(summary)
}
