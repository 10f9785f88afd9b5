mod notify;

pub use notify::{NoticeLevel, Notification, Notifier, RecordingNotifier};

use crate::api::{ChatTransport, ToolDescriptor};
use crate::conversation::{apply_event, finalize, Conversation, Message};
use crate::error::{ChatError, Result};
use crate::models::{EventKind, StreamEvent};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const SEND_FAILED_NOTICE: &str = "Failed to send message. Please try again.";

/// Result of a turn that streamed to completion.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub conversation: Conversation,
    pub events: usize,
    pub malformed: usize,
}

impl TurnOutcome {
    /// The assistant message the turn produced.
    pub fn reply(&self) -> Option<&Message> {
        self.conversation.last().map(|m| m.as_ref())
    }
}

/// Owns the conversation and runs one turn at a time against a transport.
///
/// Every state change is published as a new [`Conversation`] snapshot on a
/// watch channel; presentation code subscribes with [`ChatSession::subscribe`].
pub struct ChatSession<T> {
    transport: T,
    notifier: Arc<dyn Notifier>,
    snapshots: watch::Sender<Conversation>,
    streaming: AtomicBool,
    cancel: Mutex<CancellationToken>,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier>) -> Self {
        let (snapshots, _) = watch::channel(Conversation::new());
        Self {
            transport,
            notifier,
            snapshots,
            streaming: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Conversation> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> Conversation {
        self.snapshots.borrow().clone()
    }

    /// True while a turn is in flight; new sends are refused meanwhile.
    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    /// Abort the turn in flight, if any. The turn is rolled back.
    pub fn cancel(&self) {
        self.cancel.lock().cancel();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch_tools(&self) -> Result<Vec<ToolDescriptor>> {
        Ok(self.transport.fetch_tools().await?)
    }

    /// Send one user message and stream the assistant's reply into the
    /// conversation.
    pub async fn send(&self, text: &str) -> Result<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        // The flag and the turn's token change together so `cancel()` never
        // lands on a stale token.
        let cancel = {
            let mut slot = self.cancel.lock();
            if self
                .streaming
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return Err(ChatError::TurnInProgress);
            }
            *slot = CancellationToken::new();
            slot.clone()
        };
        let _streaming = StreamingFlag(&self.streaming);

        let (mut state, turn) = self.snapshot().begin_turn(text);
        self.snapshots.send_replace(state.clone());
        debug!(message_id = %turn.assistant_message_id, "turn started");

        let result = self
            .transport
            .stream_chat(text, &cancel, &mut |event: StreamEvent| {
                if let EventKind::Error(message) = &event.kind {
                    if state.streaming_message().is_none() {
                        debug!("ignoring error event after the reply finished");
                        return;
                    }
                    self.notifier
                        .notify(Notification::error(format!("Error: {}", message)));
                }
                let next = apply_event(&state, &event);
                if !next.same_snapshot(&state) {
                    self.snapshots.send_replace(next.clone());
                }
                state = next;
            })
            .await;

        match result {
            Ok(summary) => {
                if state.streaming_message().is_some() {
                    warn!(
                        events = summary.events,
                        "response ended without a done event, finalizing reply"
                    );
                    state = finalize(&state);
                    self.snapshots.send_replace(state.clone());
                }
                if summary.malformed > 0 {
                    debug!(malformed = summary.malformed, "skipped malformed records");
                }

                Ok(TurnOutcome {
                    conversation: state,
                    events: summary.events,
                    malformed: summary.malformed,
                })
            }
            Err(err) => {
                warn!(error = %err, "turn failed, rolling back");
                self.snapshots.send_replace(state.rollback(&turn));
                self.notifier.notify(Notification::error(SEND_FAILED_NOTICE));
                Err(err.into())
            }
        }
    }
}

/// Clears the streaming flag however the turn ends.
struct StreamingFlag<'a>(&'a AtomicBool);

impl Drop for StreamingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
