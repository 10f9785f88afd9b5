mod message;
mod reducer;
mod tools;

pub use message::{Message, Role};
pub use reducer::{apply_event, finalize};
pub use tools::{merge_tool, MergeOutcome, ToolSet};

use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Immutable snapshot of the conversation.
///
/// Messages are shared between snapshots; producing a new snapshot only
/// allocates the messages that changed, so consumers can detect an update
/// with [`Arc::ptr_eq`] on the trailing message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Arc<Message>>,
}

/// Bookkeeping for one in-flight turn, used to roll it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    base_len: usize,
    pub user_message_id: String,
    pub assistant_message_id: String,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Arc<Message>] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Arc<Message>> {
        self.messages.last()
    }

    /// The trailing message, if it is an assistant message still receiving
    /// events.
    pub fn streaming_message(&self) -> Option<&Arc<Message>> {
        self.messages
            .last()
            .filter(|m| m.is_assistant() && m.is_streaming)
    }

    /// Append the user's message and an empty streaming assistant reply.
    pub fn begin_turn(&self, text: &str) -> (Conversation, Turn) {
        let user = Message::user(text);
        let assistant = Message::assistant_placeholder();
        let turn = Turn {
            base_len: self.messages.len(),
            user_message_id: user.id.clone(),
            assistant_message_id: assistant.id.clone(),
        };

        let mut messages = self.messages.clone();
        messages.push(Arc::new(user));
        messages.push(Arc::new(assistant));
        (Conversation { messages }, turn)
    }

    /// Drop every message the turn added, restoring the pre-send state.
    pub fn rollback(&self, turn: &Turn) -> Conversation {
        let keep = turn.base_len.min(self.messages.len());
        Conversation {
            messages: self.messages[..keep].to_vec(),
        }
    }

    /// Whether both snapshots hold the very same message allocations.
    pub fn same_snapshot(&self, other: &Conversation) -> bool {
        self.messages.len() == other.messages.len()
            && self
                .messages
                .iter()
                .zip(&other.messages)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }

    pub(crate) fn with_last_replaced(&self, message: Message) -> Conversation {
        let mut messages = self.messages.clone();
        if let Some(last) = messages.last_mut() {
            *last = Arc::new(message);
        }
        Conversation { messages }
    }
}

impl Serialize for Conversation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.messages.iter().map(|m| m.as_ref()))
    }
}
