use super::Conversation;
use crate::models::{EventKind, StreamEvent};
use tracing::debug;

/// Fold one stream event into the conversation.
///
/// Only the trailing streaming assistant message is ever touched. Events that
/// change it yield a snapshot whose last message is a fresh allocation;
/// events that change nothing return the input snapshot as-is. Events that
/// arrive when no assistant message is streaming are ignored.
pub fn apply_event(state: &Conversation, event: &StreamEvent) -> Conversation {
    let Some(current) = state.streaming_message() else {
        debug!(
            event_type = event.type_name(),
            "ignoring event with no streaming assistant message"
        );
        return state.clone();
    };

    match &event.kind {
        EventKind::Text(delta) => {
            let mut next = current.as_ref().clone();
            next.content.push_str(delta);
            state.with_last_replaced(next)
        }
        EventKind::ToolCall(tool) | EventKind::ToolResult(tool) => match tool {
            Some(tool) => {
                let mut next = current.as_ref().clone();
                let outcome = next.tools.merge(tool.clone());
                debug!(
                    tool_id = %tool.id,
                    tool = %tool.name,
                    status = %tool.status,
                    ?outcome,
                    "merged tool update"
                );
                state.with_last_replaced(next)
            }
            None => {
                debug!(
                    event_type = event.type_name(),
                    "tool event without tool payload"
                );
                state.clone()
            }
        },
        // Surfaced by the session as a notification; message state is untouched.
        EventKind::Error(_) => state.clone(),
        EventKind::Done => {
            let mut next = current.as_ref().clone();
            next.is_streaming = false;
            state.with_last_replaced(next)
        }
    }
}

/// Close the streaming assistant message as if `done` had arrived.
pub fn finalize(state: &Conversation) -> Conversation {
    apply_event(state, &StreamEvent::done())
}
