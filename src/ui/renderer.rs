use crate::conversation::{Conversation, Message};
use crate::models::ToolStatus;
use crate::ui::output::format_tool_card;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns successive conversation snapshots into incremental terminal output
/// for the assistant reply being streamed.
///
/// Only what changed since the previous snapshot is emitted: new text, and a
/// tool card whenever a tool first appears or changes status.
#[derive(Debug, Default)]
pub struct StreamRenderer {
    show_tool_results: bool,
    last_seen: Option<Arc<Message>>,
    printed_len: usize,
    tool_states: HashMap<String, ToolStatus>,
    at_line_start: bool,
    finished: bool,
}

impl StreamRenderer {
    pub fn new(show_tool_results: bool) -> Self {
        Self {
            show_tool_results,
            at_line_start: true,
            ..Self::default()
        }
    }

    /// Mark the current tail as already printed. Called before a turn starts
    /// so a rollback to the previous reply does not print it again.
    pub fn catch_up(&mut self, conversation: &Conversation) {
        self.render(conversation);
    }

    /// Output produced by `conversation` relative to the last snapshot seen.
    pub fn render(&mut self, conversation: &Conversation) -> String {
        let Some(message) = conversation.last().filter(|m| m.is_assistant()) else {
            return String::new();
        };
        if let Some(previous) = &self.last_seen {
            if Arc::ptr_eq(previous, message) {
                return String::new();
            }
            if previous.id != message.id {
                self.reset();
            }
        }
        self.last_seen = Some(Arc::clone(message));

        let mut out = String::new();

        match message.content.get(self.printed_len..) {
            Some(delta) if !delta.is_empty() => {
                out.push_str(delta);
                self.printed_len = message.content.len();
                self.at_line_start = delta.ends_with('\n');
            }
            _ => {}
        }

        for tool in message.tools.iter() {
            if self.tool_states.get(&tool.id) == Some(&tool.status) {
                continue;
            }
            self.tool_states.insert(tool.id.clone(), tool.status);
            if !self.at_line_start {
                out.push('\n');
            }
            out.push_str(&format_tool_card(tool, self.show_tool_results));
            out.push('\n');
            self.at_line_start = true;
        }

        if !message.is_streaming && !self.finished {
            self.finished = true;
            if !self.at_line_start {
                out.push('\n');
                self.at_line_start = true;
            }
        }

        out
    }

    fn reset(&mut self) {
        self.printed_len = 0;
        self.tool_states.clear();
        self.at_line_start = true;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::apply_event;
    use crate::models::{StreamEvent, ToolInfo};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_emits_only_new_text() {
        plain();
        let mut renderer = StreamRenderer::new(true);
        let (state, _) = Conversation::new().begin_turn("hi");
        assert_eq!(renderer.render(&state), "");

        let state = apply_event(&state, &StreamEvent::text("Hel"));
        assert_eq!(renderer.render(&state), "Hel");
        assert_eq!(renderer.render(&state), "");

        let state = apply_event(&state, &StreamEvent::text("lo"));
        assert_eq!(renderer.render(&state), "lo");

        let state = apply_event(&state, &StreamEvent::done());
        assert_eq!(renderer.render(&state), "\n");
    }

    #[test]
    fn test_tool_card_on_each_status_change() {
        plain();
        let mut renderer = StreamRenderer::new(true);
        let (state, _) = Conversation::new().begin_turn("Calculate 2+2");

        let state = apply_event(
            &state,
            &StreamEvent::tool_call(ToolInfo::new("1", "calculator", ToolStatus::Running)),
        );
        assert_eq!(renderer.render(&state), "∑ calculator ↻ running\n");

        let state = apply_event(&state, &StreamEvent::text("The answer is "));
        assert_eq!(renderer.render(&state), "The answer is ");

        let state = apply_event(
            &state,
            &StreamEvent::tool_result(
                ToolInfo::new("1", "calculator", ToolStatus::Completed).with_result("4"),
            ),
        );
        assert_eq!(
            renderer.render(&state),
            "\n∑ calculator ✔ completed\n  │ 4\n"
        );

        let state = apply_event(&state, &StreamEvent::text("4."));
        assert_eq!(renderer.render(&state), "4.");
        let state = apply_event(&state, &StreamEvent::done());
        assert_eq!(renderer.render(&state), "\n");
    }

    #[test]
    fn test_new_turn_resets_progress() {
        plain();
        let mut renderer = StreamRenderer::new(false);
        let (state, _) = Conversation::new().begin_turn("one");
        let state = apply_event(&state, &StreamEvent::text("first"));
        let state = apply_event(&state, &StreamEvent::done());
        renderer.render(&state);

        let (state, _) = state.begin_turn("two");
        let state = apply_event(&state, &StreamEvent::text("second"));
        assert_eq!(renderer.render(&state), "second");
    }

    #[test]
    fn test_rollback_to_previous_reply_renders_nothing() {
        plain();
        let (state, _) = Conversation::new().begin_turn("one");
        let state = apply_event(&state, &StreamEvent::text("first answer"));
        let settled = apply_event(&state, &StreamEvent::done());

        let mut renderer = StreamRenderer::new(true);
        renderer.catch_up(&settled);

        let (state, turn) = settled.begin_turn("two");
        let state = apply_event(&state, &StreamEvent::text("part"));
        assert_eq!(renderer.render(&state), "part");

        let rolled_back = state.rollback(&turn);
        assert_eq!(renderer.render(&rolled_back), "");
        assert_eq!(renderer.render(&rolled_back), "");
    }

    #[test]
    fn test_turn_first_seen_finished_still_renders() {
        plain();
        let (state, _) = Conversation::new().begin_turn("one");
        let settled = apply_event(&state, &StreamEvent::done());
        let mut renderer = StreamRenderer::new(true);
        renderer.catch_up(&settled);

        let (state, _) = settled.begin_turn("two");
        let state = apply_event(&state, &StreamEvent::text("whole reply"));
        let state = apply_event(&state, &StreamEvent::done());
        assert_eq!(renderer.render(&state), "whole reply\n");
    }

    #[test]
    fn test_user_tail_renders_nothing() {
        let mut renderer = StreamRenderer::new(true);
        let (state, turn) = Conversation::new().begin_turn("hello");
        let rolled_back = state.rollback(&turn);
        assert_eq!(renderer.render(&rolled_back), "");
    }
}
