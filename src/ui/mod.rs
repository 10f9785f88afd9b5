pub mod output;
pub mod renderer;

pub use output::{display_tools, format_message, format_tool_card, TerminalNotifier};
pub use renderer::StreamRenderer;
