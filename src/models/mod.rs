mod event;
mod tool;

pub use event::{EventKind, StreamEvent};
pub use tool::{ToolInfo, ToolKind, ToolStatus};
