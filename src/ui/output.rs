use crate::api::ToolDescriptor;
use crate::conversation::{Message, Role};
use crate::models::{ToolInfo, ToolKind, ToolStatus};
use crate::session::{NoticeLevel, Notification, Notifier};
use colored::*;

fn kind_icon(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::Weather => "☁",
        ToolKind::Calculator => "∑",
        ToolKind::ImageGenerator => "▣",
        ToolKind::DatabaseQuery => "⛁",
        ToolKind::FileOperations => "▤",
    }
}

fn status_icon(status: ToolStatus) -> &'static str {
    match status {
        ToolStatus::Pending => "◷",
        ToolStatus::Running => "↻",
        ToolStatus::Completed => "✔",
        ToolStatus::Failed => "✘",
    }
}

fn paint_status(status: ToolStatus, text: &str) -> ColoredString {
    match status {
        ToolStatus::Pending => text.dimmed(),
        ToolStatus::Running => text.yellow(),
        ToolStatus::Completed => text.green(),
        ToolStatus::Failed => text.red(),
    }
}

/// One-line header for a tool card, e.g. `∑ calculator ✔ completed`.
pub fn format_tool_header(tool: &ToolInfo) -> String {
    let status = format!("{} {}", status_icon(tool.status), tool.status);
    format!(
        "{} {} {}",
        kind_icon(tool.kind()).cyan(),
        tool.name.bold(),
        paint_status(tool.status, &status)
    )
}

/// Full tool card: the header, plus the result when completed or a failure
/// note when failed.
pub fn format_tool_card(tool: &ToolInfo, show_result: bool) -> String {
    let mut card = format_tool_header(tool);
    match tool.status {
        ToolStatus::Completed if show_result => {
            if let Some(result) = tool.result_text() {
                for line in result.lines() {
                    card.push('\n');
                    card.push_str(&format!("  │ {}", line).dimmed().to_string());
                }
            }
        }
        ToolStatus::Failed => {
            card.push('\n');
            card.push_str(&"  │ Tool execution failed".red().to_string());
        }
        _ => {}
    }
    card
}

/// Render a whole message for the `/history` transcript.
pub fn format_message(message: &Message, show_tool_results: bool) -> String {
    let label = match message.role {
        Role::User => "you".blue().bold(),
        Role::Assistant => "assistant".magenta().bold(),
    };
    let mut out = format!("{} {}", label, message.content);
    if message.is_streaming {
        out.push_str(&"▌".dimmed().to_string());
    }
    for tool in message.tools.iter() {
        out.push('\n');
        out.push_str(&format_tool_card(tool, show_tool_results));
    }
    out
}

pub fn display_tools(tools: &[ToolDescriptor]) {
    if tools.is_empty() {
        println!("{}", "The service reported no tools.".dimmed());
        return;
    }
    println!("{}", format!("Available tools: {}", tools.len()).cyan());
    for tool in tools {
        let icon = kind_icon(ToolKind::from_name(&tool.name));
        println!("{} {}", icon.cyan(), tool.name.bold());
        if !tool.description.is_empty() {
            println!("    {}", tool.description.dimmed());
        }
    }
}

/// Prints notifications to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NoticeLevel::Error => eprintln!("\n{}", notification.message.red()),
            NoticeLevel::Warning => eprintln!("\n{}", notification.message.yellow()),
        }
    }
}
