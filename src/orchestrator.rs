use crate::api::{ChatClient, ChatTransport};
use crate::cli::Args;
use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::session::{ChatSession, TurnOutcome};
use crate::ui::{display_tools, format_message, StreamRenderer, TerminalNotifier};
use colored::*;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub struct OrchestratorContext {
    pub config: Config,
    pub args: Args,
}

pub async fn run(context: OrchestratorContext) -> Result<()> {
    let client = ChatClient::from_config(&context.config)?;
    let session = ChatSession::new(client, Arc::new(TerminalNotifier));

    if context.config.verbose {
        eprintln!(
            "{}",
            format!("[chat] Service: {}", context.config.api_endpoint).dimmed()
        );
    }

    if context.args.list_tools {
        let tools = session.fetch_tools().await?;
        display_tools(&tools);
        return Ok(());
    }

    let result = match context.args.message_text() {
        Some(text) => run_turn(&session, &text, context.config.show_tool_results)
            .await
            .map(|_| ()),
        None => run_interactive(&session, &context.config).await,
    };

    if context.args.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    }

    result
}

fn emit(output: &str) -> io::Result<()> {
    if !output.is_empty() {
        print!("{}", output);
        io::stdout().flush()?;
    }
    Ok(())
}

/// Send one message and render the reply as it streams. Ctrl-C aborts the
/// turn.
pub async fn run_turn<T: ChatTransport>(
    session: &ChatSession<T>,
    text: &str,
    show_tool_results: bool,
) -> Result<TurnOutcome> {
    let mut snapshots = session.subscribe();
    let mut renderer = StreamRenderer::new(show_tool_results);
    renderer.catch_up(&snapshots.borrow_and_update());

    let send = session.send(text);
    tokio::pin!(send);
    let mut interrupted = false;

    let result = loop {
        tokio::select! {
            result = &mut send => break result,
            Ok(()) = snapshots.changed() => {
                let snapshot = snapshots.borrow_and_update().clone();
                emit(&renderer.render(&snapshot))?;
            }
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                interrupted = true;
                session.cancel();
            }
        }
    };

    emit(&renderer.render(&session.snapshot()))?;
    result
}

pub async fn run_interactive<T: ChatTransport>(
    session: &ChatSession<T>,
    config: &Config,
) -> Result<()> {
    println!(
        "{}",
        "Type a message and press Enter. /tools lists tools, /history shows the conversation, /quit exits."
            .dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/tools" => match session.fetch_tools().await {
                Ok(tools) => display_tools(&tools),
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            "/history" => {
                for message in session.snapshot().messages() {
                    println!("{}", format_message(message, config.show_tool_results));
                }
            }
            text => {
                if let Err(e) = run_turn(session, text, config.show_tool_results).await {
                    report_turn_error(&e, config.verbose);
                }
            }
        }
    }

    Ok(())
}

fn report_turn_error(err: &ChatError, verbose: bool) {
    match err {
        // The session has already notified the user.
        ChatError::Transport(_) if !verbose => {}
        ChatError::Transport(e) => eprintln!("{}", format!("[chat] {}", e).dimmed()),
        other => eprintln!("{} {}", "Error:".red(), other),
    }
}
