use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "chat")]
#[command(about = "Streaming chat client for a tool-using assistant service", long_about = None)]
pub struct Args {
    #[arg(long = "list-tools", help = "List the tools the service can run and exit")]
    pub list_tools: bool,

    #[arg(
        long = "api-endpoint",
        help = "Service base URL (e.g., http://localhost:8000)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(
        long = "stream-timeout",
        help = "Seconds to wait for the next chunk of a streamed response"
    )]
    pub stream_timeout: Option<u64>,

    #[arg(short = 'v', long = "verbose", help = "Log transport and reducer activity")]
    pub verbose: bool,

    #[arg(long = "json", help = "Print the final conversation as JSON")]
    pub json: bool,

    #[arg(long = "hide-tool-results", help = "Do not print tool results")]
    pub hide_tool_results: bool,

    #[arg(
        long = "config-init",
        help = "Write an example config file to ~/.config/streamchat"
    )]
    pub config_init: bool,

    #[arg(help = "Message to send; starts an interactive session when omitted")]
    pub message: Vec<String>,
}

impl Args {
    /// The positional words joined into one message, if any were given.
    pub fn message_text(&self) -> Option<String> {
        let text = self.message.join(" ");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_words_join() {
        let args = Args::parse_from(["chat", "Calculate", "2+2"]);
        assert_eq!(args.message_text(), Some("Calculate 2+2".to_string()));
    }

    #[test]
    fn test_no_message_means_interactive() {
        let args = Args::parse_from(["chat", "--verbose"]);
        assert!(args.verbose);
        assert_eq!(args.message_text(), None);
    }

    #[test]
    fn test_endpoint_and_timeout_flags() {
        let args = Args::parse_from([
            "chat",
            "--api-endpoint",
            "http://localhost:9000",
            "--stream-timeout",
            "5",
            "hi",
        ]);
        assert_eq!(args.api_endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(args.stream_timeout, Some(5));
    }
}
