use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

use streamchat::cli::Args;
use streamchat::config::{Config, FileConfig};
use streamchat::orchestrator::{self, OrchestratorContext};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "streamchat=debug"
    } else {
        "streamchat=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.config_init {
        let Some(dir) = FileConfig::user_config_dir() else {
            eprintln!("{}", "Error: could not determine home directory".red());
            process::exit(1);
        };
        match FileConfig::init_in(&dir) {
            Ok(path) => {
                println!("{}", format!("Config file created at: {}", path.display()).green());
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                process::exit(1);
            }
        }
        return;
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_tracing(config.verbose);

    if let Err(e) = orchestrator::run(OrchestratorContext { config, args }).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}
