mod api;
mod defaults;
mod display;
mod validation;

use crate::cli::Args;
use crate::error::{ChatError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::ApiConfig;
pub use defaults::DEFAULT_API_ENDPOINT;
pub use display::DisplayConfig;
pub use validation::{expand_env_var_in_string, normalize_endpoint, validate_endpoint};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Service base URL; `/chat` and `/tools` are joined onto it.
    pub api_endpoint: String,
    pub stream_timeout: u64,
    pub connect_timeout: u64,
    pub verbose: bool,
    pub show_tool_results: bool,
}

/// On-disk configuration, YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load()?;
        Self::resolve(args, |name| env::var(name).ok(), file_config)
    }

    /// Layer the sources: CLI args > environment > config file > defaults.
    pub fn resolve(
        args: &Args,
        env_lookup: impl Fn(&str) -> Option<String>,
        file_config: FileConfig,
    ) -> Result<Self> {
        let raw_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env_lookup("CHAT_API_ENDPOINT"))
            .or(file_config.api.endpoint)
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());
        let api_endpoint =
            normalize_endpoint(&expand_env_var_in_string(&raw_endpoint, &env_lookup));
        validate_endpoint(&api_endpoint).map_err(ChatError::Config)?;

        let stream_timeout = args
            .stream_timeout
            .or_else(|| env_lookup("CHAT_STREAM_TIMEOUT").and_then(|s| s.parse::<u64>().ok()))
            .or(file_config.api.stream_timeout)
            .unwrap_or_else(defaults::default_stream_timeout);
        if stream_timeout == 0 {
            return Err(ChatError::Config(
                "stream timeout must be at least one second".to_string(),
            ));
        }

        let connect_timeout = file_config
            .api
            .connect_timeout
            .unwrap_or_else(defaults::default_connect_timeout);

        let verbose = args.verbose
            || env_lookup("CHAT_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file_config.display.verbose)
                .unwrap_or(false);

        let show_tool_results = !args.hide_tool_results
            && file_config
                .display
                .show_tool_results
                .unwrap_or_else(defaults::default_show_tool_results);

        Ok(Config {
            api_endpoint,
            stream_timeout,
            connect_timeout,
            verbose,
            show_tool_results,
        })
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Ok(Self::load_from(&path)?);
            }
        }
        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".streamchat.yaml"),
            PathBuf::from(".streamchat.yml"),
            PathBuf::from(".streamchat.json"),
        ];

        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("streamchat.yaml"));
            paths.push(dir.join("streamchat.yml"));
            paths.push(dir.join("streamchat.json"));
        }

        paths
    }

    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("streamchat"))
    }

    pub fn example() -> Self {
        FileConfig {
            api: ApiConfig {
                endpoint: Some(DEFAULT_API_ENDPOINT.to_string()),
                stream_timeout: Some(defaults::default_stream_timeout()),
                connect_timeout: Some(defaults::default_connect_timeout()),
            },
            display: DisplayConfig {
                verbose: Some(false),
                show_tool_results: Some(defaults::default_show_tool_results()),
            },
        }
    }

    /// Write the example config into `dir`, refusing to overwrite.
    pub fn init_in(dir: &Path) -> Result<PathBuf> {
        let path = dir.join("streamchat.yaml");
        if path.exists() {
            return Err(ChatError::Config(format!(
                "config file already exists: {}",
                path.display()
            )));
        }
        fs::create_dir_all(dir)?;
        fs::write(&path, serde_yaml::to_string(&Self::example())?)?;
        Ok(path)
    }
}
