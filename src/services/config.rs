use crate::cli::Cli;
use serde::Deserialize;
use std::path::PathBuf;

pub const TOKEN_ENV: &str = "NOTESWEEP_TOKEN";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no collection id configured; pass --collection or set `collection` in config.toml")]
    MissingCollection,
    #[error("NOTESWEEP_TOKEN is not set")]
    MissingToken,
    #[error("invalid config file: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_url: String,
    pub collection: Option<String>,
    pub timeout_ms: u64,
    pub title_property: String,
    pub body_property: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.noteservice.dev/v1".to_string(),
            collection: None,
            timeout_ms: 10_000,
            title_property: "Name".to_string(),
            body_property: "Body".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }
}

fn config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/notesweep/config.toml"))
}

pub fn load_config() -> anyhow::Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Config::from_toml_str(&raw)
}

pub fn resolve_collection(cli: &Cli, config: &Config) -> anyhow::Result<String> {
    cli.collection
        .clone()
        .or_else(|| config.collection.clone())
        .ok_or_else(|| ConfigError::MissingCollection.into())
}

pub fn require_token() -> anyhow::Result<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ConfigError::MissingToken.into()),
    }
}
