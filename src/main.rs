use clap::Parser;
use std::io::Write;

mod cli;
mod commands;
mod domain;
mod services;
mod store;

use cli::Cli;
use services::config::{load_config, require_token, resolve_collection, ConfigError};
use store::{HttpStore, StoreError};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        report_fatal(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<commands::run::RunOutcome> {
    let config = load_config()?;
    let collection = resolve_collection(cli, &config)?;
    let token = require_token()?;
    let store = HttpStore::new(&config.api_url, &token, config.timeout_ms)?;
    commands::execute(cli, &config, &collection, &store, &mut stdin_confirm)
}

/// Default confirmation capability: prompt on stderr, read one line from
/// stdin. Anything but an explicit yes declines, including a failed read.
fn stdin_confirm(prompt: &str) -> bool {
    eprint!("{}", prompt);
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return match store_err {
            StoreError::RemoteUnavailable(_) => "REMOTE_UNAVAILABLE",
            StoreError::RetirementFailed { .. } => "RETIREMENT_FAILED",
        };
    }
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        return match config_err {
            ConfigError::MissingCollection => "MISSING_COLLECTION",
            ConfigError::MissingToken => "MISSING_TOKEN",
            ConfigError::Invalid(_) => "CONFIG",
        };
    }
    "INTERNAL"
}

fn report_fatal(cli: &Cli, err: &anyhow::Error) {
    if cli.json {
        let envelope = serde_json::json!({
            "ok": false,
            "error": { "code": error_code(err), "message": err.to_string() }
        });
        println!("{:#}", envelope);
    } else {
        eprintln!("error: {}", err);
    }
}
