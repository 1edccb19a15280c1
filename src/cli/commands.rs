//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Configuration load (`./hubvault.json` if present, else defaults)
//! 2. Log level applied
//! 3. Registry created, configured hubs created
//! 4. SERVING loop: one request per stdin line, one response per stdout line
//!
//! A configuration or boot failure halts before any request is read.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use crate::api::ApiHandler;
use crate::hub::HubRegistry;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_json};

/// Configuration file picked up by `serve` when `--config` is omitted
pub const DEFAULT_CONFIG_PATH: &str = "./hubvault.json";

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(config.as_deref()),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Boot and serve requests from stdin until EOF
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    log_event(Event::BootStart);

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let config_path = config_path.or_else(|| default_path.exists().then_some(default_path));

    let config = match config_path {
        Some(path) => {
            let config = Config::load(path)?;
            let shown = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
            config
        }
        None => Config::default(),
    };

    let handler = boot(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = serve_lines(&handler, stdin.lock(), &mut stdout.lock())?;

    let served = served.to_string();
    log_event_with_fields(Event::ShutdownComplete, &[("requests", served.as_str())]);

    Ok(())
}

/// Apply configuration and build the request handler
pub fn boot(config: &Config) -> CliResult<ApiHandler> {
    Logger::set_min_severity(config.log_level);

    let registry = Arc::new(HubRegistry::with_policy(config.index_policy));
    for hub in &config.hubs {
        registry.create(hub.clone())?;
    }

    let hubs = registry.len().to_string();
    log_event_with_fields(
        Event::BootComplete,
        &[
            ("hubs", hubs.as_str()),
            ("index_policy", config.index_policy.as_str()),
        ],
    );

    Ok(ApiHandler::new(registry))
}

/// Answer every request line of `input` on `output`
///
/// Returns the number of requests served. A read failure is fatal.
pub fn serve_lines<R: BufRead, W: Write>(
    handler: &ApiHandler,
    input: R,
    output: &mut W,
) -> CliResult<usize> {
    let mut served = 0;

    for line in read_requests(input) {
        let line = line?;
        let response = handler.handle(&line);
        write_json(output, &response.to_json())?;
        served += 1;
    }

    Ok(served)
}

/// Validate a configuration file and print it with defaults applied
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let rendered = serde_json::to_string(&config)?;

    write_json(&mut io::stdout().lock(), &rendered)
}
