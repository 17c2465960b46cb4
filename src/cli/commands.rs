//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load `.env` (or `--env-file`) into the process environment
//! 2. Install the tracing subscriber
//! 3. Load HTTP settings (file, then flags) and database settings (environment)
//! 4. Build the lazy connection pool; a bad connection string leaves it unavailable
//! 5. Check connectivity and verify the posts table, logging the outcome
//! 6. Bind the listener and serve

use std::path::Path;

use crate::db::{Database, DatabaseConfig};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{self, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            env_file,
            host,
            port,
        } => {
            load_env_file(env_file.as_deref())?;
            serve(config.as_deref(), host, port)
        }
    }
}

/// Load variables from a dotenv file without overriding the real environment.
///
/// Without an explicit path a missing `.env` is not an error. Returns true
/// if a file was read.
pub fn load_env_file(path: Option<&Path>) -> CliResult<bool> {
    match path {
        None => Ok(dotenvy::dotenv().is_ok()),
        Some(path) => dotenvy::from_path(path)
            .map(|()| true)
            .map_err(|e| CliError::config_error(format!("Failed to load {}: {}", path.display(), e))),
    }
}

/// Resolve HTTP settings: defaults, then the optional file, then flags
pub fn resolve_http_config(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<HttpServerConfig> {
    let mut config = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    Ok(config)
}

/// Start the HTTP server
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    observability::init_tracing();
    observability::log_event(Event::BootStart);

    let http_config = resolve_http_config(config_path, host, port)?;
    let db_config = DatabaseConfig::from_env();
    observability::log_event_with_detail(Event::ConfigLoaded, &db_config.redacted_url());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let db = Database::connect_lazy(&db_config);

        if db.check_connection().await {
            db.verify_schema().await;
        }

        HttpServer::new(http_config, db)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
