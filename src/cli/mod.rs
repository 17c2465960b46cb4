//! CLI module for posts-api
//!
//! Provides command-line interface for:
//! - serve: Boot the service and serve HTTP until the process exits

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_env_file, resolve_http_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
