//! CLI argument definitions using clap
//!
//! Commands:
//! - posts-api serve [--config <path>] [--env-file <path>] [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// posts-api - CRUD HTTP service over a relational posts table
#[derive(Parser, Debug)]
#[command(name = "posts-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    ///
    /// Database settings are read from DB_USER, DB_PASSWORD, DB_HOST,
    /// DB_PORT and DB_NAME (or DATABASE_URL). A `.env` file in the working
    /// directory is loaded first; variables already set take precedence.
    Serve {
        /// Optional JSON file with HTTP settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dotenv file to load instead of `./.env`
        #[arg(long)]
        env_file: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
