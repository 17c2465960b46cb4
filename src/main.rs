//! posts-api entry point
//!
//! Parses arguments and dispatches to the CLI module. Errors go to stderr
//! with a non-zero exit code.

use posts_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
