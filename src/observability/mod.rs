//! Observability for the posts service
//!
//! This module provides:
//! - Structured logging through `tracing`
//! - A typed vocabulary of lifecycle events
//!
//! # Usage
//!
//! ```ignore
//! use posts_api::observability::{self, Event};
//!
//! observability::init_tracing();
//! observability::log_event(Event::BootStart);
//! tracing::info!(event = %Event::PostCreated, id = 42, "post created");
//! ```

mod events;

pub use events::Event;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,tower_http=debug,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// Verbosity follows `RUST_LOG`. Calling this more than once is harmless;
/// only the first call installs a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_detail(event, "");
}

/// Log a lifecycle event with a free-form detail string
pub fn log_event_with_detail(event: Event, detail: &str) {
    let name = event.as_str();
    let level = event.level();
    if level == Level::ERROR {
        tracing::error!(event = name, detail);
    } else if level == Level::WARN {
        tracing::warn!(event = name, detail);
    } else if level == Level::DEBUG {
        tracing::debug!(event = name, detail);
    } else {
        tracing::info!(event = name, detail);
    }
}
