//! Observable events for the posts service
//!
//! Events are explicit and typed. Each one is emitted as the `event` field
//! of a `tracing` record.

use std::fmt;

use tracing::Level;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Startup connectivity check succeeded
    DbConnected,
    /// Startup connectivity check failed (not fatal)
    DbConnectFailed,
    /// The posts table and its columns were found
    SchemaVerified,
    /// The posts table could not be verified (not fatal)
    SchemaCheckFailed,
    /// Listener bound, ready for requests
    Serving,

    // Resource operations
    /// A post was inserted
    PostCreated,
    /// A post was updated
    PostUpdated,
    /// A post was deleted
    PostDeleted,
    /// A request failed validation or named a missing post
    RequestRejected,
    /// A statement failed at the storage layer
    StorageFailure,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DbConnected => "DB_CONNECTED",
            Event::DbConnectFailed => "DB_CONNECT_FAILED",
            Event::SchemaVerified => "SCHEMA_VERIFIED",
            Event::SchemaCheckFailed => "SCHEMA_CHECK_FAILED",
            Event::Serving => "SERVING",
            Event::PostCreated => "POST_CREATED",
            Event::PostUpdated => "POST_UPDATED",
            Event::PostDeleted => "POST_DELETED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::StorageFailure => "STORAGE_FAILURE",
        }
    }

    /// Level the event is logged at
    pub fn level(&self) -> Level {
        match self {
            Event::DbConnectFailed | Event::SchemaCheckFailed => Level::WARN,
            Event::StorageFailure => Level::ERROR,
            Event::RequestRejected => Level::DEBUG,
            _ => Level::INFO,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
