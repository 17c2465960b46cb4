//! Process-wide database handle
//!
//! A `Database` wraps one connection pool. It is created once at startup,
//! shared by every request and dropped at process exit. Handlers never hold
//! a connection beyond a single operation: `acquire` hands out a
//! `PoolConnection` guard that returns to the pool when dropped.
//!
//! A connection string the driver refuses to parse does not stop the
//! process. The handle is kept in an unavailable state and every `acquire`
//! reports the original configuration error, so requests fail as storage
//! errors instead.

use std::sync::Arc;

use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool};

use crate::observability::{self, Event};

use super::config::DatabaseConfig;

/// Query used to check that the posts table exposes the expected columns
pub const SCHEMA_CHECK_SQL: &str = "SELECT id, title, body, image FROM posts WHERE 1 = 0";

#[derive(Debug, Clone)]
enum Backend {
    Pool(AnyPool),
    /// Pool could not be built; holds the driver's configuration error
    Unavailable(Arc<str>),
}

/// Shared database handle
#[derive(Debug, Clone)]
pub struct Database {
    backend: Backend,
}

impl Database {
    /// Build the pool without opening a connection.
    ///
    /// Never fails: connectivity problems surface on first use, and an
    /// unparseable connection string leaves the handle unavailable.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        install_default_drivers();

        let backend = match AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy(&config.connection_url())
        {
            Ok(pool) => Backend::Pool(pool),
            Err(e) => Backend::Unavailable(Arc::from(e.to_string())),
        };

        Self { backend }
    }

    /// Build the pool and open its first connection eagerly
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_url())
            .await?;

        Ok(Self {
            backend: Backend::Pool(pool),
        })
    }

    /// Returns true if the pool was built
    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Pool(_))
    }

    /// The underlying pool, or the error that prevented building it
    pub fn pool(&self) -> Result<&AnyPool, sqlx::Error> {
        match &self.backend {
            Backend::Pool(pool) => Ok(pool),
            Backend::Unavailable(reason) => {
                Err(sqlx::Error::Configuration(reason.to_string().into()))
            }
        }
    }

    /// Check out a connection for the duration of one operation
    pub async fn acquire(&self) -> Result<PoolConnection<Any>, sqlx::Error> {
        self.pool()?.acquire().await
    }

    /// Open one connection and report the outcome. Never fatal.
    pub async fn check_connection(&self) -> bool {
        match self.acquire().await {
            Ok(_conn) => {
                observability::log_event(Event::DbConnected);
                true
            }
            Err(e) => {
                observability::log_event_with_detail(Event::DbConnectFailed, &e.to_string());
                false
            }
        }
    }

    /// Verify that the posts table exists with the expected columns.
    ///
    /// The table is never created here. Never fatal.
    pub async fn verify_schema(&self) -> bool {
        let result = async {
            let mut conn = self.acquire().await?;
            sqlx::query(SCHEMA_CHECK_SQL).fetch_all(&mut *conn).await
        }
        .await;

        match result {
            Ok(_) => {
                observability::log_event(Event::SchemaVerified);
                true
            }
            Err(e) => {
                observability::log_event_with_detail(Event::SchemaCheckFailed, &e.to_string());
                false
            }
        }
    }
}
