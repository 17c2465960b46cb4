//! # HTTP Server
//!
//! Combines the posts routes with health checks, request tracing and
//! optional CORS into one Axum server.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::observability::{self, Event};
use crate::rest_api::{posts_routes, PostHandler};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP server for the posts resource
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over a shared database handle
    pub fn new(config: HttpServerConfig, db: Database) -> Self {
        let router = Self::build_router(&config, db);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, db: Database) -> Router {
        let router = Router::new()
            .merge(health_routes())
            .merge(posts_routes(PostHandler::new(db)))
            .layer(TraceLayer::new_for_http());

        if config.cors_origins.is_empty() {
            return router;
        }

        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        observability::log_event_with_detail(Event::Serving, &format!("http://{}", addr));

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
