//! HTTP server
//!
//! Binds the combined router and serves it on a tokio listener. CORS is
//! permissive when no origins are configured, restricted otherwise.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;
use crate::repository::StringRepository;
use crate::service::StringService;

use super::config::HttpServerConfig;
use super::routes::{health_routes, string_routes};

/// HTTP server for the string analysis API
pub struct HttpServer<R: StringRepository> {
    config: HttpServerConfig,
    service: Arc<StringService<R>>,
}

impl<R: StringRepository + 'static> HttpServer<R> {
    /// Create a server with default configuration
    pub fn new(service: StringService<R>) -> Self {
        Self::with_config(HttpServerConfig::default(), service)
    }

    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig, service: StringService<R>) -> Self {
        Self {
            config,
            service: Arc::new(service),
        }
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }

    /// Build the combined router
    pub fn router(&self) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(string_routes(Arc::clone(&self.service)))
            .layer(Self::cors_layer(&self.config))
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let router = self.router();
        let listener = TcpListener::bind(addr).await?;

        Logger::info(
            "http_server_started",
            &[("addr", addr.to_string().as_str())],
        );

        axum::serve(listener, router).await
    }
}
