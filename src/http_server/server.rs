//! # HTTP Server
//!
//! Serves one `PetProvider` over HTTP. There are no fixed routes: every path
//! falls through to the provider's own URI matcher.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::observability::Event;
use crate::provider::PetProvider;

use super::config::HttpServerConfig;
use super::handler::dispatch;

/// HTTP Server for the pets resource
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, provider: Arc<PetProvider>) -> Self {
        Self {
            config,
            router: build_router(provider),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(event = %Event::Serving, addr = %listener.local_addr()?, "serving pets");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// The request router. Every request reaches the same dispatch handler.
pub fn build_router(provider: Arc<PetProvider>) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(provider)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
