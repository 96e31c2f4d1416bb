//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the handler tree middleware and a 404 fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown

use std::future::Future;
use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handler::SharedHandler;
use crate::http::middleware::{handler_tree_middleware, TreeState};

/// HTTP server hosting one handler tree.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and tree.
    pub fn new(config: AppConfig, root: SharedHandler) -> Self {
        let state = TreeState::new(root, config.limits.max_body_size);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers added last run first: the request ID is assigned before the
    /// trace span opens, and the tree only sees requests that carry one.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: TreeState) -> Router {
        Router::new()
            .fallback(not_found)
            .layer(from_fn_with_state(state, handler_tree_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "No matching route found")
}
