//! HTTP surface
//!
//! ```text
//! GET  /health               always served
//! GET  /api/tools            ┐
//! POST /api/tools/{name}     ┴─ maintenance gate → rate limiter → handler
//! ```

pub mod handlers;
pub mod middleware;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use niagate_application::{RateLimiter, ToolExecutorPort, ToolSchemaPort};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Maintenance switch read once at start.
#[derive(Debug, Clone, Copy, Default)]
pub struct Maintenance {
    pub enabled: bool,
    pub retry_after_secs: u64,
}

/// Server state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<dyn ToolExecutorPort>,
    pub schema: Arc<dyn ToolSchemaPort>,
    pub limiter: Arc<RateLimiter>,
    pub maintenance: Maintenance,
}

impl AppState {
    pub fn new(
        executor: Arc<dyn ToolExecutorPort>,
        schema: Arc<dyn ToolSchemaPort>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            executor,
            schema,
            limiter,
            maintenance: Maintenance::default(),
        }
    }

    pub fn with_maintenance(mut self, maintenance: Maintenance) -> Self {
        self.maintenance = maintenance;
        self
    }
}

/// Create the router
pub fn create_router(state: AppState) -> Router {
    // Layers run bottom-up: the gate sees the request before the limiter.
    let api = Router::new()
        .route("/tools", get(handlers::list_tools))
        .route("/tools/{name}", post(handlers::call_tool))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::maintenance_gate,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, bind: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        create_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down");
    })
    .await
}

#[cfg(test)]
mod tests;
