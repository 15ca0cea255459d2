//! HTTP layer exposing the routing engine to the report pipeline.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{config::Settings, select::Selector};

#[derive(Clone)]
pub struct AppState {
    pub selector: Selector,
    /// Default for requests that do not say whether to consult the AI.
    pub use_ai: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/catalog", get(routes::catalog))
        .route("/classify", post(routes::classify))
        .route("/select", post(routes::select))
        .route("/reports/resolve", post(routes::resolve))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState {
        selector: settings.selector()?,
        use_ai: settings.use_ai,
    };
    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, ai = settings.ai.has_credentials(), "serving medora-router API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
