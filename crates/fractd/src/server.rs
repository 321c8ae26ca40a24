//! HTTP server for fractd.

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use fracture_common::validate::MAX_UPLOAD_BYTES;

use crate::routes;
use crate::state::AppState;

/// Body limit leaves headroom above the 10MB image cap for the multipart
/// framing and the remaining form fields.
const BODY_LIMIT_BYTES: usize = (MAX_UPLOAD_BYTES as usize) + 1024 * 1024;

/// Run the HTTP server until shutdown.
pub async fn run(state: AppState) -> Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let state = Arc::new(state);

    let app = Router::new()
        .merge(routes::analysis_routes())
        .merge(routes::chatbot_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
