use std::path::Path;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Full application: `/api` routes, optional static frontend, CORS and request tracing.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    // Preflight OPTIONS requests are answered by the CORS layer.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new().nest("/api", api::router(state));

    if server.serve_static {
        let dir = Path::new(&server.static_dir);
        if dir.exists() {
            tracing::info!("Serving frontend from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            app = app.fallback_service(ServeDir::new(dir).fallback(index));
        } else {
            tracing::warn!("Build directory not found: {}", dir.display());
        }
    }

    // One INFO line per request with method, path, status and latency.
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    app.layer(cors).layer(trace)
}

pub async fn run(state: AppState, server: &ServerConfig) -> Result<()> {
    let app = app(state, server);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", server.port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Web server stopped unexpectedly")?;
    Ok(())
}
