use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::catalog::Catalog;
use crate::enrichment::GuardedImageResolver;

use super::{log_requests, make_recommendation_routes, state::*, ServerConfig};
use std::sync::Arc;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub tracks: usize,
    pub clusters: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        tracks: state.catalog.len(),
        clusters: state.catalog.clusters_count(),
    };
    Json(stats)
}

pub fn make_app(
    config: ServerConfig,
    catalog: Arc<Catalog>,
    image_resolver: GuardedImageResolver,
) -> Router {
    let state = ServerState::new(config, catalog, image_resolver);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .merge(make_recommendation_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(CorsLayer::permissive())
}

pub async fn run_server(
    catalog: Arc<Catalog>,
    image_resolver: GuardedImageResolver,
    config: ServerConfig,
) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, catalog, image_resolver);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Could not bind to {}", address))?;
    info!("Listening on {}", address);

    Ok(axum::serve(listener, app).await?)
}
