//! Recommendation and filter routes.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::debug;

use crate::catalog::TrackSummary;
use crate::enrichment::{enrich, GuardedImageResolver};
use crate::error::RecommenderError;
use crate::query::YearQuery;

use super::state::{
    ServerState, SharedAttributeIndex, SharedCatalogQuery, SharedSimilarityEngine,
};

/// Empty or malformed bodies carry no fields at all.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn required_field<'a>(body: &'a Value, name: &str) -> Result<&'a Value, RecommenderError> {
    match body.get(name) {
        None | Some(Value::Null) => Err(RecommenderError::MissingField(name.to_string())),
        Some(value) => Ok(value),
    }
}

fn required_string<'a>(body: &'a Value, name: &str) -> Result<&'a str, RecommenderError> {
    required_field(body, name)?
        .as_str()
        .ok_or_else(|| RecommenderError::InvalidArgument(format!("'{}' must be a string", name)))
}

async fn respond_enriched(
    resolver: &GuardedImageResolver,
    results: Vec<TrackSummary>,
) -> Response {
    Json(enrich(resolver.as_ref(), results).await).into_response()
}

async fn get_filters(State(attribute_index): State<SharedAttributeIndex>) -> impl IntoResponse {
    Json(attribute_index.filters())
}

async fn recommend_song(
    State(engine): State<SharedSimilarityEngine>,
    State(resolver): State<GuardedImageResolver>,
    body: Bytes,
) -> Result<Response, RecommenderError> {
    let body = parse_body(&body);
    let song_name = required_string(&body, "song_name")?;
    let results = engine.recommend(song_name)?;
    debug!("{} recommendations for \"{}\"", results.len(), song_name);
    Ok(respond_enriched(&resolver, results).await)
}

async fn search_artist(
    State(query): State<SharedCatalogQuery>,
    State(resolver): State<GuardedImageResolver>,
    body: Bytes,
) -> Result<Response, RecommenderError> {
    let body = parse_body(&body);
    let artist = required_string(&body, "artist")?;
    let results = query.search_by_artist(artist);
    Ok(respond_enriched(&resolver, results).await)
}

async fn search_genre(
    State(query): State<SharedCatalogQuery>,
    State(resolver): State<GuardedImageResolver>,
    body: Bytes,
) -> Result<Response, RecommenderError> {
    let body = parse_body(&body);
    let genre = required_string(&body, "genre")?;
    let results = query.search_by_genre(genre);
    Ok(respond_enriched(&resolver, results).await)
}

async fn search_year(
    State(query): State<SharedCatalogQuery>,
    State(resolver): State<GuardedImageResolver>,
    body: Bytes,
) -> Result<Response, RecommenderError> {
    let body = parse_body(&body);
    let year = YearQuery::parse(required_field(&body, "year")?)?;
    let results = query.search_by_year(year);
    Ok(respond_enriched(&resolver, results).await)
}

pub fn make_recommendation_routes(state: ServerState) -> Router {
    Router::new()
        .route("/filters", get(get_filters))
        .route("/recommend-song", post(recommend_song))
        .route("/search-artist", post(search_artist))
        .route("/search-genre", post(search_genre))
        .route("/search-year", post(search_year))
        .with_state(state)
}
