use axum::extract::FromRef;

use crate::catalog::{AttributeIndex, Catalog};
use crate::enrichment::GuardedImageResolver;
use crate::query::CatalogQuery;
use crate::similarity::SimilarityEngine;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

// Everything below is read-only after startup, so no locks are needed.
pub type SharedCatalog = Arc<Catalog>;
pub type SharedAttributeIndex = Arc<AttributeIndex>;
pub type SharedSimilarityEngine = Arc<SimilarityEngine>;
pub type SharedCatalogQuery = Arc<CatalogQuery>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: SharedCatalog,
    pub attribute_index: SharedAttributeIndex,
    pub similarity_engine: SharedSimilarityEngine,
    pub catalog_query: SharedCatalogQuery,
    pub image_resolver: GuardedImageResolver,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: SharedCatalog,
        image_resolver: GuardedImageResolver,
    ) -> ServerState {
        let attribute_index = Arc::new(AttributeIndex::build(&catalog));
        ServerState {
            config,
            start_time: Instant::now(),
            similarity_engine: Arc::new(SimilarityEngine::new(catalog.clone())),
            catalog_query: Arc::new(CatalogQuery::new(catalog.clone())),
            catalog,
            attribute_index,
            image_resolver,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for SharedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for SharedAttributeIndex {
    fn from_ref(input: &ServerState) -> Self {
        input.attribute_index.clone()
    }
}

impl FromRef<ServerState> for SharedSimilarityEngine {
    fn from_ref(input: &ServerState) -> Self {
        input.similarity_engine.clone()
    }
}

impl FromRef<ServerState> for SharedCatalogQuery {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_query.clone()
    }
}

impl FromRef<ServerState> for GuardedImageResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.image_resolver.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
