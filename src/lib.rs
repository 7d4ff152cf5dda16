//! Cluster Recommender Server Library
//!
//! Content-based song recommendations over a pre-clustered catalog, plus
//! popularity-ranked attribute filters. Modules are exposed for the
//! binaries and for integration tests.

pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod query;
pub mod server;
pub mod similarity;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, AttributeIndex, Catalog};
pub use enrichment::{ImageResolver, NoOpImageResolver};
pub use error::RecommenderError;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
