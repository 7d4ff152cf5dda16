//! Cluster-scoped similarity ranking.

mod cosine;
mod engine;

pub use cosine::{compare_similarity_desc, cosine_similarity};
pub use engine::{ScoredTrack, SimilarityEngine};

/// Maximum number of tracks returned by recommendations and filters.
pub const RESULTS_LIMIT: usize = 5;
