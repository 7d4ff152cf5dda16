use super::cosine::{compare_similarity_desc, cosine_similarity};
use super::RESULTS_LIMIT;
use crate::catalog::{Catalog, TrackIndex, TrackSummary};
use crate::error::RecommenderError;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredTrack {
    pub index: TrackIndex,
    /// NaN when either feature vector has zero norm.
    pub similarity: f64,
}

/// Recommends tracks sharing the query's cluster, ranked by cosine
/// similarity of their feature vectors.
pub struct SimilarityEngine {
    catalog: Arc<Catalog>,
}

impl SimilarityEngine {
    pub fn new(catalog: Arc<Catalog>) -> SimilarityEngine {
        SimilarityEngine { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranks every other member of the query's cluster, most similar first.
    /// Equal similarities keep catalog load order.
    pub fn rank(&self, song_name: &str) -> Result<Vec<ScoredTrack>, RecommenderError> {
        let query_index = self
            .catalog
            .find_by_name(song_name)
            .ok_or_else(|| RecommenderError::NotFound("Song not found".to_string()))?;
        let query = self.catalog.get(query_index).ok_or_else(|| {
            RecommenderError::Internal(format!("track {} is not in the catalog", query_index))
        })?;

        let members = self.catalog.cluster_members(query.cluster);
        debug!(
            "Ranking {} members of cluster {} against \"{}\"",
            members.len(),
            query.cluster,
            query.name
        );
        if members.len() <= 1 {
            return Ok(vec![]);
        }
        if !members.contains(&query_index) {
            return Err(RecommenderError::Internal(format!(
                "track {} is missing from its cluster {}",
                query_index, query.cluster
            )));
        }

        let query_features = query.features.as_slice();
        let mut scored: Vec<ScoredTrack> = members
            .par_iter()
            .filter(|&&index| index != query_index)
            .filter_map(|&index| {
                self.catalog.get(index).map(|candidate| ScoredTrack {
                    index,
                    similarity: cosine_similarity(query_features, candidate.features.as_slice()),
                })
            })
            .collect();

        scored.sort_by(|a, b| compare_similarity_desc(a.similarity, b.similarity));
        Ok(scored)
    }

    /// Top recommendations for `song_name`, at most `RESULTS_LIMIT`.
    pub fn recommend(&self, song_name: &str) -> Result<Vec<TrackSummary>, RecommenderError> {
        let ranked = self.rank(song_name)?;
        Ok(ranked
            .into_iter()
            .take(RESULTS_LIMIT)
            .filter_map(|scored| self.catalog.get(scored.index).map(|t| t.summary()))
            .collect())
    }
}
