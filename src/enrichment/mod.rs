//! Best-effort album art lookup for ranked results.

pub mod lastfm;

pub use lastfm::{LastFmConfig, LastFmImageResolver};

use crate::catalog::TrackSummary;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Maps a (track, primary artist) pair to an image URL.
///
/// Implementations never fail: any problem resolves to `None`.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn image_url(&self, track_name: &str, artist_name: &str) -> Option<String>;
}

pub struct NoOpImageResolver;

#[async_trait]
impl ImageResolver for NoOpImageResolver {
    async fn image_url(&self, _track_name: &str, _artist_name: &str) -> Option<String> {
        None
    }
}

pub type GuardedImageResolver = Arc<dyn ImageResolver>;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RecommendedTrack {
    pub name: String,
    pub year: i64,
    pub artists: Vec<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// Attaches an image to each entry, one lookup at a time, in result order.
pub async fn enrich(
    resolver: &dyn ImageResolver,
    results: Vec<TrackSummary>,
) -> Vec<RecommendedTrack> {
    let mut enriched = Vec::with_capacity(results.len());
    for summary in results {
        let image_url = match summary.primary_artist() {
            Some(artist) => resolver.image_url(&summary.name, artist).await,
            None => None,
        };
        debug!(
            "Image for \"{}\": {}",
            summary.name,
            image_url.as_deref().unwrap_or("none")
        );
        enriched.push(RecommendedTrack {
            name: summary.name,
            year: summary.year,
            artists: summary.artists,
            image_url,
        });
    }
    enriched
}
