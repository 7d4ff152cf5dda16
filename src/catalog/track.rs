use serde::{Deserialize, Serialize};

/// Names of the audio feature columns, in vector order.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "valence",
    "danceability",
    "energy",
    "tempo",
    "acousticness",
    "liveness",
    "speechiness",
    "instrumentalness",
];

pub const FEATURES_COUNT: usize = FEATURE_COLUMNS.len();

/// Position of a track in the catalog's load order.
pub type TrackIndex = usize;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURES_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; FEATURES_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURES_COUNT]) -> Self {
        FeatureVector(values)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Track {
    /// Trimmed and lowercased, not unique.
    pub name: String,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub year: i64,
    pub popularity: f64,
    pub cluster: i64,
    pub features: FeatureVector,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.as_str())
    }

    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            name: self.name.clone(),
            year: self.year,
            artists: self.artists.clone(),
        }
    }
}

/// The projection of a track returned by recommendations and filters.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TrackSummary {
    pub name: String,
    pub year: i64,
    pub artists: Vec<String>,
}

impl TrackSummary {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.as_str())
    }
}

pub fn normalize_name<T: AsRef<str>>(name: T) -> String {
    name.as_ref().trim().to_lowercase()
}
