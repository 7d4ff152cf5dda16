use super::list_literal::format_list_literal;
use super::track::{normalize_name, Track, TrackIndex};
use std::collections::BTreeSet;

/// Immutable, load-ordered table of tracks.
#[derive(Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
    artists_haystacks: Vec<String>,
    genres_haystacks: Vec<String>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Catalog {
        let artists_haystacks = tracks
            .iter()
            .map(|t| format_list_literal(&t.artists).to_lowercase())
            .collect();
        let genres_haystacks = tracks
            .iter()
            .map(|t| format_list_literal(&t.genres).to_lowercase())
            .collect();
        Catalog {
            tracks,
            artists_haystacks,
            genres_haystacks,
        }
    }

    #[cfg(test)]
    pub fn dummy() -> Catalog {
        Catalog::new(vec![])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: TrackIndex) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackIndex, &Track)> {
        self.tracks.iter().enumerate()
    }

    /// Returns the first track in load order whose name matches `name`
    /// after normalization.
    pub fn find_by_name<T: AsRef<str>>(&self, name: T) -> Option<TrackIndex> {
        let normalized = normalize_name(name);
        self.tracks.iter().position(|t| t.name == normalized)
    }

    /// Indices of every track labelled with `cluster`, in load order.
    pub fn cluster_members(&self, cluster: i64) -> Vec<TrackIndex> {
        self.iter()
            .filter(|(_, t)| t.cluster == cluster)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn clusters_count(&self) -> usize {
        self.tracks
            .iter()
            .map(|t| t.cluster)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Lowercased list-literal rendering of the track's artists.
    pub fn artists_haystack(&self, index: TrackIndex) -> Option<&str> {
        self.artists_haystacks.get(index).map(|s| s.as_str())
    }

    /// Lowercased list-literal rendering of the track's genres.
    pub fn genres_haystack(&self, index: TrackIndex) -> Option<&str> {
        self.genres_haystacks.get(index).map(|s| s.as_str())
    }
}
