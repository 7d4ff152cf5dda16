use super::Catalog;
use serde::Serialize;
use std::collections::BTreeSet;

/// Sorted, deduplicated artist names and genre tags of a catalog.
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    artists: Vec<String>,
    genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Filters {
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

impl AttributeIndex {
    pub fn build(catalog: &Catalog) -> AttributeIndex {
        let artists = distinct_sorted(catalog.iter().flat_map(|(_, t)| t.artists.iter()));
        let genres = distinct_sorted(catalog.iter().flat_map(|(_, t)| t.genres.iter()));
        AttributeIndex { artists, genres }
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn filters(&self) -> Filters {
        Filters {
            artists: self.artists.clone(),
            genres: self.genres.clone(),
        }
    }
}
