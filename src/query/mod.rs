//! Attribute filters over the catalog, ranked by popularity.

use crate::catalog::{Catalog, TrackIndex, TrackSummary};
use crate::error::RecommenderError;
use crate::similarity::RESULTS_LIMIT;
use serde_json::Value;
use std::sync::Arc;

/// Filter value meaning "no filter", answered with no suggestions.
pub const ALL_SENTINEL: &str = "Todos";

/// A release year taken from a request field that may be a JSON number or
/// a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearQuery(pub i64);

impl YearQuery {
    pub fn parse(value: &Value) -> Result<YearQuery, RecommenderError> {
        let invalid = || RecommenderError::InvalidArgument("year must be a number".to_string());
        match value {
            Value::Number(number) => {
                if let Some(year) = number.as_i64() {
                    Ok(YearQuery(year))
                } else {
                    number
                        .as_f64()
                        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
                        .map(|v| YearQuery(v.trunc() as i64))
                        .ok_or_else(invalid)
                }
            }
            Value::String(text) => text.trim().parse::<i64>().map(YearQuery).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

pub struct CatalogQuery {
    catalog: Arc<Catalog>,
}

impl CatalogQuery {
    pub fn new(catalog: Arc<Catalog>) -> CatalogQuery {
        CatalogQuery { catalog }
    }

    fn most_popular<F>(&self, predicate: F) -> Vec<TrackSummary>
    where
        F: Fn(TrackIndex) -> bool,
    {
        let mut matches: Vec<(TrackIndex, f64)> = self
            .catalog
            .iter()
            .filter(|(index, _)| predicate(*index))
            .map(|(index, track)| (index, track.popularity))
            .collect();
        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        matches
            .into_iter()
            .take(RESULTS_LIMIT)
            .filter_map(|(index, _)| self.catalog.get(index).map(|t| t.summary()))
            .collect()
    }

    /// Case-insensitive substring match against the serialized artists.
    pub fn search_by_artist(&self, artist: &str) -> Vec<TrackSummary> {
        if artist == ALL_SENTINEL {
            return vec![];
        }
        let needle = artist.to_lowercase();
        self.most_popular(|index| {
            self.catalog
                .artists_haystack(index)
                .is_some_and(|haystack| haystack.contains(&needle))
        })
    }

    /// Case-insensitive substring match against the serialized genres.
    pub fn search_by_genre(&self, genre: &str) -> Vec<TrackSummary> {
        if genre == ALL_SENTINEL {
            return vec![];
        }
        let needle = genre.to_lowercase();
        self.most_popular(|index| {
            self.catalog
                .genres_haystack(index)
                .is_some_and(|haystack| haystack.contains(&needle))
        })
    }

    pub fn search_by_year(&self, year: YearQuery) -> Vec<TrackSummary> {
        self.most_popular(|index| self.catalog.get(index).is_some_and(|t| t.year == year.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_tracks::{track, unit};
    use crate::catalog::Track;
    use serde_json::json;

    fn rated(
        name: &str,
        artists: &[&str],
        genres: &[&str],
        year: i64,
        popularity: f64,
    ) -> Track {
        let mut t = track(name, artists, 0, unit(0));
        t.genres = genres.iter().map(|g| g.to_string()).collect();
        t.year = year;
        t.popularity = popularity;
        t
    }

    fn query() -> CatalogQuery {
        CatalogQuery::new(Arc::new(Catalog::new(vec![
            rated("lithium", &["Nirvana"], &["grunge", "rock"], 1991, 72.0),
            rated("teen spirit", &["Nirvana"], &["grunge"], 1991, 90.0),
            rated("everlong", &["Foo Fighters"], &["alternative rock"], 1997, 85.0),
            rated("dancing queen", &["ABBA"], &["europop"], 1976, 80.0),
            rated("fernando", &["ABBA"], &["europop"], 1976, 60.0),
            rated("waterloo", &["ABBA"], &["europop", "rock"], 1974, 65.0),
            rated("heart-shaped box", &["Nirvana"], &["grunge"], 1993, 70.0),
            rated("all apologies", &["Nirvana"], &["grunge"], 1993, 55.0),
            rated("about a girl", &["Nirvana"], &["grunge"], 1989, 50.0),
            rated("polly", &["Nirvana"], &["grunge"], 1991, 72.0),
        ])))
    }

    fn names(results: &[TrackSummary]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn artist_search_is_case_insensitive() {
        let query = query();
        let lower = query.search_by_artist("nirvana");
        let upper = query.search_by_artist("NIRVANA");
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), RESULTS_LIMIT);
        assert_eq!(lower[0].name, "teen spirit");
        assert_eq!(lower[0].artists, vec!["Nirvana"]);
    }

    #[test]
    fn ranks_by_popularity_with_stable_ties() {
        let results = query().search_by_artist("nirv");
        assert_eq!(
            names(&results),
            vec!["teen spirit", "lithium", "polly", "heart-shaped box", "all apologies"]
        );
    }

    #[test]
    fn matches_substrings_of_genres() {
        let results = query().search_by_genre("Rock");
        assert_eq!(names(&results), vec!["everlong", "lithium", "waterloo"]);
    }

    #[test]
    fn sentinel_returns_nothing() {
        let query = query();
        assert!(query.search_by_artist(ALL_SENTINEL).is_empty());
        assert!(query.search_by_genre(ALL_SENTINEL).is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(query().search_by_artist("beatles").is_empty());
        assert!(query().search_by_year(YearQuery(2020)).is_empty());
    }

    #[test]
    fn filters_by_exact_year() {
        let results = query().search_by_year(YearQuery::parse(&json!("1991")).unwrap());
        assert_eq!(names(&results), vec!["teen spirit", "lithium", "polly"]);
        assert!(results.iter().all(|r| r.year == 1991));
    }

    #[test]
    fn parses_year_values() {
        assert_eq!(YearQuery::parse(&json!(1995)), Ok(YearQuery(1995)));
        assert_eq!(YearQuery::parse(&json!("1995")), Ok(YearQuery(1995)));
        assert_eq!(YearQuery::parse(&json!(" 1995 ")), Ok(YearQuery(1995)));
        assert_eq!(YearQuery::parse(&json!(1995.9)), Ok(YearQuery(1995)));
    }

    #[test]
    fn rejects_non_numeric_years() {
        for value in [
            json!("abc"),
            json!("1995.5"),
            json!(""),
            json!(null),
            json!(true),
            json!([1995]),
            json!({"year": 1995}),
        ] {
            assert_eq!(
                YearQuery::parse(&value),
                Err(RecommenderError::InvalidArgument(
                    "year must be a number".to_string()
                )),
                "{:?}",
                value
            );
        }
    }
}
