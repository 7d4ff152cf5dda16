//! Catalog loading from the clustered CSV export.

use super::list_literal::parse_list_literal;
use super::track::{normalize_name, FeatureVector, Track, FEATURES_COUNT, FEATURE_COLUMNS};
use super::Catalog;
use anyhow::{bail, Context, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Fatal, the catalog cannot be built at all.
    UnreadableSource(String),
    /// Fatal, a required column is absent from the header.
    MissingColumn(String),
    /// Non-fatal, the row is skipped.
    InvalidRow { line: u64, reason: String },
}

impl Problem {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Problem::InvalidRow { .. })
    }
}

pub struct CatalogBuildResult {
    pub catalog: Option<Catalog>,
    pub problems: Vec<Problem>,
}

struct Columns {
    name: usize,
    artists: usize,
    genres: usize,
    year: usize,
    popularity: usize,
    cluster: usize,
    features: [usize; FEATURES_COUNT],
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> std::result::Result<Columns, Vec<Problem>> {
        let mut missing = vec![];
        let mut find = |names: &[&str]| -> usize {
            match headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim() == *n))
            {
                Some(index) => index,
                None => {
                    missing.push(Problem::MissingColumn(names[0].to_string()));
                    0
                }
            }
        };

        let name = find(&["name"]);
        let artists = find(&["artists"]);
        let genres = find(&["genres"]);
        let year = find(&["year"]);
        let popularity = find(&["popularity"]);
        let cluster = find(&["Cluster", "cluster"]);
        let mut features = [0; FEATURES_COUNT];
        for (slot, column) in features.iter_mut().zip(FEATURE_COLUMNS.iter()) {
            *slot = find(&[*column]);
        }

        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Columns {
            name,
            artists,
            genres,
            year,
            popularity,
            cluster,
            features,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_cluster(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    parse_number(raw)
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64)
}

fn parse_row(columns: &Columns, record: &StringRecord) -> Result<Track> {
    let field = |index: usize| record.get(index).unwrap_or("");

    let popularity = parse_number(field(columns.popularity))
        .with_context(|| format!("invalid popularity \"{}\"", field(columns.popularity)))?;
    let year = parse_number(field(columns.year))
        .with_context(|| format!("invalid year \"{}\"", field(columns.year)))?
        .trunc() as i64;
    let cluster = parse_cluster(field(columns.cluster))
        .with_context(|| format!("invalid cluster \"{}\"", field(columns.cluster)))?;

    let mut features = [0.0; FEATURES_COUNT];
    for (i, (value, column)) in features.iter_mut().zip(FEATURE_COLUMNS.iter()).enumerate() {
        let raw = field(columns.features[i]);
        *value = parse_number(raw).with_context(|| format!("invalid {} \"{}\"", column, raw))?;
    }

    let artists = parse_list_literal(field(columns.artists)).context("invalid artists")?;
    if artists.is_empty() {
        bail!("no artists");
    }
    let genres = parse_list_literal(field(columns.genres)).context("invalid genres")?;

    Ok(Track {
        name: normalize_name(field(columns.name)),
        artists,
        genres,
        year,
        popularity,
        cluster,
        features: FeatureVector(features),
    })
}

impl Catalog {
    pub fn build_from_reader<R: Read>(reader: R) -> CatalogBuildResult {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = match csv_reader.headers() {
            Ok(headers) => headers.clone(),
            Err(err) => {
                return CatalogBuildResult {
                    catalog: None,
                    problems: vec![Problem::UnreadableSource(err.to_string())],
                }
            }
        };

        let columns = match Columns::from_headers(&headers) {
            Ok(columns) => columns,
            Err(problems) => {
                return CatalogBuildResult {
                    catalog: None,
                    problems,
                }
            }
        };

        let mut tracks = vec![];
        let mut problems = vec![];
        for record in csv_reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    let line = err.position().map(|p| p.line()).unwrap_or(0);
                    problems.push(Problem::InvalidRow {
                        line,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            match parse_row(&columns, &record) {
                Ok(track) => tracks.push(track),
                Err(err) => problems.push(Problem::InvalidRow {
                    line,
                    reason: format!("{:#}", err),
                }),
            }
        }

        CatalogBuildResult {
            catalog: Some(Catalog::new(tracks)),
            problems,
        }
    }

    pub fn build(path: &Path) -> CatalogBuildResult {
        match std::fs::File::open(path) {
            Ok(file) => Catalog::build_from_reader(file),
            Err(err) => CatalogBuildResult {
                catalog: None,
                problems: vec![Problem::UnreadableSource(format!(
                    "{}: {}",
                    path.display(),
                    err
                ))],
            },
        }
    }
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let catalog_result = Catalog::build(path.as_ref());
    let problems = catalog_result.problems;
    let catalog = catalog_result.catalog;

    if !problems.is_empty() {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
    }

    match (&catalog, problems.is_empty()) {
        (Some(_), true) => info!("Catalog checked, no issues found."),
        (Some(_), false) => info!(
            "Catalog was built, {} rows were skipped.",
            problems.len()
        ),
        (None, _) => info!(
            "Check the {} problems above, the catalog could not be initialized.",
            problems.len()
        ),
    }

    if let Some(catalog) = catalog {
        info!(
            "Catalog has:\n{} tracks\n{} clusters",
            catalog.len(),
            catalog.clusters_count()
        );
        return Ok(catalog);
    }

    bail!("Could not load catalog");
}
