mod attribute_index;
#[allow(clippy::module_inception)]
mod catalog;
mod list_literal;
mod load;
mod track;

pub use attribute_index::{AttributeIndex, Filters};
pub use catalog::Catalog;
pub use list_literal::{format_list_literal, parse_list_literal};
pub use load::{load_catalog, CatalogBuildResult, Problem as LoadCatalogProblem};
pub use track::{
    normalize_name, FeatureVector, Track, TrackIndex, TrackSummary, FEATURES_COUNT,
    FEATURE_COLUMNS,
};

#[cfg(test)]
pub(crate) use catalog::test_tracks;
