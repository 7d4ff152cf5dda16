//! Shared constants for end-to-end tests
//!
//! When the fixture catalog in `fixtures.rs` changes, update only this file.

// ============================================================================
// Test Catalog
// ============================================================================

pub const TRACKS_COUNT: usize = 10;
pub const CLUSTERS_COUNT: usize = 3;

/// Query track of the rock cluster, mixed case as a user would type it.
pub const TEEN_SPIRIT: &str = "Smells Like Teen Spirit";

/// Only member of its cluster.
pub const LONELY_TRACK: &str = "so what";

/// Expected recommendations for `TEEN_SPIRIT`, most similar first.
pub const TEEN_SPIRIT_RECOMMENDATIONS: [&str; 5] = [
    "lithium",
    "come as you are",
    "everlong",
    "sweet child o' mine",
    "paranoid",
];

pub const NIRVANA_BY_POPULARITY: [&str; 3] =
    ["smells like teen spirit", "come as you are", "lithium"];

pub const ROCK_BY_POPULARITY: [&str; 5] = [
    "smells like teen spirit",
    "sweet child o' mine",
    "everlong",
    "creep",
    "paranoid",
];

pub const SORTED_ARTISTS: [&str; 8] = [
    "ABBA",
    "Black Sabbath",
    "Foo Fighters",
    "Guns N' Roses",
    "Miles Davis",
    "Nirvana",
    "Radiohead",
    "a-ha",
];

pub const SORTED_GENRES: [&str; 9] = [
    "alternative rock",
    "europop",
    "grunge",
    "hard rock",
    "jazz",
    "metal",
    "new wave",
    "rock",
    "synthpop",
];

// ============================================================================
// Timing
// ============================================================================

/// Maximum time to wait for the server to answer its status route.
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

pub const REQUEST_TIMEOUT_SECS: u64 = 10;
