//! Temporary catalog files for end-to-end tests.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG_FILE_NAME: &str = "clustered_df_with_genres.csv";

// Features order: valence, danceability, energy, tempo, acousticness,
// liveness, speechiness, instrumentalness.
const TEST_CATALOG_CSV: &str = r#"name,artists,genres,year,popularity,Cluster,valence,danceability,energy,tempo,acousticness,liveness,speechiness,instrumentalness,id
Smells Like Teen Spirit,['Nirvana'],"['grunge', 'rock']",1991,90,0,1,0,0,0,0,0,0,0,a1
Lithium,['Nirvana'],['grunge'],1991.0,75,0,0.9,0.1,0,0,0,0,0,0,a2
Everlong,['Foo Fighters'],['alternative rock'],1997,85,0,0.7,0.7,0,0,0,0,0,0,a3
Paranoid,['Black Sabbath'],"['hard rock', 'metal']",1970,70,0,0,1,0,0,0,0,0,0,a4
Sweet Child O' Mine,"[""Guns N' Roses""]",['hard rock'],1987,88,0.0,0.5,0,0.8,0,0,0,0,0,a5
Creep,['Radiohead'],['alternative rock'],1992,80,0,0,0,1,0,0,0,0,0,a6
Come As You Are,['Nirvana'],['grunge'],1991,78,0,0.8,0.2,0,0,0,0,0,0,a7
Broken Row,['Nobody'],['noise'],not a year,10,0,1,1,1,1,1,1,1,1,a8
Dancing Queen,['ABBA'],['europop'],1976,82,1,0,0,0,1,0,0,0,0,b1
Take On Me,['a-ha'],"['synthpop', 'new wave']",1985,84,1,0,0,0,0.9,0.1,0,0,0,b2
So What,['Miles Davis'],['jazz'],1959,60,2,0,0,0,0,0,0,0,1,c1
"#;

/// Writes the test catalog CSV into a fresh temporary directory.
///
/// Returns the directory guard, keep it alive for as long as the file is needed.
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(CATALOG_FILE_NAME);
    fs::write(&path, TEST_CATALOG_CSV)?;
    Ok((dir, path))
}
