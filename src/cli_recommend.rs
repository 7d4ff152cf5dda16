use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use cluster_recommender_server::catalog::{load_catalog, AttributeIndex, TrackSummary};
use cluster_recommender_server::config::DEFAULT_CATALOG_FILE;
use cluster_recommender_server::query::{CatalogQuery, YearQuery};
use cluster_recommender_server::similarity::SimilarityEngine;

fn parse_catalog_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s).canonicalize()?;
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the clustered catalog CSV.
    #[clap(long, value_parser = parse_catalog_path)]
    pub catalog_path: Option<PathBuf>,
}

const HELP: &str = "Commands:
  song <name>     recommend similar songs
  artist <text>   most popular songs by matching artists
  genre <text>    most popular songs of matching genres
  year <n>        most popular songs released in year n
  filters         list artist and genre counts
  quit";

fn print_results(label: &str, results: &[TrackSummary]) {
    if results.is_empty() {
        println!("No matches found for \"{}\".", label);
        return;
    }
    println!("Found {} matches for \"{}\":\n", results.len(), label);
    for result in results {
        println!(
            "{} ({}) - {}",
            result.name,
            result.year,
            result.artists.join(", ")
        );
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let catalog_path = cli_args
        .catalog_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
    println!("Cli Recommend loading catalog at {}...", catalog_path.display());

    let catalog = Arc::new(load_catalog(&catalog_path)?);
    let attribute_index = AttributeIndex::build(&catalog);
    let engine = SimilarityEngine::new(catalog.clone());
    let query = CatalogQuery::new(catalog.clone());
    println!(
        "Done! {} tracks in {} clusters.",
        catalog.len(),
        catalog.clusters_count()
    );
    println!("{}", HELP);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut user_input = String::new();
        if io::stdin().read_line(&mut user_input)? == 0 {
            break;
        }

        let user_input = user_input.trim();
        let (command, argument) = match user_input.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (user_input, ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "filters" => println!(
                "{} artists, {} genres",
                attribute_index.artists().len(),
                attribute_index.genres().len()
            ),
            "song" => match engine.recommend(argument) {
                Ok(results) => print_results(argument, &results),
                Err(err) => println!("{}", err),
            },
            "artist" => print_results(argument, &query.search_by_artist(argument)),
            "genre" => print_results(argument, &query.search_by_genre(argument)),
            "year" => match YearQuery::parse(&Value::String(argument.to_string())) {
                Ok(year) => print_results(argument, &query.search_by_year(year)),
                Err(err) => println!("{}", err),
            },
            _ => println!("{}", HELP),
        }
        println!();
    }

    Ok(())
}
