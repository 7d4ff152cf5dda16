mod file_config;

pub use file_config::{FileConfig, LastFmFileConfig};

use crate::enrichment::lastfm::{LastFmConfig, LASTFM_API_BASE};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_FILE: &str = "clustered_df_with_genres.csv";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_LASTFM_TIMEOUT_SEC: u64 = 10;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,
    pub lastfm_api_key: Option<String>,
    pub user_agent_email: Option<String>,
    pub lastfm_timeout_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            logging_level: RequestsLoggingLevel::default(),
            lastfm_api_key: None,
            user_agent_email: None,
            lastfm_timeout_sec: DEFAULT_LASTFM_TIMEOUT_SEC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub port: u16,
    pub bind_address: String,
    pub logging_level: RequestsLoggingLevel,

    /// None when no API key is configured, images are then never looked up.
    pub lastfm: Option<LastFmConfig>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));

        if !catalog_path.exists() {
            bail!("Catalog file does not exist: {:?}", catalog_path);
        }
        if !catalog_path.is_file() {
            bail!("catalog_path is not a file: {:?}", catalog_path);
        }

        let port = file.port.unwrap_or(cli.port);
        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let lastfm_file = file.lastfm.unwrap_or_default();
        let api_key = lastfm_file
            .api_key
            .or_else(|| cli.lastfm_api_key.clone())
            .filter(|key| !key.trim().is_empty());
        let lastfm = api_key.map(|api_key| LastFmConfig {
            api_key,
            user_agent_email: lastfm_file
                .user_agent_email
                .or_else(|| cli.user_agent_email.clone()),
            base_url: lastfm_file
                .base_url
                .unwrap_or_else(|| LASTFM_API_BASE.to_string()),
            timeout: Duration::from_secs(
                lastfm_file.timeout_sec.unwrap_or(cli.lastfm_timeout_sec),
            ),
        });

        Ok(Self {
            catalog_path,
            port,
            bind_address,
            logging_level,
            lastfm,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
