use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cluster_recommender_server::catalog::load_catalog;
use cluster_recommender_server::config;
use cluster_recommender_server::enrichment::{GuardedImageResolver, LastFmConfig, NoOpImageResolver};
#[cfg(not(feature = "no_enrichment"))]
use cluster_recommender_server::enrichment::LastFmImageResolver;
use cluster_recommender_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the clustered catalog CSV.
    /// Defaults to clustered_df_with_genres.csv in the working directory.
    #[clap(long, value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The address to bind to.
    #[clap(long, default_value = config::DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Last.fm API key used to look up album art. Without it no images are returned.
    #[clap(long, env = "LASTFM_API_KEY")]
    pub lastfm_api_key: Option<String>,

    /// Contact email sent in the User-Agent of Last.fm requests.
    #[clap(long, env = "USER_AGENT_EMAIL")]
    pub user_agent_email: Option<String>,

    /// Timeout in seconds for Last.fm requests.
    #[clap(long, default_value_t = config::DEFAULT_LASTFM_TIMEOUT_SEC)]
    pub lastfm_timeout_sec: u64,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            catalog_path: args.catalog_path.clone(),
            port: args.port,
            bind_address: args.bind_address.clone(),
            logging_level: args.logging_level.clone(),
            lastfm_api_key: args.lastfm_api_key.clone(),
            user_agent_email: args.user_agent_email.clone(),
            lastfm_timeout_sec: args.lastfm_timeout_sec,
        }
    }
}

#[cfg(not(feature = "no_enrichment"))]
fn make_image_resolver(lastfm: Option<LastFmConfig>) -> Result<GuardedImageResolver> {
    Ok(match lastfm {
        Some(lastfm_config) => {
            info!("Album art lookups enabled via {}", lastfm_config.base_url);
            Arc::new(LastFmImageResolver::new(lastfm_config)?)
        }
        None => {
            info!("No Last.fm API key configured, album art lookups disabled");
            Arc::new(NoOpImageResolver)
        }
    })
}

#[cfg(feature = "no_enrichment")]
fn make_image_resolver(_lastfm: Option<LastFmConfig>) -> Result<GuardedImageResolver> {
    info!("Built without enrichment, album art lookups disabled");
    Ok(Arc::new(NoOpImageResolver))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  catalog_path: {:?}", app_config.catalog_path);
    info!("  listen_address: {}", app_config.listen_address());
    info!("  logging_level: {}", app_config.logging_level);

    info!("Loading catalog at {:?}...", app_config.catalog_path);
    let catalog = Arc::new(load_catalog(&app_config.catalog_path)?);

    let image_resolver = make_image_resolver(app_config.lastfm.clone())?;

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        bind_address: app_config.bind_address.clone(),
    };

    info!("Ready to serve at {}!", app_config.listen_address());
    run_server(catalog, image_resolver, server_config).await
}
