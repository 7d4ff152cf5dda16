//! Last.fm `track.getInfo` client used to find album art.
//!
//! Requests are spaced by a minimum interval, Last.fm asks clients to stay
//! under 5 requests per second.

use super::ImageResolver;
use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

pub const LASTFM_API_BASE: &str = "http://ws.audioscrobbler.com/2.0/";
const RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(200);
const PREFERRED_IMAGE_SIZE: &str = "extralarge";

#[derive(Debug, Clone, PartialEq)]
pub struct LastFmConfig {
    pub api_key: String,
    pub user_agent_email: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

pub struct LastFmImageResolver {
    client: Client,
    api_key: String,
    base_url: String,
    last_request: Mutex<Instant>,
}

#[derive(Deserialize)]
struct TrackInfoResponse {
    track: Option<TrackInfo>,
}

#[derive(Deserialize)]
struct TrackInfo {
    album: Option<AlbumInfo>,
}

#[derive(Deserialize)]
struct AlbumInfo {
    image: Option<Vec<LastFmImage>>,
}

#[derive(Deserialize)]
struct LastFmImage {
    #[serde(rename = "#text")]
    url: Option<String>,
    size: Option<String>,
}

/// Picks the extralarge image, falling back to the last listed one.
fn pick_image_url(body: TrackInfoResponse) -> Option<String> {
    let images = body.track?.album?.image.unwrap_or_default();
    let chosen = images
        .iter()
        .find(|img| img.size.as_deref() == Some(PREFERRED_IMAGE_SIZE))
        .or_else(|| images.last())?;
    chosen.url.clone().filter(|url| !url.is_empty())
}

impl LastFmImageResolver {
    pub fn new(config: LastFmConfig) -> Result<Self> {
        let user_agent = match &config.user_agent_email {
            Some(email) => format!("ClusterRecommender {}", email),
            None => "ClusterRecommender".to_string(),
        };
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(&user_agent)?);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url,
            last_request: Mutex::new(Instant::now() - RATE_LIMIT_INTERVAL),
        })
    }

    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < RATE_LIMIT_INTERVAL {
            tokio::time::sleep(RATE_LIMIT_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }

    fn track_info_url(&self, track_name: &str, artist_name: &str) -> String {
        format!(
            "{}?method=track.getInfo&api_key={}&artist={}&track={}&format=json",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(artist_name),
            urlencoding::encode(track_name)
        )
    }

    async fn fetch_image_url(&self, track_name: &str, artist_name: &str) -> Result<Option<String>> {
        self.rate_limit().await;

        let response = self
            .client
            .get(self.track_info_url(track_name, artist_name))
            .send()
            .await?;

        if !response.status().is_success() {
            bail!("Last.fm API failed with status {}", response.status());
        }

        let body: TrackInfoResponse = response.json().await?;
        Ok(pick_image_url(body))
    }
}

#[async_trait]
impl ImageResolver for LastFmImageResolver {
    async fn image_url(&self, track_name: &str, artist_name: &str) -> Option<String> {
        match self.fetch_image_url(track_name, artist_name).await {
            Ok(url) => url,
            Err(err) => {
                warn!(
                    "Last.fm image lookup failed for \"{}\" by \"{}\": {}",
                    track_name, artist_name, err
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for LastFmImageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmImageResolver")
            .field("base_url", &self.base_url)
            .finish()
    }
}
