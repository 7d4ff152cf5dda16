//! HTTP client for end-to-end tests
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn post_json(&self, path: &str, body: Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Posts `body` verbatim, without a JSON content type.
    pub async fn post_raw(&self, path: &str, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_status(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Status request failed")
    }

    pub async fn get_filters(&self) -> Response {
        self.client
            .get(format!("{}/filters", self.base_url))
            .send()
            .await
            .expect("Filters request failed")
    }

    pub async fn recommend_song(&self, song_name: &str) -> Response {
        self.post_json("/recommend-song", json!({ "song_name": song_name }))
            .await
    }

    pub async fn search_artist(&self, artist: &str) -> Response {
        self.post_json("/search-artist", json!({ "artist": artist }))
            .await
    }

    pub async fn search_genre(&self, genre: &str) -> Response {
        self.post_json("/search-genre", json!({ "genre": genre }))
            .await
    }

    /// `year` is sent as given, so tests can pass numbers or strings.
    pub async fn search_year(&self, year: Value) -> Response {
        self.post_json("/search-year", json!({ "year": year })).await
    }
}
