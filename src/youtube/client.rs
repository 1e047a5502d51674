use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use super::error::{ApiError, classify_response};
use super::response::{self, VideoDetails};
use super::TrackResult;
use crate::config::Config;
use crate::constants::{MUSIC_CATEGORY_ID, TRENDING_MAX_RESULTS};
use crate::ports::MetadataSource;

/// HTTP client for the YouTube Data API v3.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.trim().to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.youtube_api_key,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn require_key(&self) -> Result<&str, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::ConfigurationMissing);
        }
        Ok(&self.api_key)
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        log::debug!("GET {url}");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = classify_response(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            );
            log::debug!("{endpoint} failed: {err}");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Search music videos matching `query`.
    ///
    /// Durations and view counts come from a second, batched details call;
    /// if that call fails the results are still returned with `0:00`.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<TrackResult>, ApiError> {
        let key = self.require_key()?;
        let max_results = max_results.to_string();

        let body = self
            .get_json(
                "search",
                &[
                    ("key", key),
                    ("q", query),
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("order", "relevance"),
                ],
            )
            .await?;

        let hits = response::search_hits(&body)?;
        if hits.is_empty() {
            log::warn!("No valid video items in search results for {query:?}");
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = hits.iter().map(|h| h.video_id.as_str()).collect();
        let details = self.video_details(&ids).await;

        Ok(response::search_results(hits, &details))
    }

    /// Batch duration/view-count lookup. Never fails: any error yields an
    /// empty map and callers fall back to default details.
    pub async fn video_details(&self, video_ids: &[&str]) -> HashMap<String, VideoDetails> {
        let Ok(key) = self.require_key() else {
            return HashMap::new();
        };
        let ids = video_ids.join(",");

        let result = self
            .get_json(
                "videos",
                &[("key", key), ("id", ids.as_str()), ("part", "contentDetails,statistics")],
            )
            .await
            .and_then(|body| response::video_details(&body));

        match result {
            Ok(details) => details,
            Err(e) => {
                log::warn!("Video details lookup failed, using default durations: {e}");
                HashMap::new()
            }
        }
    }

    /// Most popular music videos for a region
    pub async fn trending(&self, region_code: &str) -> Result<Vec<TrackResult>, ApiError> {
        let key = self.require_key()?;
        let max_results = TRENDING_MAX_RESULTS.to_string();

        let body = self
            .get_json(
                "videos",
                &[
                    ("key", key),
                    ("part", "snippet,contentDetails,statistics"),
                    ("chart", "mostPopular"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("regionCode", region_code),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        response::trending_results(&body)
    }

    /// One-result search used to validate a configured key
    pub async fn test_connection(&self) -> Result<bool, ApiError> {
        Ok(!self.search("test music", 1).await?.is_empty())
    }
}

#[async_trait]
impl MetadataSource for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<TrackResult>, ApiError> {
        YouTubeClient::search(self, query, max_results).await
    }

    async fn trending(&self, region_code: &str) -> Result<Vec<TrackResult>, ApiError> {
        YouTubeClient::trending(self, region_code).await
    }
}
