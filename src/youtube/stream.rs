//! Audio-stream extraction for YouTube videos.
//!
//! The YouTube Data API only exposes metadata, so turning a video id into an
//! audio URL goes through an external extraction service chosen in the
//! config: a RapidAPI YouTube-to-MP3 endpoint, a self-hosted backend, or
//! `demo`, which never resolves and always leads to a synthesized tone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{Config, ExtractionService};
use crate::constants::RAPIDAPI_HOST;
use crate::ports::StreamResolver;

/// A directly playable audio stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStream {
    pub url: String,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub itag: u32,
}

#[derive(Debug, Deserialize)]
struct RapidApiResponse {
    link: Option<String>,
}

/// [`StreamResolver`] backed by the configured extraction service.
#[derive(Debug, Clone)]
pub struct ExtractionResolver {
    http: reqwest::Client,
    service: ExtractionService,
    rapidapi_key: String,
    rapidapi_url: String,
    backend_url: String,
}

impl ExtractionResolver {
    pub fn new(
        service: ExtractionService,
        rapidapi_key: &str,
        backend_url: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            service,
            rapidapi_key: rapidapi_key.trim().to_string(),
            rapidapi_url: format!("https://{RAPIDAPI_HOST}/dl"),
            backend_url: backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.audio_extraction_service,
            &config.rapidapi_key,
            &config.custom_backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Send RapidAPI lookups to `url` instead of the public endpoint
    pub fn with_rapidapi_url(mut self, url: &str) -> Self {
        self.rapidapi_url = url.trim().to_string();
        self
    }

    pub fn service(&self) -> ExtractionService {
        self.service
    }

    async fn rapidapi_stream(&self, video_id: &str) -> Result<Option<AudioStream>, reqwest::Error> {
        if self.rapidapi_key.is_empty() {
            log::warn!("RapidAPI key not configured");
            return Ok(None);
        }

        let response: RapidApiResponse = self
            .http
            .get(&self.rapidapi_url)
            .query(&[("id", video_id)])
            .header("X-RapidAPI-Key", &self.rapidapi_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .link
            .filter(|link| !link.is_empty())
            .map(|url| AudioStream {
                url,
                quality: "medium".to_string(),
                format: "mp3".to_string(),
                itag: 140,
            }))
    }

    async fn backend_stream(&self, video_id: &str) -> Result<Option<AudioStream>, reqwest::Error> {
        let url = format!("{}/api/youtube/audio/{video_id}", self.backend_url);
        let stream: AudioStream = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(Some(stream))
    }
}

#[async_trait]
impl StreamResolver for ExtractionResolver {
    async fn resolve(&self, video_id: &str) -> Option<AudioStream> {
        let result = match self.service {
            ExtractionService::Demo => {
                log::debug!("Demo extraction service selected; no stream for {video_id}");
                Ok(None)
            }
            ExtractionService::RapidApi => self.rapidapi_stream(video_id).await,
            ExtractionService::Custom => self.backend_stream(video_id).await,
        };

        match result {
            Ok(stream) => stream.filter(|s| !s.url.trim().is_empty()),
            Err(e) => {
                log::warn!("{} extraction failed for {video_id}: {e}", self.service);
                None
            }
        }
    }
}
