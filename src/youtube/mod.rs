//! YouTube Data API v3 integration.
//!
//! [`YouTubeClient`] wraps the search, video-details and trending endpoints
//! and normalizes their JSON into [`TrackResult`]s. [`ExtractionResolver`]
//! turns a video id into a playable stream through the configured
//! extraction service.

pub mod client;
pub mod duration;
pub mod error;
mod response;
pub mod stream;

pub use client::YouTubeClient;
pub use duration::format_iso8601_duration;
pub use error::{ApiError, classify_response};
pub use response::VideoDetails;
pub use stream::{AudioStream, ExtractionResolver};

use serde::{Deserialize, Serialize};

/// One normalized video from a search or trending response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResult {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub duration_text: String,
    pub published_at: String,
    pub view_count: String,
}
