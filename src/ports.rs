//! Seams between the services and the outside world.
//!
//! The catalog and playback services only see these traits, so the YouTube
//! client and the extraction backends can be swapped for in-memory fakes.

use async_trait::async_trait;

use crate::youtube::{ApiError, AudioStream, TrackResult};

/// Live music metadata lookups.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<TrackResult>, ApiError>;

    async fn trending(&self, region_code: &str) -> Result<Vec<TrackResult>, ApiError>;
}

/// Turns a video id into a directly playable audio stream.
///
/// Implementations swallow their own failures: `None` means "play something
/// synthetic instead", never "abort".
#[async_trait]
pub trait StreamResolver: Send + Sync {
    async fn resolve(&self, video_id: &str) -> Option<AudioStream>;
}
