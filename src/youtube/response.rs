//! Wire shapes of the YouTube Data API v3 responses we consume, and their
//! normalization into [`TrackResult`]s.
//!
//! Every field is optional on the wire. Items that fail to decode or lack a
//! video id are dropped; missing snippet fields fall back to placeholders.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::duration::format_iso8601_duration;
use super::error::ApiError;
use super::TrackResult;
use crate::constants::{UNKNOWN_ARTIST, UNKNOWN_DURATION, UNKNOWN_TITLE};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: Option<String>,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
}

impl VideoItem {
    fn details(&self) -> VideoDetails {
        VideoDetails {
            duration_text: format_iso8601_duration(
                self.content_details.duration.as_deref().unwrap_or("PT0S"),
            ),
            view_count: self
                .statistics
                .view_count
                .clone()
                .unwrap_or_else(|| "0".to_string()),
        }
    }
}

/// Duration and view count for one video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub duration_text: String,
    pub view_count: String,
}

impl Default for VideoDetails {
    fn default() -> Self {
        Self {
            duration_text: UNKNOWN_DURATION.to_string(),
            view_count: "0".to_string(),
        }
    }
}

/// Decode the `items` array, rejecting bodies that do not have one
fn items<T: DeserializeOwned>(body: &serde_json::Value) -> Result<Vec<T>, ApiError> {
    let items = body
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ApiError::MalformedResponse("response has no items list".to_string()))?;

    Ok(items
        .iter()
        .filter_map(|item| serde_json::from_value::<T>(item.clone()).ok())
        .collect())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn thumbnail_url(snippet: &Snippet) -> String {
    [&snippet.thumbnails.high, &snippet.thumbnails.default]
        .into_iter()
        .flatten()
        .find_map(|t| non_empty(t.url.clone()))
        .unwrap_or_default()
}

fn result_from_snippet(video_id: String, snippet: Snippet, details: VideoDetails) -> TrackResult {
    let thumbnail_url = thumbnail_url(&snippet);
    TrackResult {
        video_id,
        title: non_empty(snippet.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        channel_title: non_empty(snippet.channel_title)
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        thumbnail_url,
        duration_text: details.duration_text,
        published_at: non_empty(snippet.published_at)
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        view_count: details.view_count,
    }
}

/// Search hits that carry a video id, in response order. Details are
/// attached by [`search_results`] once the batch lookup is done.
pub(crate) fn search_hits(body: &serde_json::Value) -> Result<Vec<SearchHit>, ApiError> {
    Ok(items::<SearchItem>(body)?
        .into_iter()
        .filter_map(|item| {
            non_empty(item.id.video_id).map(|video_id| SearchHit {
                video_id,
                snippet: item.snippet,
            })
        })
        .collect())
}

pub(crate) struct SearchHit {
    pub(crate) video_id: String,
    snippet: Snippet,
}

/// Attach looked-up details to search hits; unknown ids get defaults
pub(crate) fn search_results(
    hits: Vec<SearchHit>,
    details: &HashMap<String, VideoDetails>,
) -> Vec<TrackResult> {
    hits.into_iter()
        .map(|hit| {
            let found = details.get(&hit.video_id).cloned().unwrap_or_default();
            result_from_snippet(hit.video_id, hit.snippet, found)
        })
        .collect()
}

/// Parse a `videos?part=contentDetails,statistics` response keyed by id
pub(crate) fn video_details(
    body: &serde_json::Value,
) -> Result<HashMap<String, VideoDetails>, ApiError> {
    Ok(items::<VideoItem>(body)?
        .into_iter()
        .filter_map(|item| {
            let details = item.details();
            Some((non_empty(item.id)?, details))
        })
        .collect())
}

/// Parse a `videos?chart=mostPopular` response
pub(crate) fn trending_results(body: &serde_json::Value) -> Result<Vec<TrackResult>, ApiError> {
    Ok(items::<VideoItem>(body)?
        .into_iter()
        .filter_map(|item| {
            let details = item.details();
            let id = non_empty(item.id)?;
            Some(result_from_snippet(id, item.snippet, details))
        })
        .collect())
}
