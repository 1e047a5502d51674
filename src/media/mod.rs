use serde::{Deserialize, Serialize};

use crate::constants::{ALBUM_NAME, UNKNOWN_ARTIST, UNKNOWN_TITLE, YOUTUBE_WATCH_URL};

/// A single piece of music metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail_url: String,
    pub duration_text: String,
    pub external_video_id: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Track {
    /// Build a track keyed by its video id. Blank titles and artists are
    /// replaced with placeholders so nothing reaches the UI empty.
    pub fn new(
        id: &str,
        title: &str,
        artist: &str,
        thumbnail_url: &str,
        duration_text: &str,
        video_id: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: non_blank(title, UNKNOWN_TITLE),
            artist: non_blank(artist, UNKNOWN_ARTIST),
            thumbnail_url: thumbnail_url.to_string(),
            duration_text: duration_text.to_string(),
            external_video_id: video_id.to_string(),
            source_url: watch_url(video_id),
            genre: None,
            language: None,
        }
    }

    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

fn non_blank(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("{YOUTUBE_WATCH_URL}{video_id}")
}

/// Where the audio for a descriptor comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    Remote { url: String },
    /// Encoded WAV bytes of a locally generated placeholder tone
    Synthetic { wav: Vec<u8> },
}

/// The resolved, playable form of a [`Track`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDescriptor {
    pub id: String,
    pub display_name: String,
    pub artist: String,
    pub album: String,
    pub duration_text: String,
    pub source: AudioSource,
    pub thumbnail_url: String,
    pub external_video_id: Option<String>,
}

impl AudioDescriptor {
    pub fn from_track(track: &Track, source: AudioSource) -> Self {
        let external_video_id = if track.external_video_id.is_empty() {
            None
        } else {
            Some(track.external_video_id.clone())
        };

        Self {
            id: track.id.clone(),
            display_name: track.title.clone(),
            artist: track.artist.clone(),
            album: ALBUM_NAME.to_string(),
            duration_text: track.duration_text.clone(),
            source,
            thumbnail_url: track.thumbnail_url.clone(),
            external_video_id,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.source, AudioSource::Synthetic { .. })
    }

    pub fn playable_url(&self) -> Option<&str> {
        match &self.source {
            AudioSource::Remote { url } => Some(url),
            AudioSource::Synthetic { .. } => None,
        }
    }
}
