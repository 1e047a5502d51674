//! Offline lookups over a fixed track list. None of these touch the network.

use crate::media::Track;

pub fn tracks_by_genre(tracks: &[Track], genre: &str) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| t.genre.as_deref() == Some(genre))
        .cloned()
        .collect()
}

pub fn tracks_by_language(tracks: &[Track], language: &str) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| t.language.as_deref() == Some(language))
        .cloned()
        .collect()
}

/// Match on either the catalog id or the YouTube video id
pub fn find_track<'a>(tracks: &'a [Track], id: &str) -> Option<&'a Track> {
    tracks.iter().find(|t| t.id == id || t.external_video_id == id)
}
