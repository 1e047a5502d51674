//! Track lookup with a built-in fallback.
//!
//! [`TrackCatalogService`] always asks its [`MetadataSource`] first. When the
//! live source errors out or returns nothing, the fixed built-in catalog is
//! used instead, so every listing has something to show. Results are then
//! narrowed to the user's language and genre preferences.

pub mod browse;
mod builtin;
pub mod filter;
pub mod infer;

pub use browse::{find_track, tracks_by_genre, tracks_by_language};
pub use builtin::builtin_tracks;
pub use filter::{filter_by_preferences, filter_or_prefix, matches_preferences};
pub use infer::{infer_genre, infer_language};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{SEARCH_MAX_RESULTS, TRENDING_LEN};
use crate::media::Track;
use crate::ports::MetadataSource;
use crate::preferences::UserMusicPreferences;
use crate::youtube::{ApiError, TrackResult};

/// Convert a live result into a track tagged with a guessed genre and language
pub fn track_from_result(result: &TrackResult) -> Track {
    Track::new(
        &result.video_id,
        &result.title,
        &result.channel_title,
        &result.thumbnail_url,
        &result.duration_text,
        &result.video_id,
    )
    .with_genre(infer_genre(&result.title, &result.channel_title))
    .with_language(infer_language(&result.title, &result.channel_title))
}

/// Shuffle `popular` and keep the first few. An empty list falls back to
/// the head of `catalog`.
pub fn pick_trending<R: Rng + ?Sized>(
    mut popular: Vec<Track>,
    catalog: &[Track],
    rng: &mut R,
) -> Vec<Track> {
    if popular.is_empty() {
        log::warn!("No base tracks available for trending");
        return catalog.iter().take(TRENDING_LEN).cloned().collect();
    }
    popular.shuffle(rng);
    popular.truncate(TRENDING_LEN);
    popular
}

/// Live results converted to tracks, or `None` when the caller should fall
/// back to the catalog
fn live_tracks(operation: &str, result: Result<Vec<TrackResult>, ApiError>) -> Option<Vec<Track>> {
    match result {
        Ok(results) if !results.is_empty() => {
            Some(results.iter().map(track_from_result).collect())
        }
        Ok(_) => {
            log::info!("{operation}: live source returned nothing, using built-in catalog");
            None
        }
        Err(e) if e.is_configuration_missing() => {
            log::info!("{operation}: {e}, using built-in catalog");
            None
        }
        Err(e) => {
            log::warn!("{operation}: live source failed ({e}), using built-in catalog");
            None
        }
    }
}

pub struct TrackCatalogService<S: MetadataSource> {
    source: S,
    catalog: Vec<Track>,
}

impl<S: MetadataSource> TrackCatalogService<S> {
    pub fn new(source: S) -> Self {
        Self::with_catalog(source, builtin_tracks())
    }

    pub fn with_catalog(source: S, catalog: Vec<Track>) -> Self {
        Self { source, catalog }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Trending chart for the user's region, filtered by preference
    pub async fn popular_tracks(&self, prefs: &UserMusicPreferences) -> Vec<Track> {
        let live = live_tracks("popular", self.source.trending(&prefs.region).await);
        filter_or_prefix(live.unwrap_or_else(|| self.catalog.clone()), prefs)
    }

    /// A shuffled selection of [`popular_tracks`](Self::popular_tracks)
    pub async fn trending_tracks(&self, prefs: &UserMusicPreferences) -> Vec<Track> {
        let popular = self.popular_tracks(prefs).await;
        pick_trending(popular, &self.catalog, &mut rand::rng())
    }

    /// Live search; the catalog fallback matches the query against title and
    /// artist, ignoring case
    pub async fn search_tracks(&self, query: &str, prefs: &UserMusicPreferences) -> Vec<Track> {
        let live = live_tracks("search", self.source.search(query, SEARCH_MAX_RESULTS).await);
        let tracks = live.unwrap_or_else(|| self.search_catalog(query));
        filter_or_prefix(tracks, prefs)
    }

    fn search_catalog(&self, query: &str) -> Vec<Track> {
        let needle = query.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.artist.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn tracks_by_genre(&self, genre: &str) -> Vec<Track> {
        browse::tracks_by_genre(&self.catalog, genre)
    }

    pub fn tracks_by_language(&self, language: &str) -> Vec<Track> {
        browse::tracks_by_language(&self.catalog, language)
    }

    /// Look a track up by id in the catalog
    pub fn find(&self, id: &str) -> Option<&Track> {
        browse::find_track(&self.catalog, id)
    }
}
