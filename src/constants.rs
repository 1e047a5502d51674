//! Project-wide constants used across multiple modules.
//!
//! This module centralizes constant definitions to avoid duplication and ensure
//! consistency across the codebase.

/// Spinner animation characters for progress indicators
pub const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Default YouTube Data API v3 endpoint
pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube video category id for "Music"
pub const MUSIC_CATEGORY_ID: &str = "10";

/// Watch page prefix used to build a track's source URL
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Region used for trending lookups when none is configured
pub const DEFAULT_REGION: &str = "IN";

/// Result count requested from the search endpoint by the catalog service
pub const SEARCH_MAX_RESULTS: u32 = 20;

/// Result count requested from the trending endpoint
pub const TRENDING_MAX_RESULTS: u32 = 20;

/// Placeholders for tracks whose source omits a title or artist
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Duration text used when the details lookup has nothing for a video
pub const UNKNOWN_DURATION: &str = "0:00";

/// Album name reported for every resolved track
pub const ALBUM_NAME: &str = "YouTube Music";

/// Prefix length returned when preference filtering matches nothing
pub const UNFILTERED_PREFIX_LEN: usize = 10;

/// Number of tracks shown in the trending list
pub const TRENDING_LEN: usize = 6;

/// Default sample rate for synthesized demo tones
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Sample rates accepted for synthesized tones
pub const MIN_SAMPLE_RATE: u32 = 8_000;
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// RapidAPI YouTube-to-MP3 host
pub const RAPIDAPI_HOST: &str = "youtube-mp36.p.rapidapi.com";

/// Default custom extraction backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
