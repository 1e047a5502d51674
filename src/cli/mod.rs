//! Command handlers for the `sonicly` binary.

pub mod config;
pub mod connection;
pub mod discover;
pub mod init;
pub mod play;
pub mod prefs;
pub mod tone;

use owo_colors::OwoColorize;
use std::error::Error;

use sonicly::catalog::TrackCatalogService;
use sonicly::config::Config;
use sonicly::media::Track;
use sonicly::youtube::YouTubeClient;

/// Catalog service backed by the YouTube client from the effective config
pub fn build_catalog(config: &Config) -> Result<TrackCatalogService<YouTubeClient>, Box<dyn Error>> {
    let client = YouTubeClient::from_config(config)?;
    if !client.has_api_key() {
        log::info!("No YouTube API key configured; listings use the built-in catalog");
    }
    Ok(TrackCatalogService::new(client))
}

/// Print tracks as a numbered table, or as JSON with `json`
pub fn print_tracks(heading: &str, tracks: &[Track], json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(tracks)?);
        return Ok(());
    }

    println!("{}", heading.yellow().bold());
    if tracks.is_empty() {
        println!("  {}", "No tracks found".bright_black());
        return Ok(());
    }

    for (i, track) in tracks.iter().enumerate() {
        let tags = match (&track.genre, &track.language) {
            (Some(genre), Some(language)) => format!("[{genre}/{language}]"),
            (Some(genre), None) => format!("[{genre}]"),
            (None, Some(language)) => format!("[{language}]"),
            (None, None) => String::new(),
        };
        println!(
            "  {:>2}. {} {} {} {} {}",
            i + 1,
            track.title.cyan().bold(),
            "by".bright_black(),
            track.artist,
            format!("({})", track.duration_text).bright_black(),
            tags.blue()
        );
        println!("      {}", track.external_video_id.bright_black());
    }
    Ok(())
}
