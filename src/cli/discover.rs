//! Listing commands: popular, trending, search and catalog browsing.

use owo_colors::OwoColorize;
use sonicly::catalog::{builtin_tracks, tracks_by_genre, tracks_by_language};
use sonicly::config::Config;
use sonicly::preferences::{UserMusicPreferences, genre_by_id, language_by_code};
use sonicly::utils::progress::create_progress_spinner;
use std::error::Error;

use super::{build_catalog, print_tracks};

pub async fn handle_popular(json: bool) -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;
    let prefs = UserMusicPreferences::load()?;
    let catalog = build_catalog(&config)?;

    let spinner = create_progress_spinner("Loading popular tracks...");
    let tracks = catalog.popular_tracks(&prefs).await;
    spinner.finish_and_clear();

    print_tracks(&format!("Popular in {}", prefs.region), &tracks, json)
}

pub async fn handle_trending(json: bool) -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;
    let prefs = UserMusicPreferences::load()?;
    let catalog = build_catalog(&config)?;

    let spinner = create_progress_spinner("Loading trending tracks...");
    let tracks = catalog.trending_tracks(&prefs).await;
    spinner.finish_and_clear();

    print_tracks("Trending now", &tracks, json)
}

pub async fn handle_search(query: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let query = query.trim();
    if query.is_empty() {
        return Err("Search query cannot be empty".into());
    }

    let config = Config::load_effective()?;
    let prefs = UserMusicPreferences::load()?;
    let catalog = build_catalog(&config)?;

    let spinner = create_progress_spinner(&format!("Searching for \"{query}\"..."));
    let tracks = catalog.search_tracks(query, &prefs).await;
    spinner.finish_and_clear();

    print_tracks(&format!("Results for \"{query}\""), &tracks, json)
}

pub fn handle_browse(
    genre: Option<&str>,
    language: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    // Browsing is offline; no client or config needed
    let catalog = builtin_tracks();

    match (genre, language) {
        (Some(genre), _) => {
            let name = genre_by_id(genre).map(|g| g.name).unwrap_or(genre);
            print_tracks(&format!("Genre: {name}"), &tracks_by_genre(&catalog, genre), json)
        }
        (None, Some(language)) => {
            let name = language_by_code(language)
                .map(|l| l.name)
                .unwrap_or(language);
            print_tracks(
                &format!("Language: {name}"),
                &tracks_by_language(&catalog, language),
                json,
            )
        }
        (None, None) => {
            eprintln!(
                "{} pass --genre or --language",
                "Nothing to browse:".yellow()
            );
            print_tracks("Built-in catalog", &catalog, json)
        }
    }
}
