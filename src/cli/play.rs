use owo_colors::OwoColorize;
use sonicly::audio::ToneSynthesizer;
use sonicly::config::Config;
use sonicly::media::{AudioDescriptor, AudioSource, Track};
use sonicly::playback::{PlaybackResolver, PlaybackSession};
use sonicly::preferences::UserMusicPreferences;
use sonicly::utils::progress::create_progress_spinner;
use sonicly::youtube::ExtractionResolver;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use super::build_catalog;

/// Find a track by catalog id, video id, or search query, resolve it and
/// play it (or save the synthetic tone with `--out`)
pub async fn handle_play(query: &str, out: Option<&str>) -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;
    let prefs = UserMusicPreferences::load()?;
    let catalog = build_catalog(&config)?;

    let track = match catalog.find(query) {
        Some(track) => track.clone(),
        None => {
            let spinner = create_progress_spinner(&format!("Looking up \"{query}\"..."));
            let results = catalog.search_tracks(query, &prefs).await;
            spinner.finish_and_clear();
            first_track(results, query)?
        }
    };

    let resolver = PlaybackResolver::new(
        ExtractionResolver::from_config(&config)?,
        ToneSynthesizer::new(config.sample_rate),
    );
    let mut session = PlaybackSession::new();

    let spinner = create_progress_spinner(&format!(
        "Resolving audio via {}...",
        config.audio_extraction_service
    ));
    let descriptor = session
        .load(&resolver, &track)
        .await
        .cloned()
        .ok_or("No audio loaded")?;
    spinner.finish_and_clear();

    print_now_playing(&descriptor);

    if let Some(path) = out {
        let AudioSource::Synthetic { wav } = &descriptor.source else {
            return Err("Only demo tones can be saved; this track resolved to a remote stream".into());
        };
        let path = PathBuf::from(shellexpand::tilde(path).as_ref());
        fs::write(&path, wav)?;
        println!(
            "{} Wrote {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        );
        return Ok(());
    }

    play_descriptor(&descriptor, &config).await
}

fn first_track(results: Vec<Track>, query: &str) -> Result<Track, Box<dyn Error>> {
    results
        .into_iter()
        .next()
        .ok_or_else(|| format!("No track matches \"{query}\"").into())
}

fn print_now_playing(descriptor: &AudioDescriptor) {
    println!(
        "{} {} {} {}",
        "♪".cyan(),
        descriptor.display_name.bold(),
        "by".bright_black(),
        descriptor.artist
    );
    println!(
        "  {} {}  {} {}",
        "album:".bright_black(),
        descriptor.album,
        "length:".bright_black(),
        descriptor.duration_text
    );
    match descriptor.playable_url() {
        Some(url) => println!("  {} {}", "stream:".bright_black(), url),
        None => println!(
            "  {} {}",
            "stream:".bright_black(),
            "demo tone (no audio stream available)".yellow()
        ),
    }
}

#[cfg(feature = "player")]
async fn play_descriptor(descriptor: &AudioDescriptor, config: &Config) -> Result<(), Box<dyn Error>> {
    let timeout = std::time::Duration::from_secs(config.request_timeout_secs.max(30));
    sonicly::player::play_descriptor(descriptor, 1.0, timeout).await?;
    Ok(())
}

#[cfg(not(feature = "player"))]
async fn play_descriptor(_descriptor: &AudioDescriptor, _config: &Config) -> Result<(), Box<dyn Error>> {
    print_player_note();
    Ok(())
}

/// Play raw WAV bytes through the output device
#[cfg(feature = "player")]
pub async fn play_wav(wav: Vec<u8>) -> Result<(), Box<dyn Error>> {
    let track = Track::new("tone", "Demo tone", "sonicly", "", "", "");
    let descriptor = AudioDescriptor::from_track(&track, AudioSource::Synthetic { wav });
    sonicly::player::play_descriptor(&descriptor, 1.0, std::time::Duration::from_secs(1)).await?;
    Ok(())
}

#[cfg(not(feature = "player"))]
pub async fn play_wav(_wav: Vec<u8>) -> Result<(), Box<dyn Error>> {
    print_player_note();
    Ok(())
}

#[cfg(not(feature = "player"))]
fn print_player_note() {
    println!(
        "{} Audio output requires the 'player' feature to be enabled.",
        "Note:".yellow()
    );
    println!("To enable it, install with:");
    println!("  {}", "cargo install sonicly --features player".cyan());
    println!("Or write the audio to a file with {}", "--out".cyan());
}
