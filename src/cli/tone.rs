use owo_colors::OwoColorize;
use sonicly::audio::{ToneSynthesizer, encode, read_wav_info};
use sonicly::config::Config;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Synthesize the demo tone for `seed` and write and/or play it
pub async fn handle_tone(
    seed: &str,
    duration: Option<f64>,
    out: Option<&str>,
    play: bool,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;
    let synthesizer = ToneSynthesizer::new(config.sample_rate);

    let duration = duration.unwrap_or_else(|| ToneSynthesizer::duration_for(seed));
    let buffer = synthesizer.try_synthesize(seed, duration)?;
    let wav = encode(&buffer)?;
    let info = read_wav_info(&wav)?;

    println!(
        "{} {:.2} Hz, {:.2}s, {} samples @ {} Hz ({} bytes)",
        "Tone:".yellow().bold(),
        ToneSynthesizer::frequency_for(seed),
        info.duration_seconds(),
        info.sample_count,
        info.sample_rate,
        wav.len()
    );

    let out = match out {
        Some(path) => Some(PathBuf::from(shellexpand::tilde(path).as_ref())),
        None if !play => Some(PathBuf::from(format!("sonicly-{}.wav", sanitize(seed)))),
        None => None,
    };

    if let Some(path) = out {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &wav)?;
        println!(
            "{} Wrote {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        );
    }

    if play {
        super::play::play_wav(wav).await?;
    }

    Ok(())
}

/// Seed reduced to characters safe in a file name
fn sanitize(seed: &str) -> String {
    let cleaned: String = seed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "tone".to_string()
    } else {
        cleaned
    }
}
