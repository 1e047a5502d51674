use owo_colors::OwoColorize;
use sonicly::config::{Config, mask_secret};
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;

    println!("Current sonicly configuration:");
    println!("  youtube_api_key: {}", config.masked_api_key());
    println!(
        "  audio_extraction_service: {}",
        config.audio_extraction_service
    );
    println!("  rapidapi_key: {}", mask_secret(&config.rapidapi_key));
    println!("  custom_backend_url: {}", config.custom_backend_url);
    println!("  base_url: {}", config.base_url);
    println!("  sample_rate: {}", config.sample_rate);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!(
        "\n{} {}",
        "Config file:".bright_black(),
        Config::config_path()?.display()
    );

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    // Stored values only; environment overrides are not persisted
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    let shown = if key.ends_with("_key") {
        mask_secret(value.trim())
    } else {
        value.to_string()
    };
    println!("Configuration updated: {key} = {shown}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    if !Config::exists()? {
        return Err("sonicly not initialized. Run 'sonicly init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
