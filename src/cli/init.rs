use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use owo_colors::OwoColorize;
use sonicly::config::{Config, ExtractionService};
use std::error::Error;

const SERVICES: [ExtractionService; 3] = [
    ExtractionService::Demo,
    ExtractionService::RapidApi,
    ExtractionService::Custom,
];

pub fn handle_init() -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();

    if Config::exists()? {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt("sonicly is already configured. Start over?")
            .default(false)
            .interact()?;
        if !overwrite {
            return Ok(());
        }
    }

    let mut config = Config::new();

    println!(
        "{}",
        "A YouTube Data API v3 key enables live search and trending. Leave it blank to use the built-in catalog."
            .bright_black()
    );
    let api_key: String = Password::with_theme(&theme)
        .with_prompt("YouTube API key")
        .allow_empty_password(true)
        .interact()?;
    config.set_value("youtube_api_key", &api_key)?;

    let labels = [
        "demo (synthesized tones only)",
        "rapidapi (YouTube MP3 via RapidAPI)",
        "custom (self-hosted extraction backend)",
    ];
    let choice = Select::with_theme(&theme)
        .with_prompt("Audio extraction service")
        .items(&labels)
        .default(0)
        .interact()?;
    config.audio_extraction_service = SERVICES[choice];

    match config.audio_extraction_service {
        ExtractionService::RapidApi => {
            let key: String = Password::with_theme(&theme)
                .with_prompt("RapidAPI key")
                .allow_empty_password(true)
                .interact()?;
            config.set_value("rapidapi_key", &key)?;
        }
        ExtractionService::Custom => {
            let url: String = Input::with_theme(&theme)
                .with_prompt("Backend URL")
                .default(config.custom_backend_url.clone())
                .interact_text()?;
            config.set_value("custom_backend_url", &url)?;
        }
        ExtractionService::Demo => {}
    }

    config.save()?;

    println!("{} sonicly initialized", "✓".green().bold());
    println!(
        "Configuration saved to: {}",
        Config::config_path()?.display().to_string().cyan()
    );
    println!(
        "\n{} {}",
        "Next:".yellow().bold(),
        "sonicly prefs setup".cyan()
    );

    Ok(())
}
