use owo_colors::OwoColorize;
use sonicly::config::Config;
use sonicly::utils::progress::create_progress_spinner;
use sonicly::youtube::{ApiError, YouTubeClient};
use std::error::Error;

pub async fn handle_test_connection() -> Result<(), Box<dyn Error>> {
    let config = Config::load_effective()?;
    let client = YouTubeClient::from_config(&config)?;

    if !client.has_api_key() {
        return Err(
            "No YouTube API key configured. Run 'sonicly config set youtube_api_key <key>' first."
                .into(),
        );
    }

    println!("Using key {}", config.masked_api_key().cyan());
    let spinner = create_progress_spinner("Contacting the YouTube Data API...");
    let result = client.test_connection().await;
    spinner.finish_and_clear();

    match result {
        Ok(true) => {
            println!("{} YouTube API connection works", "✓".green().bold());
            Ok(())
        }
        Ok(false) => {
            println!(
                "{} Connected, but the test search returned no results",
                "!".yellow().bold()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            if let ApiError::UpstreamAuth { .. } = e {
                eprintln!(
                    "  {}",
                    "Check the key in the Google Cloud Console.".bright_black()
                );
            }
            Err("YouTube API connection test failed".into())
        }
    }
}
