use dialoguer::{Input, MultiSelect, theme::ColorfulTheme};
use owo_colors::OwoColorize;
use sonicly::config::Config;
use sonicly::preferences::{
    AVAILABLE_GENRES, AVAILABLE_LANGUAGES, UserMusicPreferences, genre_by_id, language_by_code,
};
use std::error::Error;

pub fn handle_prefs_view() -> Result<(), Box<dyn Error>> {
    let prefs = UserMusicPreferences::load()?;

    println!("{}", "Music preferences:".yellow().bold());
    println!("  languages:");
    for code in &prefs.languages {
        match language_by_code(code) {
            Some(lang) => println!("    {} {} ({})", code.cyan(), lang.name, lang.native_name),
            None => println!("    {}", code.cyan()),
        }
    }
    println!("  genres:");
    for id in &prefs.genres {
        match genre_by_id(id) {
            Some(genre) => println!(
                "    {} {} {}",
                id.cyan(),
                genre.name,
                format!("- {}", genre.description).bright_black()
            ),
            None => println!("    {}", id.cyan()),
        }
    }
    println!("  region: {}", prefs.region);
    if prefs.needs_setup() {
        println!(
            "\n{} run {} to pick your own",
            "Using defaults;".bright_black(),
            "sonicly prefs setup".cyan()
        );
    }

    let recommended = prefs.recommended_genres();
    if !recommended.is_empty() {
        println!(
            "\n{} {}",
            "Recommended genres:".bright_black(),
            recommended.join(", ")
        );
    }

    Ok(())
}

pub fn handle_prefs_setup() -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();
    let mut prefs = UserMusicPreferences::load()?;

    let language_labels: Vec<String> = AVAILABLE_LANGUAGES
        .iter()
        .map(|l| format!("{} ({})", l.name, l.native_name))
        .collect();
    let language_defaults: Vec<bool> = AVAILABLE_LANGUAGES
        .iter()
        .map(|l| prefs.languages.contains(l.code))
        .collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Languages you listen to (space to toggle)")
        .items(&language_labels)
        .defaults(&language_defaults)
        .interact()?;
    let languages: Vec<String> = picked
        .iter()
        .map(|&i| AVAILABLE_LANGUAGES[i].code.to_string())
        .collect();
    if languages.is_empty() {
        return Err("Select at least one language".into());
    }

    // Pre-select genres recommended for the chosen languages
    let mut draft = prefs.clone();
    draft.languages = languages.iter().cloned().collect();
    let recommended = draft.recommended_genres();

    let genre_labels: Vec<String> = AVAILABLE_GENRES
        .iter()
        .map(|g| format!("{} - {}", g.name, g.description))
        .collect();
    let genre_defaults: Vec<bool> = AVAILABLE_GENRES
        .iter()
        .map(|g| prefs.genres.contains(g.id) || recommended.contains(&g.id))
        .collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("Genres you enjoy")
        .items(&genre_labels)
        .defaults(&genre_defaults)
        .interact()?;
    let genres: Vec<String> = picked
        .iter()
        .map(|&i| AVAILABLE_GENRES[i].id.to_string())
        .collect();
    if genres.is_empty() {
        return Err("Select at least one genre".into());
    }

    let region: String = Input::with_theme(&theme)
        .with_prompt("Region for trending charts")
        .default(prefs.region.clone())
        .interact_text()?;
    prefs.set_value("region", &region)?;

    prefs.complete_setup(languages, genres)?;
    prefs.save()?;

    println!(
        "{} Preferences saved to {}",
        "✓".green().bold(),
        Config::preferences_path()?.display().to_string().cyan()
    );

    Ok(())
}

pub fn handle_prefs_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut prefs = UserMusicPreferences::load()?;

    prefs.set_value(key, value)?;
    prefs.save()?;

    println!("Preferences updated: {key} = {value}");

    Ok(())
}

pub fn handle_prefs_reset() -> Result<(), Box<dyn Error>> {
    UserMusicPreferences::default().save()?;
    println!("Preferences reset to defaults");
    Ok(())
}
