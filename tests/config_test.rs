use sonicly::config::{Config, ExtractionService};
use sonicly::preferences::UserMusicPreferences;
use tempfile::TempDir;

// Both halves share XDG_CONFIG_HOME, so they run in one test
#[test]
fn test_config_and_preferences_lifecycle() {
    let temp_dir = TempDir::new().unwrap();

    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // Nothing on disk yet
    assert!(!Config::exists().unwrap());
    let prefs = UserMusicPreferences::load().unwrap();
    assert!(prefs.needs_setup());

    let config = Config::new();
    config.save().unwrap();
    assert!(Config::exists().unwrap());

    let loaded = Config::load().unwrap();
    assert_eq!(loaded.audio_extraction_service, ExtractionService::Demo);
    assert_eq!(loaded.request_timeout_secs, 10);

    let mut config = Config::load().unwrap();
    config.set_value("youtube_api_key", "AIzaTestKey").unwrap();
    config.set_value("audio_extraction_service", "rapidapi").unwrap();
    config.save().unwrap();

    let reloaded = Config::load().unwrap();
    assert_eq!(reloaded.youtube_api_key, "AIzaTestKey");
    assert_eq!(reloaded.audio_extraction_service, ExtractionService::RapidApi);
    assert_eq!(reloaded.masked_api_key(), "*******tKey");

    let mut config = Config::load().unwrap();
    assert!(config.set_value("invalid_key", "value").is_err());

    // Preferences live beside the config file
    let mut prefs = UserMusicPreferences::load().unwrap();
    prefs
        .complete_setup(vec!["ta".to_string(), "te".to_string()], vec!["folk".to_string()])
        .unwrap();
    prefs.set_value("region", "in").unwrap();
    prefs.save().unwrap();

    let path = Config::preferences_path().unwrap();
    assert_eq!(path.parent(), Config::config_path().unwrap().parent());
    assert!(path.exists());

    let reloaded = UserMusicPreferences::load().unwrap();
    assert_eq!(reloaded, prefs);
    assert!(!reloaded.needs_setup());
}
