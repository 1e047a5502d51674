//! User music preferences.
//!
//! Preferences pick which languages and genres the catalog filters for and
//! which region trending charts come from. They are stored in
//! `preferences.toml` beside the main config file and edited either through
//! `sonicly prefs setup` or `sonicly prefs set`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::constants::DEFAULT_REGION;

pub const PREFERENCE_KEYS: &[&str] = &["languages", "genres", "region"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const AVAILABLE_LANGUAGES: &[LanguageOption] = &[
    LanguageOption { code: "hi", name: "Hindi", native_name: "हिन्दी" },
    LanguageOption { code: "bn", name: "Bengali", native_name: "বাংলা" },
    LanguageOption { code: "te", name: "Telugu", native_name: "తెలుగు" },
    LanguageOption { code: "ta", name: "Tamil", native_name: "தமிழ்" },
    LanguageOption { code: "mr", name: "Marathi", native_name: "मराठी" },
    LanguageOption { code: "ur", name: "Urdu", native_name: "اردو" },
    LanguageOption { code: "gu", name: "Gujarati", native_name: "ગુજરાતી" },
    LanguageOption { code: "kn", name: "Kannada", native_name: "ಕನ್ನಡ" },
    LanguageOption { code: "ml", name: "Malayalam", native_name: "മലയാളം" },
    LanguageOption { code: "pa", name: "Punjabi", native_name: "ਪੰਜਾਬੀ" },
    LanguageOption { code: "en", name: "English", native_name: "English" },
    LanguageOption { code: "ko", name: "Korean", native_name: "한국어" },
    LanguageOption { code: "ja", name: "Japanese", native_name: "日本語" },
    LanguageOption { code: "es", name: "Spanish", native_name: "Español" },
];

pub const AVAILABLE_GENRES: &[GenreOption] = &[
    GenreOption { id: "bollywood", name: "Bollywood", description: "Popular Hindi film music" },
    GenreOption { id: "classical", name: "Indian Classical", description: "Traditional Hindustani & Carnatic" },
    GenreOption { id: "devotional", name: "Devotional", description: "Bhajans, Kirtan, Spiritual music" },
    GenreOption { id: "folk", name: "Folk", description: "Regional folk music" },
    GenreOption { id: "qawwali", name: "Qawwali", description: "Sufi devotional music" },
    GenreOption { id: "indie", name: "Indie", description: "Independent Indian artists" },
    GenreOption { id: "fusion", name: "Fusion", description: "Indo-Western fusion" },
    GenreOption { id: "pop", name: "Pop", description: "Popular contemporary music" },
    GenreOption { id: "rock", name: "Rock", description: "Rock and alternative music" },
    GenreOption { id: "electronic", name: "Electronic", description: "EDM, Techno, House" },
    GenreOption { id: "hiphop", name: "Hip Hop", description: "Rap and Hip Hop music" },
    GenreOption { id: "jazz", name: "Jazz", description: "Jazz and blues music" },
    GenreOption { id: "kpop", name: "K-Pop", description: "Korean pop music" },
    GenreOption { id: "jpop", name: "J-Pop", description: "Japanese pop music" },
];

pub fn language_by_code(code: &str) -> Option<&'static LanguageOption> {
    AVAILABLE_LANGUAGES.iter().find(|l| l.code == code)
}

pub fn genre_by_id(id: &str) -> Option<&'static GenreOption> {
    AVAILABLE_GENRES.iter().find(|g| g.id == id)
}

/// Genres worth suggesting to someone who listens in `code`
pub fn recommended_genres_for_language(code: &str) -> &'static [&'static str] {
    match code {
        "hi" => &["bollywood", "devotional", "classical", "folk"],
        "bn" => &["folk", "classical", "devotional", "indie"],
        "te" => &["folk", "classical", "bollywood", "devotional"],
        "ta" => &["classical", "folk", "devotional", "bollywood"],
        "mr" => &["folk", "devotional", "bollywood", "classical"],
        "ur" => &["qawwali", "devotional", "classical", "bollywood"],
        "gu" => &["folk", "devotional", "bollywood", "classical"],
        "kn" => &["classical", "folk", "devotional", "bollywood"],
        "ml" => &["classical", "folk", "devotional", "bollywood"],
        "pa" => &["folk", "devotional", "bollywood", "pop"],
        "en" => &["pop", "rock", "indie", "electronic"],
        "ko" => &["kpop", "pop", "electronic", "indie"],
        "ja" => &["jpop", "pop", "electronic", "rock"],
        _ => &["pop", "indie", "rock"],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMusicPreferences {
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub setup_complete: bool,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for UserMusicPreferences {
    fn default() -> Self {
        Self {
            languages: ["hi", "en"].iter().map(|s| s.to_string()).collect(),
            genres: ["bollywood", "pop"].iter().map(|s| s.to_string()).collect(),
            region: default_region(),
            setup_complete: false,
        }
    }
}

impl UserMusicPreferences {
    /// Read preferences from `path`. A missing or unreadable file yields the
    /// defaults; only I/O errors other than "not found" are reported.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        match toml::from_str(&contents) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                log::warn!("Failed to parse {}, using defaults: {e}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Config::preferences_path()?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Config::preferences_path()?)
    }

    pub fn needs_setup(&self) -> bool {
        !self.setup_complete
    }

    /// Replace languages and genres and mark setup as done. Both lists
    /// need at least one entry; otherwise nothing is changed.
    pub fn complete_setup<L, G>(&mut self, languages: L, genres: G) -> Result<(), ConfigError>
    where
        L: IntoIterator<Item = String>,
        G: IntoIterator<Item = String>,
    {
        let languages: BTreeSet<String> = languages.into_iter().collect();
        let genres: BTreeSet<String> = genres.into_iter().collect();
        for (key, items) in [("languages", &languages), ("genres", &genres)] {
            if items.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "select at least one entry".to_string(),
                });
            }
        }

        self.languages = languages;
        self.genres = genres;
        self.setup_complete = true;
        Ok(())
    }

    /// Update one preference from its textual form. Lists are comma
    /// separated and every entry must be a known code.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "languages" => {
                self.languages = parse_list(key, value, |code| language_by_code(code).is_some())?;
            }
            "genres" => {
                self.genres = parse_list(key, value, |id| genre_by_id(id).is_some())?;
            }
            "region" => {
                let region = value.trim().to_uppercase();
                if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: "must be a two-letter country code".to_string(),
                    });
                }
                self.region = region;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Genres recommended for the selected languages, deduplicated, in
    /// first-seen order
    pub fn recommended_genres(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for code in &self.languages {
            for genre in recommended_genres_for_language(code) {
                if !seen.contains(genre) {
                    seen.push(*genre);
                }
            }
        }
        seen
    }
}

fn parse_list(
    key: &str,
    value: &str,
    known: impl Fn(&str) -> bool,
) -> Result<BTreeSet<String>, ConfigError> {
    let mut items = BTreeSet::new();
    for item in value.split(',').map(|s| s.trim().to_lowercase()) {
        if item.is_empty() {
            continue;
        }
        if !known(&item) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("unknown entry '{item}'"),
            });
        }
        items.insert(item);
    }
    if items.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: "select at least one entry".to_string(),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let prefs = UserMusicPreferences::default();
        assert!(prefs.languages.contains("hi"));
        assert!(prefs.languages.contains("en"));
        assert!(prefs.genres.contains("bollywood"));
        assert!(prefs.genres.contains("pop"));
        assert_eq!(prefs.region, "IN");
        assert!(prefs.needs_setup());
    }

    #[test]
    fn test_tables() {
        assert_eq!(AVAILABLE_LANGUAGES.len(), 14);
        assert_eq!(AVAILABLE_GENRES.len(), 14);
        assert_eq!(language_by_code("ta").unwrap().name, "Tamil");
        assert_eq!(genre_by_id("kpop").unwrap().name, "K-Pop");
        assert!(language_by_code("xx").is_none());
    }

    #[test]
    fn test_recommendations() {
        assert_eq!(recommended_genres_for_language("ur")[0], "qawwali");
        // Spanish has no dedicated list
        assert_eq!(recommended_genres_for_language("es"), &["pop", "indie", "rock"]);
        for code in AVAILABLE_LANGUAGES.iter().map(|l| l.code) {
            for genre in recommended_genres_for_language(code) {
                assert!(genre_by_id(genre).is_some(), "{code} recommends unknown {genre}");
            }
        }
    }

    #[test]
    fn test_recommended_genres_deduplicated() {
        let prefs = UserMusicPreferences::default();
        let genres = prefs.recommended_genres();
        // "en" sorts before "hi" in the set
        assert_eq!(genres[0], "pop");
        assert_eq!(genres.iter().filter(|g| **g == "folk").count(), 1);
    }

    #[test]
    fn test_set_value() {
        let mut prefs = UserMusicPreferences::default();

        prefs.set_value("languages", "ta, TE,,pa").unwrap();
        assert_eq!(prefs.languages.len(), 3);
        assert!(prefs.languages.contains("te"));

        // Clearing a list would filter out every track
        assert!(prefs.set_value("genres", "").is_err());
        assert!(prefs.set_value("languages", " , ,").is_err());
        assert_eq!(prefs.languages.len(), 3);
        assert!(!prefs.genres.is_empty());

        assert!(prefs.set_value("genres", "polka").is_err());
        prefs.set_value("region", "us").unwrap();
        assert_eq!(prefs.region, "US");
        assert!(prefs.set_value("region", "USA").is_err());
        assert!(matches!(
            prefs.set_value("volume", "11"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_complete_setup() {
        let mut prefs = UserMusicPreferences::default();
        assert!(prefs.complete_setup(Vec::new(), vec!["kpop".to_string()]).is_err());
        assert!(prefs.complete_setup(vec!["ko".to_string()], Vec::new()).is_err());
        assert!(prefs.needs_setup());
        assert!(prefs.languages.contains("hi"));

        prefs
            .complete_setup(vec!["ko".to_string()], vec!["kpop".to_string()])
            .unwrap();
        assert!(!prefs.needs_setup());
        assert_eq!(prefs.languages.iter().next().unwrap(), "ko");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.toml");

        let mut prefs = UserMusicPreferences::default();
        prefs.set_value("languages", "ja").unwrap();
        prefs.setup_complete = true;
        prefs.save_to(&path).unwrap();

        let loaded = UserMusicPreferences::load_from(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        assert_eq!(
            UserMusicPreferences::load_from(&path).unwrap(),
            UserMusicPreferences::default()
        );

        fs::write(&path, "languages = 7").unwrap();
        assert_eq!(
            UserMusicPreferences::load_from(&path).unwrap(),
            UserMusicPreferences::default()
        );
    }
}
