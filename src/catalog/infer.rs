//! Best-effort genre and language guesses for live results.
//!
//! The API does not tag videos with a genre or language, so both are guessed
//! from keywords in the title and channel name and from the script the title
//! is written in.

const DEFAULT_GENRE: &str = "pop";
const DEFAULT_LANGUAGE: &str = "en";

const GENRE_KEYWORDS: &[(&str, &[&str])] = &[
    ("bollywood", &["bollywood", "hindi", "arijit", "shreya"]),
    ("classical", &["classical", "raag", "carnatic"]),
    ("devotional", &["devotional", "bhajan", "hanuman", "krishna"]),
    ("folk", &["folk", "punjabi", "bhangra"]),
    ("qawwali", &["qawwali", "sufi"]),
    ("kpop", &["kpop", "bts", "blackpink"]),
];

/// Language keywords paired with the Unicode block of the language's script
const LANGUAGE_RULES: &[(&str, &[&str], Option<(char, char)>)] = &[
    (
        "hi",
        &["arijit", "shreya", "bollywood", "hindi"],
        Some(('\u{0900}', '\u{097F}')),
    ),
    ("ta", &["tamil", "kollywood"], Some(('\u{0B80}', '\u{0BFF}'))),
    ("te", &["telugu", "tollywood"], Some(('\u{0C00}', '\u{0C7F}'))),
    ("pa", &["punjabi", "bhangra", "sidhu"], None),
    ("ko", &["kpop", "bts", "korean"], Some(('\u{AC00}', '\u{D7AF}'))),
];

fn search_text(title: &str, artist: &str) -> String {
    format!("{title} {artist}").to_lowercase()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn uses_script(title: &str, (start, end): (char, char)) -> bool {
    title.chars().any(|c| (start..=end).contains(&c))
}

pub fn infer_genre(title: &str, artist: &str) -> &'static str {
    let text = search_text(title, artist);
    GENRE_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&text, keywords))
        .map(|(genre, _)| *genre)
        .unwrap_or(DEFAULT_GENRE)
}

pub fn infer_language(title: &str, artist: &str) -> &'static str {
    let text = search_text(title, artist);
    LANGUAGE_RULES
        .iter()
        .find(|(_, keywords, script)| {
            contains_any(&text, keywords) || script.is_some_and(|range| uses_script(title, range))
        })
        .map(|(code, _, _)| *code)
        .unwrap_or(DEFAULT_LANGUAGE)
}
