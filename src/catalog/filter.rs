use crate::constants::UNFILTERED_PREFIX_LEN;
use crate::media::Track;
use crate::preferences::UserMusicPreferences;

/// True if the track's language or its genre is one the user asked for.
/// Untagged tracks count as English pop.
pub fn matches_preferences(track: &Track, prefs: &UserMusicPreferences) -> bool {
    let language = track.language.as_deref().unwrap_or("en");
    let genre = track.genre.as_deref().unwrap_or("pop");
    prefs.languages.contains(language) || prefs.genres.contains(genre)
}

/// Keep tracks matching the preferences
pub fn filter_by_preferences(tracks: &[Track], prefs: &UserMusicPreferences) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| matches_preferences(t, prefs))
        .cloned()
        .collect()
}

/// Like [`filter_by_preferences`], but an empty match falls back to the
/// head of the unfiltered list.
pub fn filter_or_prefix(tracks: Vec<Track>, prefs: &UserMusicPreferences) -> Vec<Track> {
    let filtered = filter_by_preferences(&tracks, prefs);
    if !filtered.is_empty() {
        return filtered;
    }
    log::debug!("No tracks match preferences, showing the first {UNFILTERED_PREFIX_LEN}");
    tracks.into_iter().take(UNFILTERED_PREFIX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_tracks;

    fn prefs(languages: &[&str], genres: &[&str]) -> UserMusicPreferences {
        UserMusicPreferences {
            languages: languages.iter().map(|s| s.to_string()).collect(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn track(language: Option<&str>, genre: Option<&str>) -> Track {
        let mut t = Track::new("x", "Title", "Artist", "", "1:00", "x");
        t.language = language.map(str::to_string);
        t.genre = genre.map(str::to_string);
        t
    }

    #[test]
    fn test_language_or_genre_match() {
        let p = prefs(&["hi"], &["pop"]);
        assert!(matches_preferences(&track(Some("hi"), Some("bollywood")), &p));
        assert!(matches_preferences(&track(Some("en"), Some("pop")), &p));
        assert!(!matches_preferences(&track(Some("en"), Some("rock")), &p));
    }

    #[test]
    fn test_untagged_defaults() {
        assert!(matches_preferences(&track(None, None), &prefs(&["en"], &[])));
        assert!(matches_preferences(&track(None, None), &prefs(&[], &["pop"])));
        assert!(!matches_preferences(&track(None, None), &prefs(&["hi"], &["folk"])));
    }

    #[test]
    fn test_empty_sets_match_nothing() {
        let tracks = builtin_tracks();
        let empty = prefs(&[], &[]);
        assert!(filter_by_preferences(&tracks, &empty).is_empty());
        assert!(!matches_preferences(&track(None, None), &empty));
        assert_eq!(filter_or_prefix(tracks.clone(), &empty), tracks[..10].to_vec());
    }

    #[test]
    fn test_no_match_falls_back_to_prefix() {
        let tracks = builtin_tracks();
        let result = filter_or_prefix(tracks.clone(), &prefs(&["ja"], &["jazz"]));
        assert_eq!(result, tracks[..10].to_vec());
    }

    #[test]
    fn test_filtered_result_keeps_order() {
        let result = filter_or_prefix(builtin_tracks(), &prefs(&["pa"], &["kpop"]));
        let titles: Vec<_> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["295", "Brown Munde", "Dynamite"]);
    }
}
