//! The fixed catalog served whenever the live source is unavailable.

use crate::media::Track;

/// (id, title, artist, duration, video id, genre, language)
const ENTRIES: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("1", "Kesariya", "Arijit Singh", "4:28", "s7mDJHGfNVg", "bollywood", "hi"),
    ("2", "Agar Tum Saath Ho", "Arijit Singh, Alka Yagnik", "5:41", "sK7riqg2mr4", "bollywood", "hi"),
    ("3", "Raataan Lambiyan", "Jubin Nautiyal, Asees Kaur", "3:23", "wC0xpOEnL4Y", "bollywood", "hi"),
    ("4", "Tum Hi Ho", "Arijit Singh", "4:22", "IJq0yyWug1k", "bollywood", "hi"),
    ("5", "Ve Kamleya", "Arijit Singh, Shreya Ghoshal", "4:15", "CdKaAPNH-bU", "bollywood", "hi"),
    ("6", "Vachindamma", "Sid Sriram", "3:45", "Jw_tbP7y1vA", "folk", "ta"),
    ("7", "Rowdy Baby", "Dhanush, Dhee", "4:08", "x6Q7c9RyMzk", "folk", "ta"),
    ("8", "295", "Sidhu Moose Wala", "4:10", "OLpeX4RRo28", "folk", "pa"),
    ("9", "Brown Munde", "AP Dhillon, Gurinder Gill", "2:57", "VNs_cCtdbPc", "folk", "pa"),
    ("10", "Blinding Lights", "The Weeknd", "3:20", "4NRXx6U8ABQ", "pop", "en"),
    ("11", "Shape of You", "Ed Sheeran", "3:53", "JGwWNGJdvx8", "pop", "en"),
    ("12", "Dynamite", "BTS", "3:19", "gdZLi9oWNZg", "kpop", "ko"),
    ("13", "Hanuman Chalisa", "Hariharan", "7:45", "3EGm9l_kM6w", "devotional", "hi"),
    ("14", "Vande Mataram", "A.R. Rahman", "5:15", "HJmLr6Hka-c", "devotional", "hi"),
    ("15", "Jai Ho", "A.R. Rahman", "5:09", "YR12Z8f1Dh8", "bollywood", "hi"),
];

fn thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/maxresdefault.jpg")
}

pub fn builtin_tracks() -> Vec<Track> {
    ENTRIES
        .iter()
        .map(|&(id, title, artist, duration, video_id, genre, language)| {
            Track::new(id, title, artist, &thumbnail_url(video_id), duration, video_id)
                .with_genre(genre)
                .with_language(language)
        })
        .collect()
}
