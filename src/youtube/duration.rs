use regex::Regex;
use std::sync::LazyLock;

use crate::constants::UNKNOWN_DURATION;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Format an ISO-8601 duration (`PT#H#M#S`) as `M:SS`, or `H:MM:SS` once the
/// total reaches an hour. Missing components count as zero; anything that is
/// not a `PT` duration becomes `0:00`.
pub fn format_iso8601_duration(iso: &str) -> String {
    let Some(caps) = ISO_DURATION.captures(iso) else {
        return UNKNOWN_DURATION.to_string();
    };

    let component = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let hours = component(1);
    let minutes = component(2);
    let seconds = component(3);

    let total_minutes = hours * 60 + minutes;
    if total_minutes >= 60 {
        format!(
            "{}:{:02}:{:02}",
            total_minutes / 60,
            total_minutes % 60,
            seconds
        )
    } else {
        format!("{total_minutes}:{seconds:02}")
    }
}
