//! Spinners shown while network requests are in flight.

use crate::constants::SPINNER_CHARS;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a ticking spinner with the standard styling.
///
/// The spinner draws to stderr and hides itself when stderr is not a
/// terminal, so piped output (`--json`) stays clean.
///
/// # Example
///
/// ```ignore
/// let spinner = create_progress_spinner("Searching...");
/// // ... await the request ...
/// spinner.finish_and_clear();
/// ```
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_strings(SPINNER_CHARS));
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_spinner() {
        let spinner = create_progress_spinner("Loading tracks");
        assert_eq!(spinner.message(), "Loading tracks");
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
