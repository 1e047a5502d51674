//! Sonicly: music discovery over the YouTube Data API with a built-in
//! catalog fallback and synthesized demo tones when no audio stream can be
//! resolved.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod logging;
pub mod media;
pub mod playback;
pub mod ports;
pub mod preferences;
pub mod utils;
pub mod youtube;

#[cfg(feature = "player")]
pub mod player;
