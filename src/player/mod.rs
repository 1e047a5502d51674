pub mod audio;

pub use audio::{AudioEngine, PlayerError, fetch_audio, play_descriptor};
