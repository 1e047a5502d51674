//! Demo audio generation.
//!
//! When no real stream can be resolved for a track, a short placeholder tone
//! is synthesized from the track id and encoded as a WAV stream that any audio
//! sink can play.

pub mod tone;
pub mod wav;

pub use tone::{SynthesisError, ToneSynthesizer};
pub use wav::{WavError, WavInfo, encode, read_wav_info, write_wav};

use crate::constants::DEFAULT_SAMPLE_RATE;

/// Mono floating-point samples in `[-1, 1]` at a fixed sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl PcmBuffer {
    /// Zero-length buffer used when synthesis is unavailable
    pub fn silent() -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    pub fn channels(&self) -> u16 {
        1
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
