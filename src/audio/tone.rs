//! Deterministic placeholder tones.
//!
//! Each seed (normally a track id) maps to one of five pitches and a 3-5
//! second duration. The waveform is a major triad: the fundamental plus a
//! major third and a perfect fifth, with a short linear fade at both ends.

use super::PcmBuffer;
use crate::constants::MAX_SAMPLE_RATE;
use std::f64::consts::PI;
use thiserror::Error;

/// A3
pub const BASE_FREQUENCY: f64 = 220.0;

/// Pitches relative to [`BASE_FREQUENCY`]: A3, C4, D4, E4, F4
const FREQUENCY_RATIOS: [f64; 5] = [1.0, 1.125, 1.25, 1.5, 1.667];

const BASE_AMPLITUDE: f64 = 0.1;
const FADE_SECONDS: f64 = 0.1;
const THIRD_RATIO: f64 = 1.25;
const THIRD_GAIN: f64 = 0.5;
const FIFTH_RATIO: f64 = 1.5;
const FIFTH_GAIN: f64 = 0.3;

/// Longest tone we are willing to allocate
const MAX_DURATION_SECONDS: f64 = 600.0;

/// Ten minutes at 48 kHz
const MAX_SAMPLES: f64 = 28_800_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    #[error("tone synthesis unavailable: {0}")]
    Unavailable(String),
}

/// Base-36 digit value of a character; anything else folds into the same range
fn digit_value(c: char) -> u64 {
    c.to_digit(36).unwrap_or(c as u32 % 36) as u64
}

/// Numeric hash of the whole seed, read as a base-36 number
fn seed_hash(seed: &str) -> u64 {
    seed.chars()
        .fold(0u64, |acc, c| acc.wrapping_mul(36).wrapping_add(digit_value(c)))
}

#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    sample_rate: u32,
}

impl ToneSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Pitch selected for a seed
    pub fn frequency_for(seed: &str) -> f64 {
        let index = (seed_hash(seed) % FREQUENCY_RATIOS.len() as u64) as usize;
        BASE_FREQUENCY * FREQUENCY_RATIOS[index]
    }

    /// Duration in seconds selected for a seed, from its last character
    pub fn duration_for(seed: &str) -> f64 {
        let last = seed.chars().last().map(digit_value).unwrap_or(0);
        3.0 + (last % 3) as f64
    }

    /// Tone for a track: pitch and duration both derived from the seed
    pub fn for_track(&self, seed: &str) -> PcmBuffer {
        self.synthesize(seed, Self::duration_for(seed))
    }

    /// Like [`try_synthesize`](Self::try_synthesize) but never fails; an
    /// unusable configuration yields a silent, zero-length buffer.
    pub fn synthesize(&self, seed: &str, duration_seconds: f64) -> PcmBuffer {
        match self.try_synthesize(seed, duration_seconds) {
            Ok(buffer) => buffer,
            Err(e) => {
                log::warn!("{e}; falling back to silence");
                PcmBuffer::silent()
            }
        }
    }

    pub fn try_synthesize(
        &self,
        seed: &str,
        duration_seconds: f64,
    ) -> Result<PcmBuffer, SynthesisError> {
        self.tone(Self::frequency_for(seed), duration_seconds)
    }

    /// Render a triad at `frequency` for `duration_seconds`
    pub fn tone(&self, frequency: f64, duration_seconds: f64) -> Result<PcmBuffer, SynthesisError> {
        if self.sample_rate == 0 {
            return Err(SynthesisError::Unavailable(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            return Err(SynthesisError::Unavailable(format!(
                "sample rate {} Hz exceeds {MAX_SAMPLE_RATE} Hz",
                self.sample_rate
            )));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(SynthesisError::Unavailable(format!(
                "invalid duration {duration_seconds}"
            )));
        }
        if duration_seconds > MAX_DURATION_SECONDS {
            return Err(SynthesisError::Unavailable(format!(
                "duration {duration_seconds}s exceeds {MAX_DURATION_SECONDS}s"
            )));
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SynthesisError::Unavailable(format!(
                "invalid frequency {frequency}"
            )));
        }

        let rate = self.sample_rate as f64;
        let length = (rate * duration_seconds).floor();
        if length > MAX_SAMPLES {
            return Err(SynthesisError::Unavailable(format!(
                "{length} samples exceeds the {MAX_SAMPLES} sample limit"
            )));
        }
        let length = length as usize;
        let samples = (0..length)
            .map(|i| {
                let t = i as f64 / rate;
                let amplitude = BASE_AMPLITUDE * envelope(t, duration_seconds);
                let fundamental = (2.0 * PI * frequency * t).sin();
                let third = (2.0 * PI * frequency * THIRD_RATIO * t).sin() * THIRD_GAIN;
                let fifth = (2.0 * PI * frequency * FIFTH_RATIO * t).sin() * FIFTH_GAIN;
                ((fundamental + third + fifth) * amplitude) as f32
            })
            .collect();

        log::debug!(
            "Synthesized {length} samples at {frequency:.2} Hz ({duration_seconds}s @ {} Hz)",
            self.sample_rate
        );

        Ok(PcmBuffer {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

/// Linear fade-in over the first 100ms, fade-out over the last 100ms
fn envelope(t: f64, duration: f64) -> f64 {
    if t < FADE_SECONDS {
        t / FADE_SECONDS
    } else if t > duration - FADE_SECONDS {
        (duration - t) / FADE_SECONDS
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let synth = ToneSynthesizer::new(8_000);
        for seed in ["s7mDJHGfNVg", "1", "", "héllo wörld", "CdKaAPNH-bU"] {
            let a = synth.synthesize(seed, 1.5);
            let b = synth.synthesize(seed, 1.5);
            assert_eq!(a, b, "seed {seed:?} was not deterministic");
        }
    }

    #[test]
    fn test_frequency_is_one_of_five_pitches() {
        let allowed: Vec<f64> = FREQUENCY_RATIOS.iter().map(|r| r * BASE_FREQUENCY).collect();
        for seed in ["a", "b", "zz", "IJq0yyWug1k", "!!", "15"] {
            let f = ToneSynthesizer::frequency_for(seed);
            assert!(allowed.contains(&f), "{f} not an allowed pitch");
        }
        // Different seeds reach different pitches
        assert_ne!(
            ToneSynthesizer::frequency_for("0"),
            ToneSynthesizer::frequency_for("1")
        );
    }

    #[test]
    fn test_duration_range() {
        assert_eq!(ToneSynthesizer::duration_for("0"), 3.0);
        assert_eq!(ToneSynthesizer::duration_for("1"), 4.0);
        assert_eq!(ToneSynthesizer::duration_for("2"), 5.0);
        assert_eq!(ToneSynthesizer::duration_for(""), 3.0);
        for seed in ["x", "Jw_tbP7y1vA", "4NRXx6U8ABQ"] {
            let d = ToneSynthesizer::duration_for(seed);
            assert!((3.0..=5.0).contains(&d));
        }
    }

    #[test]
    fn test_for_track_length_matches_duration() {
        let synth = ToneSynthesizer::new(1_000);
        let buffer = synth.for_track("2");
        assert_eq!(buffer.samples.len(), 5_000);
        assert_eq!(buffer.sample_rate, 1_000);
    }

    #[test]
    fn test_fade_envelope() {
        let synth = ToneSynthesizer::new(10_000);
        let buffer = synth.tone(440.0, 1.0).unwrap();
        // Starts silent and ramps up
        assert_eq!(buffer.samples[0], 0.0);
        let head_peak = buffer.samples[..100].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let body_peak = buffer.samples[4_000..6_000].iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(head_peak < body_peak);
        // The last sample sits inside the fade-out
        assert!(buffer.samples.last().unwrap().abs() < 0.01);
    }

    #[test]
    fn test_amplitude_bounded() {
        let synth = ToneSynthesizer::new(8_000);
        let buffer = synth.synthesize("Kesariya", 2.0);
        let limit = (BASE_AMPLITUDE * (1.0 + THIRD_GAIN + FIFTH_GAIN)) as f32 + 1e-6;
        assert!(buffer.samples.iter().all(|s| s.abs() <= limit));
        assert!(buffer.samples.iter().any(|s| s.abs() > 0.05));
    }

    #[test]
    fn test_unavailable_degrades_to_silence() {
        let synth = ToneSynthesizer::new(0);
        assert!(matches!(
            synth.try_synthesize("seed", 1.0),
            Err(SynthesisError::Unavailable(_))
        ));
        let buffer = synth.synthesize("seed", 1.0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.sample_rate, 44_100);

        let synth = ToneSynthesizer::new(8_000);
        assert!(synth.try_synthesize("seed", f64::NAN).is_err());
        assert!(synth.try_synthesize("seed", -1.0).is_err());
        assert!(synth.try_synthesize("seed", 3_600.0).is_err());
    }

    #[test]
    fn test_oversized_buffers_are_refused() {
        // Would overflow the WAV byte-rate field
        let synth = ToneSynthesizer::new(3_000_000_000);
        assert!(matches!(
            synth.try_synthesize("seed", 1.0),
            Err(SynthesisError::Unavailable(_))
        ));
        assert!(synth.synthesize("seed", 1.0).is_empty());

        // Within the duration limit but over the sample limit
        let synth = ToneSynthesizer::new(MAX_SAMPLE_RATE);
        assert!(synth.try_synthesize("seed", 599.0).is_err());
        assert_eq!(synth.try_synthesize("seed", 0.5).unwrap().samples.len(), 96_000);
    }

    #[test]
    fn test_zero_duration_is_empty_but_valid() {
        let synth = ToneSynthesizer::new(8_000);
        let buffer = synth.try_synthesize("seed", 0.0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.sample_rate, 8_000);
    }
}
