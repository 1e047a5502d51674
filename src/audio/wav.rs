//! PCM WAV encoding for synthesized demo tones
//!
//! Streams are 16-bit mono RIFF/WAVE with the canonical 44-byte header,
//! written and read back through hound.

use super::PcmBuffer;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use thiserror::Error;

/// Size of the RIFF + fmt + data headers written by [`encode`]
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u32 = 2;

/// Largest data chunk whose RIFF size field still fits in a u32
const MAX_DATA_LEN: usize = u32::MAX as usize - (WAV_HEADER_LEN - 8);

#[derive(Debug, Error)]
pub enum WavError {
    #[error("sample rate {0} Hz cannot be encoded as 16-bit mono")]
    UnsupportedSampleRate(u32),

    #[error("{0} samples exceed the WAV data chunk limit")]
    TooLong(usize),

    #[error("WAV error: {0}")]
    Hound(#[from] hound::Error),
}

/// Header fields read back from an encoded WAV stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_count: u32,
}

impl WavInfo {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count as f64 / self.sample_rate as f64
    }
}

/// Convert a float sample to signed 16-bit, truncating toward zero
fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Mono 16-bit spec for `buffer`, rejecting sizes the header cannot describe
fn spec_for(buffer: &PcmBuffer) -> Result<WavSpec, WavError> {
    if buffer.sample_rate == 0 || buffer.sample_rate.checked_mul(BYTES_PER_SAMPLE).is_none() {
        return Err(WavError::UnsupportedSampleRate(buffer.sample_rate));
    }
    let fits = buffer
        .samples
        .len()
        .checked_mul(BYTES_PER_SAMPLE as usize)
        .is_some_and(|len| len <= MAX_DATA_LEN);
    if !fits {
        return Err(WavError::TooLong(buffer.samples.len()));
    }

    Ok(WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    })
}

fn write_samples<W: Write + Seek>(
    mut writer: WavWriter<W>,
    buffer: &PcmBuffer,
) -> Result<(), WavError> {
    for &sample in &buffer.samples {
        writer.write_sample(quantize(sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Encode a mono PCM buffer as a 16-bit WAV byte stream.
///
/// The output is always exactly `44 + 2 * samples.len()` bytes. An empty
/// buffer still yields a complete header with a zero-length data chunk.
pub fn encode(buffer: &PcmBuffer) -> Result<Vec<u8>, WavError> {
    let spec = spec_for(buffer)?;
    let mut cursor = Cursor::new(Vec::with_capacity(
        WAV_HEADER_LEN + buffer.samples.len() * BYTES_PER_SAMPLE as usize,
    ));
    write_samples(WavWriter::new(&mut cursor, spec)?, buffer)?;
    Ok(cursor.into_inner())
}

/// Encode `buffer` and write it to `path`
pub fn write_wav(path: &Path, buffer: &PcmBuffer) -> Result<(), WavError> {
    let spec = spec_for(buffer)?;
    write_samples(WavWriter::create(path, spec)?, buffer)
}

/// Read the format and length of an encoded WAV stream
pub fn read_wav_info(bytes: &[u8]) -> Result<WavInfo, WavError> {
    let reader = WavReader::new(bytes)?;
    let spec = reader.spec();
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        sample_count: reader.duration(),
    })
}
