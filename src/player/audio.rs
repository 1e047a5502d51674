//! Audio output through rodio.
//!
//! Synthetic descriptors already carry WAV bytes; remote descriptors are
//! downloaded first. Either way the bytes are decoded by rodio and played on
//! the default output device.

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;

use crate::media::{AudioDescriptor, AudioSource};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("audio output unavailable: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("unable to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("playback task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct AudioEngine {
    _stream: OutputStream,
    sink: Sink,
}

impl AudioEngine {
    pub fn new() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    /// Decode `bytes` and queue them. Returns the decoded duration when the
    /// format reports one.
    pub fn append_bytes(&self, bytes: Vec<u8>) -> Result<Option<Duration>, PlayerError> {
        let source = Decoder::new(Cursor::new(bytes))?;
        let duration = source.total_duration();
        log::info!(
            "Queued audio: {} Hz, {} channel(s), duration {:?}",
            source.sample_rate(),
            source.channels(),
            duration
        );
        self.sink.append(source);
        Ok(duration)
    }

    pub fn play(&self) {
        self.sink.play();
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    /// Block the current thread until the queue drains
    pub fn wait_until_end(&self) {
        self.sink.sleep_until_end();
    }
}

/// Fetch the audio bytes behind a descriptor
pub async fn fetch_audio(
    descriptor: &AudioDescriptor,
    timeout: Duration,
) -> Result<Vec<u8>, PlayerError> {
    match &descriptor.source {
        AudioSource::Synthetic { wav } => Ok(wav.clone()),
        AudioSource::Remote { url } => {
            log::debug!("Downloading {url}");
            let http = reqwest::Client::builder().timeout(timeout).build()?;
            let bytes = http.get(url).send().await?.error_for_status()?.bytes().await?;
            Ok(bytes.to_vec())
        }
    }
}

/// Play a descriptor to completion on the default output device.
///
/// The output stream is not `Send`, so decoding and playback run on a
/// blocking thread.
pub async fn play_descriptor(
    descriptor: &AudioDescriptor,
    volume: f32,
    download_timeout: Duration,
) -> Result<(), PlayerError> {
    let bytes = fetch_audio(descriptor, download_timeout).await?;

    tokio::task::spawn_blocking(move || -> Result<(), PlayerError> {
        let engine = AudioEngine::new()?;
        engine.set_volume(volume);
        engine.append_bytes(bytes)?;
        engine.wait_until_end();
        Ok(())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{ToneSynthesizer, encode};
    use crate::media::Track;

    fn synthetic_descriptor() -> AudioDescriptor {
        let wav = encode(&ToneSynthesizer::new(8_000).for_track("1")).unwrap();
        let track = Track::new("1", "Kesariya", "Arijit Singh", "", "4:28", "");
        AudioDescriptor::from_track(&track, AudioSource::Synthetic { wav })
    }

    #[tokio::test]
    async fn test_fetch_synthetic_is_local() {
        let descriptor = synthetic_descriptor();
        let bytes = fetch_audio(&descriptor, Duration::from_secs(1)).await.unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_remote_fails() {
        let track = Track::new("1", "t", "a", "", "0:00", "x");
        let descriptor = AudioDescriptor::from_track(
            &track,
            AudioSource::Remote {
                url: "http://127.0.0.1:9/audio.mp3".to_string(),
            },
        );
        let result = fetch_audio(&descriptor, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(PlayerError::Download(_))));
    }

    #[test]
    fn test_engine_volume_and_decode() {
        // Machines without an output device skip the rest
        let Ok(engine) = AudioEngine::new() else {
            eprintln!("Skipping audio test: no output device");
            return;
        };

        engine.set_volume(0.5);
        assert_eq!(engine.volume(), 0.5);

        engine.pause();
        let AudioSource::Synthetic { wav } = synthetic_descriptor().source else {
            unreachable!();
        };
        assert!(engine.append_bytes(wav).is_ok());
        assert!(!engine.is_finished());

        assert!(engine.append_bytes(b"not audio".to_vec()).is_err());
    }
}
