//! Turning tracks into something playable.
//!
//! [`PlaybackResolver`] asks the configured [`StreamResolver`] for a real
//! audio stream and falls back to a synthesized tone, so resolving a track
//! always succeeds. [`PlaybackSession`] holds the one track that is loaded
//! at a time; when loads overlap, only the most recently started one wins.

use crate::audio::{PcmBuffer, ToneSynthesizer, encode};
use crate::media::{AudioDescriptor, AudioSource, Track};
use crate::ports::StreamResolver;

pub struct PlaybackResolver<R: StreamResolver> {
    streams: R,
    synthesizer: ToneSynthesizer,
}

impl<R: StreamResolver> PlaybackResolver<R> {
    pub fn new(streams: R, synthesizer: ToneSynthesizer) -> Self {
        Self {
            streams,
            synthesizer,
        }
    }

    /// Remote stream when one resolves, placeholder tone otherwise
    pub async fn resolve(&self, track: &Track) -> AudioDescriptor {
        if !track.external_video_id.is_empty() {
            if let Some(stream) = self.streams.resolve(&track.external_video_id).await {
                log::debug!(
                    "Resolved {} to {} stream ({})",
                    track.id,
                    stream.format,
                    stream.quality
                );
                return AudioDescriptor::from_track(track, AudioSource::Remote { url: stream.url });
            }
        }

        log::info!("No audio stream for '{}', using a demo tone", track.title);
        AudioDescriptor::from_track(track, self.synthetic_source(&track.id))
    }

    fn synthetic_source(&self, seed: &str) -> AudioSource {
        let buffer = self.synthesizer.for_track(seed);
        let wav = encode(&buffer).unwrap_or_else(|e| {
            log::warn!("Could not encode tone for '{seed}': {e}");
            encode(&PcmBuffer::silent()).unwrap_or_default()
        });
        AudioSource::Synthetic { wav }
    }
}

/// Handle for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct PlaybackSession {
    current: Option<AudioDescriptor>,
    latest_ticket: u64,
    pending: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any load already in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.pending = true;
        LoadTicket(self.latest_ticket)
    }

    /// Install `descriptor` if `ticket` is still the latest load. Returns
    /// whether it was installed; stale results are dropped.
    pub fn complete_load(&mut self, ticket: LoadTicket, descriptor: AudioDescriptor) -> bool {
        if ticket.0 != self.latest_ticket {
            log::debug!(
                "Discarding stale load of '{}' (ticket {} < {})",
                descriptor.display_name,
                ticket.0,
                self.latest_ticket
            );
            return false;
        }
        self.current = Some(descriptor);
        self.pending = false;
        true
    }

    pub fn current(&self) -> Option<&AudioDescriptor> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Resolve and install a track in one step
    pub async fn load<R: StreamResolver>(
        &mut self,
        resolver: &PlaybackResolver<R>,
        track: &Track,
    ) -> Option<&AudioDescriptor> {
        let ticket = self.begin_load();
        let descriptor = resolver.resolve(track).await;
        self.complete_load(ticket, descriptor);
        self.current()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
