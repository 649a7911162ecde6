//! Jump sound playback through the default output device.
//!
//! Playing is fire-and-forget: each call decodes the clip into a fresh sink,
//! detaches it and returns. Overlapping plays are mixed by rodio; nothing is
//! queued, tracked or awaited.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::GameError;

pub const JUMP_VOLUME: f32 = 1.0 / 3.0;

pub struct AudioManager {
    stream: OutputStream,
    jump_clip: Arc<[u8]>,
}

impl AudioManager {
    /// Opens the default device and checks that the clip decodes, so a bad
    /// file fails at startup rather than on the first jump.
    pub fn new(jump_clip: Vec<u8>) -> Result<Self, GameError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| GameError::Audio(format!("no output device: {e}")))?;
        stream.log_on_drop(false);

        let jump_clip: Arc<[u8]> = Arc::from(jump_clip);
        Decoder::new(Cursor::new(SharedClip(jump_clip.clone())))
            .map_err(|e| GameError::Audio(format!("jump sound does not decode: {e}")))?;

        log::info!("Audio ready ({} byte jump clip)", jump_clip.len());
        Ok(Self { stream, jump_clip })
    }

    pub fn play_jump(&self) {
        self.play_se_with_volume(self.jump_clip.clone(), JUMP_VOLUME);
    }

    fn play_se_with_volume(&self, clip: Arc<[u8]>, volume: f32) {
        match Decoder::new(Cursor::new(SharedClip(clip))) {
            Ok(source) => {
                let sink = Sink::connect_new(self.stream.mixer());
                sink.set_volume(volume.clamp(0.0, 1.0));
                sink.append(source);
                sink.detach();
            }
            Err(e) => log::warn!("Skipping sound effect: {e}"),
        }
    }
}

/// Cheap-to-clone view of an in-memory clip for `Cursor`.
#[derive(Clone)]
struct SharedClip(Arc<[u8]>);

impl AsRef<[u8]> for SharedClip {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
