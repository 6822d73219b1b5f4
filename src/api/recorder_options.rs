//! Options of a media recording.

use std::time::Duration;

use derive_more::{From, Into};
use wasm_bindgen::prelude::*;

use crate::media;

/// Options of a recorder, mirroring [MediaRecorderOptions][1] plus the
/// length of a single recorded segment.
///
/// [1]: https://w3.org/TR/mediastream-recording#mediarecorderoptions-section
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct RecorderOptions(media::RecorderOptions);

#[wasm_bindgen]
impl RecorderOptions {
    /// Creates new [`RecorderOptions`] leaving everything to the User Agent.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        media::RecorderOptions::new().into()
    }

    /// Sets MIME type to record with (`video/webm;codecs=vp9`, for example).
    pub fn mime_type(&mut self, mime_type: String) {
        self.0.mime_type(mime_type);
    }

    /// Sets bitrate of the recorded audio.
    pub fn audio_bits_per_second(&mut self, bps: u32) {
        self.0.audio_bits_per_second(bps);
    }

    /// Sets bitrate of the recorded video.
    pub fn video_bits_per_second(&mut self, bps: u32) {
        self.0.video_bits_per_second(bps);
    }

    /// Sets length of a single recorded segment in milliseconds.
    pub fn timeslice_ms(&mut self, ms: u32) {
        self.0.timeslice(Duration::from_millis(u64::from(ms)));
    }
}

impl Default for RecorderOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
