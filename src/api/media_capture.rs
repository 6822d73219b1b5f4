//! Entry point of the library.

use wasm_bindgen::prelude::*;

use crate::{
    api::{
        CaptureHandle, MediaDevicesHandle, MediaStreamSettings,
        RecorderHandle, RecorderOptions,
    },
    media::{self, MediaSourceKind},
    platform::{init_logger, set_panic_hook},
};

/// General library interface.
///
/// Creates captures, recorders and gives access to the shared media devices
/// list.
#[wasm_bindgen]
#[derive(Debug)]
pub struct MediaCapture {
    devices: media::DeviceList,
}

#[wasm_bindgen]
impl MediaCapture {
    /// Instantiates new [`MediaCapture`] interface to interact with this
    /// library.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        set_panic_hook();
        init_logger();

        Self {
            devices: media::DeviceList::new(),
        }
    }

    /// Creates new [`CaptureHandle`] acquiring media from media devices
    /// (camera and microphone) with the provided [`MediaStreamSettings`].
    #[must_use]
    pub fn user_media(&self, settings: &MediaStreamSettings) -> CaptureHandle {
        media::Capture::new(MediaSourceKind::Device, settings.clone().into())
            .into()
    }

    /// Creates new [`CaptureHandle`] acquiring media from a display with the
    /// provided [`MediaStreamSettings`].
    #[must_use]
    pub fn display_media(
        &self,
        settings: &MediaStreamSettings,
    ) -> CaptureHandle {
        media::Capture::new(MediaSourceKind::Display, settings.clone().into())
            .into()
    }

    /// Returns [`MediaDevicesHandle`] of the media devices list shared by all
    /// the handles of this [`MediaCapture`].
    #[must_use]
    pub fn media_devices(&self) -> MediaDevicesHandle {
        self.devices.clone().into()
    }

    /// Creates new [`RecorderHandle`] with the provided [`RecorderOptions`].
    #[must_use]
    pub fn recorder(&self, options: &RecorderOptions) -> RecorderHandle {
        media::Recorder::new(options.clone().into()).into()
    }

    /// Indicates whether the provided MIME type can be recorded by the User
    /// Agent.
    #[must_use]
    pub fn is_type_supported(mime_type: &str) -> bool {
        media::Recorder::is_type_supported(mime_type)
    }
}

impl Default for MediaCapture {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
