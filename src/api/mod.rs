//! External API for `wasm32-unknown-unknown` target, designed to be used in a
//! web environment with JavaScript, as an external store of a UI framework.

pub mod capture_exception;
pub mod capture_handle;
pub mod local_media_stream;
pub mod media_capture;
pub mod media_devices_handle;
pub mod media_stream_settings;
pub mod recorder_handle;
pub mod recorder_options;
mod snapshot;

use derive_more::Display;
use wasm_bindgen::prelude::*;

use crate::{media, store::RequestState};

#[doc(inline)]
pub use self::{
    capture_exception::CaptureException,
    capture_handle::CaptureHandle,
    local_media_stream::LocalMediaStream,
    media_capture::MediaCapture,
    media_devices_handle::MediaDevicesHandle,
    media_stream_settings::{
        AudioTrackConstraints, DeviceVideoTrackConstraints,
        DisplayVideoTrackConstraints, MediaStreamSettings,
    },
    recorder_handle::RecorderHandle,
    recorder_options::RecorderOptions,
};

/// [MediaStreamTrack.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-kind
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaKind {
    /// Audio track.
    Audio,

    /// Video track.
    Video,
}

impl From<media::MediaKind> for MediaKind {
    #[inline]
    fn from(that: media::MediaKind) -> Self {
        match that {
            media::MediaKind::Audio => Self::Audio,
            media::MediaKind::Video => Self::Video,
        }
    }
}

impl From<MediaKind> for media::MediaKind {
    #[inline]
    fn from(that: MediaKind) -> Self {
        match that {
            MediaKind::Audio => Self::Audio,
            MediaKind::Video => Self::Video,
        }
    }
}

/// Media source type.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaSourceKind {
    /// Media is sourced from some media device (webcam or microphone).
    Device,

    /// Media is obtained via screen capturing.
    Display,
}

impl From<media::MediaSourceKind> for MediaSourceKind {
    #[inline]
    fn from(that: media::MediaSourceKind) -> Self {
        match that {
            media::MediaSourceKind::Device => Self::Device,
            media::MediaSourceKind::Display => Self::Display,
        }
    }
}

impl From<MediaSourceKind> for media::MediaSourceKind {
    #[inline]
    fn from(that: MediaSourceKind) -> Self {
        match that {
            MediaSourceKind::Device => Self::Device,
            MediaSourceKind::Display => Self::Display,
        }
    }
}

/// [MediaDeviceInfo.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadeviceinfo-kind
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaDeviceKind {
    /// Audio input device (for example, a microphone).
    AudioInput,

    /// Video input device (for example, a webcam).
    VideoInput,

    /// Audio output device (for example, a pair of headphones).
    AudioOutput,
}

impl From<media::MediaDeviceKind> for MediaDeviceKind {
    #[inline]
    fn from(that: media::MediaDeviceKind) -> Self {
        match that {
            media::MediaDeviceKind::AudioInput => Self::AudioInput,
            media::MediaDeviceKind::VideoInput => Self::VideoInput,
            media::MediaDeviceKind::AudioOutput => Self::AudioOutput,
        }
    }
}

impl From<MediaDeviceKind> for media::MediaDeviceKind {
    #[inline]
    fn from(that: MediaDeviceKind) -> Self {
        match that {
            MediaDeviceKind::AudioInput => Self::AudioInput,
            MediaDeviceKind::VideoInput => Self::VideoInput,
            MediaDeviceKind::AudioOutput => Self::AudioOutput,
        }
    }
}

/// Describes directions that a camera can face, as seen from a user's
/// perspective. Representation of a [VideoFacingModeEnum][1].
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-videofacingmodeenum
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FacingMode {
    /// Facing towards a user (a self-view camera).
    User,

    /// Facing away from a user (viewing the environment).
    Environment,

    /// Facing to the left of a user.
    Left,

    /// Facing to the right of a user.
    Right,
}

impl From<media::FacingMode> for FacingMode {
    #[inline]
    fn from(that: media::FacingMode) -> Self {
        match that {
            media::FacingMode::User => Self::User,
            media::FacingMode::Environment => Self::Environment,
            media::FacingMode::Left => Self::Left,
            media::FacingMode::Right => Self::Right,
        }
    }
}

impl From<FacingMode> for media::FacingMode {
    #[inline]
    fn from(val: FacingMode) -> Self {
        match val {
            FacingMode::User => Self::User,
            FacingMode::Environment => Self::Environment,
            FacingMode::Left => Self::Left,
            FacingMode::Right => Self::Right,
        }
    }
}

/// Status of an asynchronous request.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RequestStatus {
    /// Request has not been issued yet.
    Idle,

    /// Request is in flight.
    Loading,

    /// Request has completed successfully.
    Ready,

    /// Request has failed.
    Failed,
}

impl<T, E> From<&RequestState<T, E>> for RequestStatus {
    #[inline]
    fn from(state: &RequestState<T, E>) -> Self {
        match state {
            RequestState::Idle => Self::Idle,
            RequestState::Loading => Self::Loading,
            RequestState::Ready(_) => Self::Ready,
            RequestState::Failed(_) => Self::Failed,
        }
    }
}

/// [RecordingState][1] of a recorder.
///
/// [1]: https://w3.org/TR/mediastream-recording#enumdef-recordingstate
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RecordingState {
    /// Recording is not occurring.
    Inactive,

    /// Recording is occurring.
    Recording,

    /// Recording has started and is paused.
    Paused,
}

impl From<media::RecordingState> for RecordingState {
    #[inline]
    fn from(that: media::RecordingState) -> Self {
        match that {
            media::RecordingState::Inactive => Self::Inactive,
            media::RecordingState::Recording => Self::Recording,
            media::RecordingState::Paused => Self::Paused,
        }
    }
}
