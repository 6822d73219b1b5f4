//! Media capturing, devices enumeration and recording.

pub mod capture;
pub mod constraints;
pub mod devices;
pub mod recorder;
pub mod stream;

use derive_more::Display;
use serde::Serialize;

#[doc(inline)]
pub use self::{
    capture::{Capture, CaptureError, CaptureState},
    constraints::{
        AudioTrackConstraints, ConstrainU32, DeviceVideoTrackConstraints,
        DisplayVideoTrackConstraints, MediaStreamSettings,
    },
    devices::{DeviceList, DeviceListState, DevicesError},
    recorder::{
        Recorder, RecorderError, RecorderOptions, RecorderSnapshot, Segment,
    },
    stream::LocalMediaStream,
};

/// [MediaStreamTrack.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-kind
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MediaKind {
    /// Audio track.
    #[display(fmt = "audio")]
    Audio,

    /// Video track.
    #[display(fmt = "video")]
    Video,
}

/// Media source type.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MediaSourceKind {
    /// Media is sourced from some media device (webcam or microphone).
    #[display(fmt = "device")]
    Device,

    /// Media is obtained via screen capturing.
    #[display(fmt = "display")]
    Display,
}

/// [MediaDeviceInfo.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadeviceinfo-kind
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaDeviceKind {
    /// Audio input device (for example, a microphone).
    #[display(fmt = "audioinput")]
    AudioInput,

    /// Video input device (for example, a webcam).
    #[display(fmt = "videoinput")]
    VideoInput,

    /// Audio output device (for example, a pair of headphones).
    #[display(fmt = "audiooutput")]
    AudioOutput,
}

impl MediaDeviceKind {
    /// Returns [`MediaKind`] of the media this device produces or consumes.
    #[inline]
    #[must_use]
    pub fn media_kind(self) -> MediaKind {
        match self {
            Self::AudioInput | Self::AudioOutput => MediaKind::Audio,
            Self::VideoInput => MediaKind::Video,
        }
    }

    /// Indicates whether this is an input (capturing) device.
    #[inline]
    #[must_use]
    pub fn is_input(self) -> bool {
        !matches!(self, Self::AudioOutput)
    }
}

/// Describes directions that a camera can face, as seen from a user's
/// perspective. Representation of a [VideoFacingModeEnum][1].
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-videofacingmodeenum
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FacingMode {
    /// Facing towards a user (a self-view camera).
    #[display(fmt = "user")]
    User,

    /// Facing away from a user (viewing the environment).
    #[display(fmt = "environment")]
    Environment,

    /// Facing to the left of a user.
    #[display(fmt = "left")]
    Left,

    /// Facing to the right of a user.
    #[display(fmt = "right")]
    Right,
}

impl AsRef<str> for FacingMode {
    fn as_ref(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Environment => "environment",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Liveness state of a [MediaStreamTrack][1].
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaStreamTrackState {
    /// Track is active (the track's underlying media source is making a
    /// best-effort attempt to provide data in real time).
    Live,

    /// Track has ended (the track's underlying media source is no longer
    /// providing data, and will never provide more data for this track).
    Ended,
}

/// [RecordingState][1] of a [MediaRecorder][2].
///
/// [1]: https://w3.org/TR/mediastream-recording#enumdef-recordingstate
/// [2]: https://w3.org/TR/mediastream-recording#mediarecorder-api
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RecordingState {
    /// Recording is not occurring.
    #[display(fmt = "inactive")]
    Inactive,

    /// Recording is occurring.
    #[display(fmt = "recording")]
    Recording,

    /// Recording has started and is paused.
    #[display(fmt = "paused")]
    Paused,
}

#[cfg(test)]
mod tests {
    use super::{FacingMode, MediaDeviceKind, MediaKind};

    #[test]
    fn facing_mode_names() {
        assert_eq!(FacingMode::User.as_ref(), "user");
        assert_eq!(FacingMode::Environment.as_ref(), "environment");
        assert_eq!(FacingMode::Left.to_string(), "left");
    }

    #[test]
    fn device_kind_classification() {
        assert!(MediaDeviceKind::AudioInput.is_input());
        assert!(MediaDeviceKind::VideoInput.is_input());
        assert!(!MediaDeviceKind::AudioOutput.is_input());
        assert_eq!(MediaDeviceKind::AudioOutput.media_kind(), MediaKind::Audio);
        assert_eq!(MediaDeviceKind::VideoInput.to_string(), "videoinput");
    }
}
