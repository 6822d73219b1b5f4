//! [MediaDeviceInfo][1] related objects.
//!
//! [1]: https://w3.org/TR/mediacapture-streams/#device-info

use std::convert::TryFrom;

use derive_more::Display;
use serde::Serialize;
use web_sys as sys;

use crate::media::MediaDeviceKind;

/// Error of parsing a [MediaDeviceInfo][1] with a kind this crate doesn't
/// know about.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#device-info
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display(fmt = "Unknown media device kind")]
pub struct UnknownDeviceKindError;

impl TryFrom<sys::MediaDeviceKind> for MediaDeviceKind {
    type Error = UnknownDeviceKindError;

    #[inline]
    fn try_from(value: sys::MediaDeviceKind) -> Result<Self, Self::Error> {
        match value {
            sys::MediaDeviceKind::Audioinput => Ok(Self::AudioInput),
            sys::MediaDeviceKind::Videoinput => Ok(Self::VideoInput),
            sys::MediaDeviceKind::Audiooutput => Ok(Self::AudioOutput),
            _ => Err(UnknownDeviceKindError),
        }
    }
}

/// Snapshot of a [MediaDeviceInfo][1].
///
/// Unlike the JS object it is copied from, this is plain data, so it can be
/// compared and serialized.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#device-info
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDeviceInfo {
    /// Unique identifier of the represented device.
    pub device_id: String,

    /// Kind of the represented device.
    pub kind: MediaDeviceKind,

    /// Label describing the represented device (for example
    /// "External USB Webcam").
    ///
    /// Empty until the user grants a media permission.
    pub label: String,

    /// Group identifier of the represented device.
    ///
    /// Two devices have the same group identifier if they belong to the same
    /// physical device. For example, the audio input and output devices
    /// representing the speaker and microphone of the same headset have the
    /// same [groupId][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadeviceinfo-groupid
    pub group_id: String,
}

impl TryFrom<sys::MediaDeviceInfo> for MediaDeviceInfo {
    type Error = UnknownDeviceKindError;

    fn try_from(info: sys::MediaDeviceInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: MediaDeviceKind::try_from(info.kind())?,
            device_id: info.device_id(),
            label: info.label(),
            group_id: info.group_id(),
        })
    }
}
