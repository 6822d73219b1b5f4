//! Media tracks and streams constraints functionality.

use wasm_bindgen::JsValue;
use web_sys::{
    ConstrainDomStringParameters, ConstrainDoubleRange, MediaTrackConstraints,
};

use crate::media::{
    constraints::ConstrainString, AudioTrackConstraints, ConstrainU32,
    DeviceVideoTrackConstraints, DisplayVideoTrackConstraints,
    MediaStreamSettings,
};

/// [MediaStreamConstraints][1] wrapper.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
#[derive(Debug)]
pub struct MediaStreamConstraints(web_sys::MediaStreamConstraints);

impl MediaStreamConstraints {
    /// Creates new [`MediaStreamConstraints`] with none constraints configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(web_sys::MediaStreamConstraints::new())
    }

    /// Specifies the nature and settings of the `audio` [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[inline]
    pub fn audio(&mut self, audio: &AudioTrackConstraints) {
        self.0.audio(&MediaTrackConstraints::from(audio).into());
    }

    /// Specifies the nature and settings of the `video` [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[inline]
    pub fn video(&mut self, video: &DeviceVideoTrackConstraints) {
        self.0.video(&MediaTrackConstraints::from(video).into());
    }
}

impl Default for MediaStreamConstraints {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<web_sys::MediaStreamConstraints> for MediaStreamConstraints {
    #[inline]
    fn as_ref(&self) -> &web_sys::MediaStreamConstraints {
        &self.0
    }
}

impl From<&MediaStreamSettings> for MediaStreamConstraints {
    fn from(settings: &MediaStreamSettings) -> Self {
        let mut constraints = Self::new();
        if let Some(audio) = settings.get_audio() {
            constraints.audio(audio);
        }
        if let Some(video) = settings.get_device_video() {
            constraints.video(video);
        }
        constraints
    }
}

/// [DisplayMediaStreamConstraints][1] wrapper.
///
/// [1]: https://w3.org/TR/screen-capture/#dom-displaymediastreamconstraints
#[derive(Debug)]
pub struct DisplayMediaStreamConstraints(
    web_sys::DisplayMediaStreamConstraints,
);

impl DisplayMediaStreamConstraints {
    /// Creates a new [`DisplayMediaStreamConstraints`] with none constraints
    /// configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(web_sys::DisplayMediaStreamConstraints::new())
    }

    /// Specifies the nature and settings of the `video` [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[inline]
    pub fn video(&mut self, video: &DisplayVideoTrackConstraints) {
        self.0.video(&MediaTrackConstraints::from(video).into());
    }

    /// Requests the system/tab audio along with the captured display.
    #[inline]
    pub fn audio(&mut self, enabled: bool) {
        self.0.audio(&JsValue::from_bool(enabled));
    }
}

impl Default for DisplayMediaStreamConstraints {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<web_sys::DisplayMediaStreamConstraints>
    for DisplayMediaStreamConstraints
{
    #[inline]
    fn as_ref(&self) -> &web_sys::DisplayMediaStreamConstraints {
        &self.0
    }
}

impl From<&MediaStreamSettings> for DisplayMediaStreamConstraints {
    fn from(settings: &MediaStreamSettings) -> Self {
        let mut constraints = Self::new();
        if let Some(video) = settings.get_display_video() {
            constraints.video(video);
        }
        if settings.is_display_audio_enabled() {
            constraints.audio(true);
        }
        constraints
    }
}

impl From<&AudioTrackConstraints> for MediaTrackConstraints {
    fn from(track_constraints: &AudioTrackConstraints) -> Self {
        let mut constraints = Self::new();

        if let Some(device_id) = &track_constraints.device_id {
            constraints
                .device_id(&ConstrainDomStringParameters::from(device_id));
        }
        if let Some(enabled) = track_constraints.echo_cancellation {
            constraints.echo_cancellation(&JsValue::from_bool(enabled));
        }
        if let Some(enabled) = track_constraints.noise_suppression {
            constraints.noise_suppression(&JsValue::from_bool(enabled));
        }
        if let Some(enabled) = track_constraints.auto_gain_control {
            constraints.auto_gain_control(&JsValue::from_bool(enabled));
        }

        constraints
    }
}

impl From<&DeviceVideoTrackConstraints> for MediaTrackConstraints {
    fn from(track_constraints: &DeviceVideoTrackConstraints) -> Self {
        let mut constraints = Self::new();

        if let Some(device_id) = &track_constraints.device_id {
            constraints
                .device_id(&ConstrainDomStringParameters::from(device_id));
        }
        if let Some(facing_mode) = &track_constraints.facing_mode {
            constraints
                .facing_mode(&ConstrainDomStringParameters::from(facing_mode));
        }
        if let Some(width) = track_constraints.width {
            constraints.width(&ConstrainDoubleRange::from(width));
        }
        if let Some(height) = track_constraints.height {
            constraints.height(&ConstrainDoubleRange::from(height));
        }
        if let Some(frame_rate) = track_constraints.frame_rate {
            constraints.frame_rate(&ConstrainDoubleRange::from(frame_rate));
        }

        constraints
    }
}

impl From<&DisplayVideoTrackConstraints> for MediaTrackConstraints {
    fn from(track_constraints: &DisplayVideoTrackConstraints) -> Self {
        let mut constraints = Self::new();

        if let Some(width) = track_constraints.width {
            constraints.width(&ConstrainDoubleRange::from(width));
        }
        if let Some(height) = track_constraints.height {
            constraints.height(&ConstrainDoubleRange::from(height));
        }
        if let Some(frame_rate) = track_constraints.frame_rate {
            constraints.frame_rate(&ConstrainDoubleRange::from(frame_rate));
        }

        constraints
    }
}

impl From<ConstrainU32> for ConstrainDoubleRange {
    fn from(from: ConstrainU32) -> Self {
        let mut constraint = ConstrainDoubleRange::new();
        match from {
            ConstrainU32::Exact(val) => {
                constraint.exact(f64::from(val));
            }
            ConstrainU32::Ideal(val) => {
                constraint.ideal(f64::from(val));
            }
            ConstrainU32::Range(min, max) => {
                constraint.min(f64::from(min)).max(f64::from(max));
            }
        }

        constraint
    }
}

impl<T: AsRef<str>> From<&ConstrainString<T>> for ConstrainDomStringParameters {
    fn from(from: &ConstrainString<T>) -> Self {
        let mut constraint = ConstrainDomStringParameters::new();
        match from {
            ConstrainString::Exact(val) => {
                constraint.exact(&JsValue::from_str(val.as_ref()))
            }
            ConstrainString::Ideal(val) => {
                constraint.ideal(&JsValue::from_str(val.as_ref()))
            }
        };

        constraint
    }
}
