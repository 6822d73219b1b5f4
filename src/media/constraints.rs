//! Constraints of the media requested from a user.

use crate::media::{FacingMode, MediaSourceKind};

/// Representation of the [ConstrainULong][1].
///
/// Underlying value must fit in `[0, 4294967295]` range.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-constrainulong
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConstrainU32 {
    /// Must be the parameter's value.
    Exact(u32),

    /// Should be used if possible.
    Ideal(u32),

    /// Parameter's value must be in this range (`min`, `max`), inclusive.
    Range(u32, u32),
}

impl ConstrainU32 {
    /// Builds a [`ConstrainU32::Range`] normalizing the bounds order.
    #[must_use]
    pub fn range(a: u32, b: u32) -> Self {
        if a <= b {
            Self::Range(a, b)
        } else {
            Self::Range(b, a)
        }
    }
}

/// Representation of the [ConstrainDOMString][1].
///
/// Can set exact (must be the parameter's value) and ideal (should be used if
/// possible) constrain.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-constraindomstring
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConstrainString<T> {
    /// Must be the parameter's value.
    Exact(T),

    /// Should be used if possible.
    Ideal(T),
}

impl<T> ConstrainString<T> {
    /// Returns the constrained value, regardless of its strictness.
    #[inline]
    pub fn value(&self) -> &T {
        match self {
            Self::Exact(v) | Self::Ideal(v) => v,
        }
    }
}

/// Constraints applicable to audio tracks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AudioTrackConstraints {
    /// Identifier of the device generating the content for the media track.
    pub(crate) device_id: Option<ConstrainString<String>>,

    /// Whether the [echoCancellation][1] should be applied.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-echocancellation
    pub(crate) echo_cancellation: Option<bool>,

    /// Whether the [noiseSuppression][1] should be applied.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-noisesuppression
    pub(crate) noise_suppression: Option<bool>,

    /// Whether the [autoGainControl][1] should be applied.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-autogaincontrol
    pub(crate) auto_gain_control: Option<bool>,
}

impl AudioTrackConstraints {
    /// Creates new [`AudioTrackConstraints`] with none constraints configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    #[inline]
    pub fn device_id(&mut self, device_id: String) {
        self.device_id = Some(ConstrainString::Exact(device_id));
    }

    /// Sets [echoCancellation][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-echocancellation
    #[inline]
    pub fn echo_cancellation(&mut self, enabled: bool) {
        self.echo_cancellation = Some(enabled);
    }

    /// Sets [noiseSuppression][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-noisesuppression
    #[inline]
    pub fn noise_suppression(&mut self, enabled: bool) {
        self.noise_suppression = Some(enabled);
    }

    /// Sets [autoGainControl][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dfn-autogaincontrol
    #[inline]
    pub fn auto_gain_control(&mut self, enabled: bool) {
        self.auto_gain_control = Some(enabled);
    }

    /// Returns the constrained device ID, if any.
    #[inline]
    #[must_use]
    pub fn get_device_id(&self) -> Option<&str> {
        self.device_id.as_ref().map(|id| id.value().as_str())
    }
}

/// Constraints applicable to video tracks that are sourced from some media
/// device.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceVideoTrackConstraints {
    /// Identifier of the device generating the content for the media track.
    pub(crate) device_id: Option<ConstrainString<String>>,

    /// Describes the directions that the camera can face, as seen from the
    /// user's perspective.
    pub(crate) facing_mode: Option<ConstrainString<FacingMode>>,

    /// Height of the video in pixels.
    pub(crate) height: Option<ConstrainU32>,

    /// Width of the video in pixels.
    pub(crate) width: Option<ConstrainU32>,

    /// Frames per second of the video.
    pub(crate) frame_rate: Option<ConstrainU32>,
}

impl DeviceVideoTrackConstraints {
    /// Creates new [`DeviceVideoTrackConstraints`] with none constraints
    /// configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    #[inline]
    pub fn device_id(&mut self, device_id: String) {
        self.device_id = Some(ConstrainString::Exact(device_id));
    }

    /// Sets exact [facingMode][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-constraindomstring
    #[inline]
    pub fn exact_facing_mode(&mut self, facing_mode: FacingMode) {
        self.facing_mode = Some(ConstrainString::Exact(facing_mode));
    }

    /// Sets ideal [facingMode][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-constraindomstring
    #[inline]
    pub fn ideal_facing_mode(&mut self, facing_mode: FacingMode) {
        self.facing_mode = Some(ConstrainString::Ideal(facing_mode));
    }

    /// Sets [height][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-height
    #[inline]
    pub fn height(&mut self, height: ConstrainU32) {
        self.height = Some(height);
    }

    /// Sets [width][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-width
    #[inline]
    pub fn width(&mut self, width: ConstrainU32) {
        self.width = Some(width);
    }

    /// Sets [frameRate][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-frameRate
    #[inline]
    pub fn frame_rate(&mut self, frame_rate: ConstrainU32) {
        self.frame_rate = Some(frame_rate);
    }

    /// Returns the constrained device ID, if any.
    #[inline]
    #[must_use]
    pub fn get_device_id(&self) -> Option<&str> {
        self.device_id.as_ref().map(|id| id.value().as_str())
    }

    /// Returns the constrained [`FacingMode`], if any.
    #[inline]
    #[must_use]
    pub fn get_facing_mode(&self) -> Option<FacingMode> {
        self.facing_mode.as_ref().map(|mode| *mode.value())
    }
}

/// Constraints applicable to video tracks sourced from a screen capturing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DisplayVideoTrackConstraints {
    /// Height of the video in pixels.
    pub(crate) height: Option<ConstrainU32>,

    /// Width of the video in pixels.
    pub(crate) width: Option<ConstrainU32>,

    /// Frames per second of the video.
    pub(crate) frame_rate: Option<ConstrainU32>,
}

impl DisplayVideoTrackConstraints {
    /// Creates new [`DisplayVideoTrackConstraints`] with none constraints
    /// configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [height][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-height
    #[inline]
    pub fn height(&mut self, height: ConstrainU32) {
        self.height = Some(height);
    }

    /// Sets [width][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-width
    #[inline]
    pub fn width(&mut self, width: ConstrainU32) {
        self.width = Some(width);
    }

    /// Sets [frameRate][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-frameRate
    #[inline]
    pub fn frame_rate(&mut self, frame_rate: ConstrainU32) {
        self.frame_rate = Some(frame_rate);
    }
}

/// [MediaStreamConstraints][1] of both [getUserMedia()][2] and
/// [getDisplayMedia()][3] requests.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
/// [2]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
/// [3]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaStreamSettings {
    /// Constraints of the microphone track.
    audio: Option<AudioTrackConstraints>,

    /// Constraints of the camera track.
    device_video: Option<DeviceVideoTrackConstraints>,

    /// Constraints of the screen capturing track.
    display_video: Option<DisplayVideoTrackConstraints>,

    /// Whether the system/tab audio should be captured along with the screen.
    display_audio: bool,
}

impl MediaStreamSettings {
    /// Creates new [`MediaStreamSettings`] with none constraints configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the nature and settings of the audio [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[inline]
    pub fn audio(&mut self, constraints: AudioTrackConstraints) {
        self.audio = Some(constraints);
    }

    /// Set constraints that will be used to obtain local video sourced from
    /// media device.
    #[inline]
    pub fn device_video(&mut self, constraints: DeviceVideoTrackConstraints) {
        self.device_video = Some(constraints);
    }

    /// Set constraints that will be used to capture local video from user
    /// display.
    #[inline]
    pub fn display_video(&mut self, constraints: DisplayVideoTrackConstraints) {
        self.display_video = Some(constraints);
    }

    /// Sets whether the system/tab audio should be requested along with the
    /// screen capture.
    #[inline]
    pub fn display_audio(&mut self, enabled: bool) {
        self.display_audio = enabled;
    }

    /// Returns [`AudioTrackConstraints`], if audio is requested.
    #[inline]
    #[must_use]
    pub fn get_audio(&self) -> Option<&AudioTrackConstraints> {
        self.audio.as_ref()
    }

    /// Returns [`DeviceVideoTrackConstraints`], if camera video is requested.
    #[inline]
    #[must_use]
    pub fn get_device_video(&self) -> Option<&DeviceVideoTrackConstraints> {
        self.device_video.as_ref()
    }

    /// Returns [`DisplayVideoTrackConstraints`], if screen capture is
    /// requested.
    #[inline]
    #[must_use]
    pub fn get_display_video(&self) -> Option<&DisplayVideoTrackConstraints> {
        self.display_video.as_ref()
    }

    /// Indicates whether the system/tab audio is requested along with the
    /// screen capture.
    #[inline]
    #[must_use]
    pub fn is_display_audio_enabled(&self) -> bool {
        self.display_audio
    }

    /// Indicates whether these [`MediaStreamSettings`] request anything from
    /// the provided [`MediaSourceKind`].
    ///
    /// A screen capture can't be requested without a video, so the display
    /// audio alone doesn't count.
    #[must_use]
    pub fn requests(&self, source: MediaSourceKind) -> bool {
        match source {
            MediaSourceKind::Device => {
                self.audio.is_some() || self.device_video.is_some()
            }
            MediaSourceKind::Display => self.display_video.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_ordered() {
        assert_eq!(ConstrainU32::range(720, 480), ConstrainU32::Range(480, 720));
        assert_eq!(ConstrainU32::range(1, 2), ConstrainU32::Range(1, 2));
    }

    #[test]
    fn empty_settings_request_nothing() {
        let settings = MediaStreamSettings::new();

        assert!(!settings.requests(MediaSourceKind::Device));
        assert!(!settings.requests(MediaSourceKind::Display));
    }

    #[test]
    fn device_settings_request_device_only() {
        let mut settings = MediaStreamSettings::new();
        settings.audio(AudioTrackConstraints::new());

        assert!(settings.requests(MediaSourceKind::Device));
        assert!(!settings.requests(MediaSourceKind::Display));
    }

    #[test]
    fn display_audio_alone_is_not_a_display_request() {
        let mut settings = MediaStreamSettings::new();
        settings.display_audio(true);
        assert!(!settings.requests(MediaSourceKind::Display));

        settings.display_video(DisplayVideoTrackConstraints::new());
        assert!(settings.requests(MediaSourceKind::Display));
        assert!(settings.is_display_audio_enabled());
    }

    #[test]
    fn facing_mode_keeps_last_strictness() {
        let mut video = DeviceVideoTrackConstraints::new();
        video.exact_facing_mode(FacingMode::User);
        video.ideal_facing_mode(FacingMode::Environment);

        assert_eq!(
            video.facing_mode,
            Some(ConstrainString::Ideal(FacingMode::Environment)),
        );
        assert_eq!(video.get_facing_mode(), Some(FacingMode::Environment));
    }

    #[test]
    fn device_id_is_exact() {
        let mut audio = AudioTrackConstraints::new();
        audio.device_id("mic".into());

        assert_eq!(audio.device_id, Some(ConstrainString::Exact("mic".into())));
        assert_eq!(audio.get_device_id(), Some("mic"));
    }
}
