//! Constraints builders of the media capturing.

use derive_more::{From, Into};
use wasm_bindgen::prelude::*;

use crate::{api::FacingMode, media};

/// [MediaStreamConstraints][1] wrapper.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct MediaStreamSettings(media::MediaStreamSettings);

#[wasm_bindgen]
impl MediaStreamSettings {
    /// Creates new [`MediaStreamSettings`] with none constraints configured.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        media::MediaStreamSettings::new().into()
    }

    /// Specifies the nature and settings of a device audio
    /// [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    pub fn audio(&mut self, constraints: AudioTrackConstraints) {
        self.0.audio(constraints.into());
    }

    /// Set constraints that will be used to obtain a local video sourced from
    /// a media device.
    pub fn device_video(&mut self, constraints: DeviceVideoTrackConstraints) {
        self.0.device_video(constraints.into());
    }

    /// Set constraints that will be used to capture a local video from a user
    /// display.
    pub fn display_video(
        &mut self,
        constraints: DisplayVideoTrackConstraints,
    ) {
        self.0.display_video(constraints.into());
    }

    /// Requests the system/tab audio along with a captured display.
    pub fn display_audio(&mut self, enabled: bool) {
        self.0.display_audio(enabled);
    }
}

impl Default for MediaStreamSettings {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Constraints applicable to audio tracks.
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct AudioTrackConstraints(media::AudioTrackConstraints);

#[wasm_bindgen]
impl AudioTrackConstraints {
    /// Creates new [`AudioTrackConstraints`] with none constraints configured.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        media::AudioTrackConstraints::new().into()
    }

    /// Sets an exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    pub fn device_id(&mut self, device_id: String) {
        self.0.device_id(device_id);
    }

    /// Sets an ideal [echoCancellation][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-echocancellation
    pub fn echo_cancellation(&mut self, enabled: bool) {
        self.0.echo_cancellation(enabled);
    }

    /// Sets an ideal [noiseSuppression][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-noisesuppression
    pub fn noise_suppression(&mut self, enabled: bool) {
        self.0.noise_suppression(enabled);
    }

    /// Sets an ideal [autoGainControl][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-autogaincontrol
    pub fn auto_gain_control(&mut self, enabled: bool) {
        self.0.auto_gain_control(enabled);
    }
}

impl Default for AudioTrackConstraints {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Constraints applicable to video tracks that are sourced from some media
/// device.
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct DeviceVideoTrackConstraints(media::DeviceVideoTrackConstraints);

#[wasm_bindgen]
impl DeviceVideoTrackConstraints {
    /// Creates new [`DeviceVideoTrackConstraints`] with none constraints
    /// configured.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        media::DeviceVideoTrackConstraints::new().into()
    }

    /// Sets an exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    pub fn device_id(&mut self, device_id: String) {
        self.0.device_id(device_id);
    }

    /// Sets an exact [facingMode][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-constraindomstring
    pub fn exact_facing_mode(&mut self, facing_mode: FacingMode) {
        self.0.exact_facing_mode(facing_mode.into());
    }

    /// Sets an ideal [facingMode][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-constraindomstring
    pub fn ideal_facing_mode(&mut self, facing_mode: FacingMode) {
        self.0.ideal_facing_mode(facing_mode.into());
    }

    /// Sets an exact [height][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-height
    pub fn exact_height(&mut self, height: u32) {
        self.0.height(media::ConstrainU32::Exact(height));
    }

    /// Sets an ideal [height][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-height
    pub fn ideal_height(&mut self, height: u32) {
        self.0.height(media::ConstrainU32::Ideal(height));
    }

    /// Sets a range of a [height][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-height
    pub fn height_in_range(&mut self, min: u32, max: u32) {
        self.0.height(media::ConstrainU32::range(min, max));
    }

    /// Sets an exact [width][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-width
    pub fn exact_width(&mut self, width: u32) {
        self.0.width(media::ConstrainU32::Exact(width));
    }

    /// Sets an ideal [width][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-width
    pub fn ideal_width(&mut self, width: u32) {
        self.0.width(media::ConstrainU32::Ideal(width));
    }

    /// Sets a range of a [width][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-width
    pub fn width_in_range(&mut self, min: u32, max: u32) {
        self.0.width(media::ConstrainU32::range(min, max));
    }

    /// Sets an ideal [frameRate][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-frameRate
    pub fn ideal_frame_rate(&mut self, frame_rate: u32) {
        self.0.frame_rate(media::ConstrainU32::Ideal(frame_rate));
    }
}

impl Default for DeviceVideoTrackConstraints {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Constraints applicable to video tracks sourced from a screen capturing.
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct DisplayVideoTrackConstraints(media::DisplayVideoTrackConstraints);

#[wasm_bindgen]
impl DisplayVideoTrackConstraints {
    /// Creates new [`DisplayVideoTrackConstraints`] with none constraints
    /// configured.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        media::DisplayVideoTrackConstraints::new().into()
    }

    /// Sets an exact [height][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-height
    pub fn exact_height(&mut self, height: u32) {
        self.0.height(media::ConstrainU32::Exact(height));
    }

    /// Sets an ideal [height][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-height
    pub fn ideal_height(&mut self, height: u32) {
        self.0.height(media::ConstrainU32::Ideal(height));
    }

    /// Sets an exact [width][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-width
    pub fn exact_width(&mut self, width: u32) {
        self.0.width(media::ConstrainU32::Exact(width));
    }

    /// Sets an ideal [width][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-width
    pub fn ideal_width(&mut self, width: u32) {
        self.0.width(media::ConstrainU32::Ideal(width));
    }

    /// Sets an exact [frameRate][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-frameRate
    pub fn exact_frame_rate(&mut self, frame_rate: u32) {
        self.0.frame_rate(media::ConstrainU32::Exact(frame_rate));
    }

    /// Sets an ideal [frameRate][1] constraint.
    ///
    /// [1]: https://tinyurl.com/w3-streams#def-constraint-frameRate
    pub fn ideal_frame_rate(&mut self, frame_rate: u32) {
        self.0.frame_rate(media::ConstrainU32::Ideal(frame_rate));
    }
}

impl Default for DisplayVideoTrackConstraints {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
