//! Acquired local media stream.

use derive_more::{From, Into};
use wasm_bindgen::prelude::*;

use crate::{
    api::{MediaKind, MediaSourceKind},
    media,
};

/// Locally acquired [MediaStream][1].
///
/// Its tracks are stopped once the capture which acquired it is stopped,
/// restarted or freed.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
#[wasm_bindgen]
#[derive(Clone, Debug, From, Into)]
pub struct LocalMediaStream(media::LocalMediaStream);

#[wasm_bindgen]
impl LocalMediaStream {
    /// Returns the underlying [MediaStream][1], ready to be attached to a
    /// `<video>` element's `srcObject`.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
    #[must_use]
    pub fn get_media_stream(&self) -> web_sys::MediaStream {
        self.0.as_sys().clone()
    }

    /// Returns [`MediaSourceKind`] of this [`LocalMediaStream`].
    #[must_use]
    pub fn media_source_kind(&self) -> MediaSourceKind {
        self.0.source_kind().into()
    }

    /// Indicates whether this [`LocalMediaStream`] has a track of the
    /// provided [`MediaKind`].
    #[must_use]
    pub fn has_track(&self, kind: MediaKind) -> bool {
        self.0.tracks_of(kind.into()).next().is_some()
    }

    /// Returns the underlying [MediaStreamTrack][1]s.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[must_use]
    pub fn get_tracks(&self) -> js_sys::Array {
        self.0
            .tracks()
            .iter()
            .map(|track| JsValue::from(track.as_ref().clone()))
            .collect()
    }

    /// Indicates whether all the tracks of this [`LocalMediaStream`] have
    /// ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.0.is_ended()
    }
}
