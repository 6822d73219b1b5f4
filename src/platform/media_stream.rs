//! Wrapper around [MediaStream][1].
//!
//! [1]: https://w3.org/TR/mediacapture-streams/#mediastream

use crate::platform::MediaStreamTrack;

/// [MediaStream][1] returned by a [getUserMedia()][2]/[getDisplayMedia()][3]
/// request.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
/// [2]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
/// [3]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
#[derive(Clone, Debug)]
pub struct MediaStream(web_sys::MediaStream);

impl From<web_sys::MediaStream> for MediaStream {
    #[inline]
    fn from(stream: web_sys::MediaStream) -> Self {
        Self(stream)
    }
}

impl AsRef<web_sys::MediaStream> for MediaStream {
    #[inline]
    fn as_ref(&self) -> &web_sys::MediaStream {
        &self.0
    }
}

impl MediaStream {
    /// Returns [`id`][1] of the underlying [MediaStream][2].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastream-id
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastream
    #[inline]
    #[must_use]
    pub fn id(&self) -> String {
        self.0.id()
    }

    /// Returns all the [`MediaStreamTrack`]s of the underlying
    /// [MediaStream][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
    #[must_use]
    pub fn tracks(&self) -> Vec<MediaStreamTrack> {
        self.0
            .get_tracks()
            .iter()
            .map(MediaStreamTrack::from)
            .collect()
    }
}
