//! Wrapper around [MediaStreamTrack][1].
//!
//! [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack

use std::rc::Rc;

use tracerr::Traced;
use web_sys::Event;

use crate::{
    media::{MediaKind, MediaStreamTrackState},
    platform::{EventListener, EventListenerBindError},
};

/// Wrapper around [MediaStreamTrack][1] received from a
/// [getUserMedia()][2]/[getDisplayMedia()][3] request.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
/// [2]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
/// [3]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
#[derive(Clone, Debug)]
pub struct MediaStreamTrack {
    sys_track: Rc<web_sys::MediaStreamTrack>,
    kind: MediaKind,
}

impl<T> From<T> for MediaStreamTrack
where
    web_sys::MediaStreamTrack: From<T>,
{
    #[inline]
    fn from(from: T) -> Self {
        let sys_track = web_sys::MediaStreamTrack::from(from);
        let kind = match sys_track.kind().as_ref() {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            _ => unreachable!(),
        };

        Self {
            sys_track: Rc::new(sys_track),
            kind,
        }
    }
}

impl AsRef<web_sys::MediaStreamTrack> for MediaStreamTrack {
    #[inline]
    fn as_ref(&self) -> &web_sys::MediaStreamTrack {
        &self.sys_track
    }
}

impl MediaStreamTrack {
    /// Returns this [`MediaStreamTrack`]'s kind (audio/video).
    #[inline]
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns [`MediaStreamTrackState`] of the underlying
    /// [MediaStreamTrack][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[must_use]
    pub fn ready_state(&self) -> MediaStreamTrackState {
        match self.sys_track.ready_state() {
            web_sys::MediaStreamTrackState::Live => MediaStreamTrackState::Live,
            // Anything else can't be used for capturing anymore.
            _ => MediaStreamTrackState::Ended,
        }
    }

    /// Changes [`readyState`][1] attribute of the underlying
    /// [MediaStreamTrack][2] to [`ended`][3].
    ///
    /// Stopping a track doesn't fire its `ended` event.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dom-mediastreamtrack-readystate
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    /// [3]: https://tinyurl.com/w3-streams#idl-def-MediaStreamTrackState.ended
    #[inline]
    pub fn stop(&self) {
        self.sys_track.stop();
    }

    /// Binds the provided `callback` to the [`ended`][1] event of the
    /// underlying [MediaStreamTrack][2], fired when the track ends for
    /// reasons beyond this crate's control (device unplugged, permission
    /// revoked, screen sharing stopped from the browser UI).
    ///
    /// # Errors
    ///
    /// With [`EventListenerBindError`] if the event binding fails.
    ///
    /// [1]: https://tinyurl.com/w3-streams#event-mediastreamtrack-ended
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    pub fn on_ended<F>(
        &self,
        callback: F,
    ) -> Result<
        EventListener<web_sys::MediaStreamTrack, Event>,
        Traced<EventListenerBindError>,
    >
    where
        F: FnOnce() + 'static,
    {
        EventListener::new_once(
            Rc::clone(&self.sys_track),
            "ended",
            move |_: Event| callback(),
        )
    }
}
