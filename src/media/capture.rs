//! Camera/microphone and screen capturing.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use derive_more::Display;
use tracerr::Traced;
use web_sys::Event;

use crate::{
    media::{LocalMediaStream, MediaKind, MediaSourceKind, MediaStreamSettings},
    platform::{
        self, DisplayMediaStreamConstraints, EventListener,
        MediaStreamConstraints,
    },
    store::{Request, RequestState, Resolution, Store, Subscription},
    utils::{clone_traced, JsCaused},
};

/// State of a [`Capture`].
pub type CaptureState = RequestState<LocalMediaStream, CaptureError>;

/// Errors occurring when capturing media.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum CaptureError {
    /// [`MediaStreamSettings`] request no media of the [`Capture`]'s
    /// [`MediaSourceKind`].
    #[display(fmt = "No {} media is requested by the settings", _0)]
    NoMediaRequested(MediaSourceKind),

    /// [getUserMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
    #[display(fmt = "MediaDevices.getUserMedia() failed: {}", _0)]
    GetUserMediaFailed(platform::Error),

    /// [getDisplayMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    #[display(fmt = "MediaDevices.getDisplayMedia() failed: {}", _0)]
    GetDisplayMediaFailed(platform::Error),

    /// Acquired track has ended before it could be used.
    #[display(fmt = "{} track is ended", _0)]
    TrackIsEnded(MediaKind),

    /// Acquisition has been superseded by a newer [`Capture::start`] or
    /// [`Capture::stop`] call.
    #[display(fmt = "Capture has been superseded by a newer request")]
    Superseded,
}

impl JsCaused for CaptureError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::NoMediaRequested(_) => "NoMediaRequested",
            Self::GetUserMediaFailed(_) => "GetUserMediaFailed",
            Self::GetDisplayMediaFailed(_) => "GetDisplayMediaFailed",
            Self::TrackIsEnded(_) => "TrackIsEnded",
            Self::Superseded => "Superseded",
        }
    }

    fn js_cause(self) -> Option<platform::Error> {
        match self {
            Self::GetUserMediaFailed(e) | Self::GetDisplayMediaFailed(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

/// Actual data of a [`Capture`].
#[derive(Debug)]
struct InnerCapture {
    /// Kind of the media source to capture.
    kind: MediaSourceKind,

    /// Constraints used by the next [`Capture::start`] call.
    settings: RefCell<MediaStreamSettings>,

    /// Acquisition lifecycle.
    request: Request<LocalMediaStream, CaptureError>,

    /// `ended` listeners of the current stream's tracks.
    ended_listeners:
        RefCell<Vec<EventListener<web_sys::MediaStreamTrack, Event>>>,
}

impl InnerCapture {
    /// Stops the current stream (if any) and unbinds its listeners.
    fn release(&self) {
        self.ended_listeners.borrow_mut().clear();
        if let Some(stream) = self.request.state().ready() {
            stream.stop();
        }
    }
}

impl Drop for InnerCapture {
    fn drop(&mut self) {
        self.release();
    }
}

/// Capture of a local media from a media device or a display.
///
/// Clones share the same underlying capture. Once the last clone is dropped
/// the captured tracks are stopped.
#[derive(Clone, Debug)]
pub struct Capture(Rc<InnerCapture>);

impl Capture {
    /// Creates a new idle [`Capture`] of the provided [`MediaSourceKind`].
    #[must_use]
    pub fn new(kind: MediaSourceKind, settings: MediaStreamSettings) -> Self {
        Self(Rc::new(InnerCapture {
            kind,
            settings: RefCell::new(settings),
            request: Request::new(),
            ended_listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Returns [`MediaSourceKind`] of this [`Capture`].
    #[inline]
    #[must_use]
    pub fn kind(&self) -> MediaSourceKind {
        self.0.kind
    }

    /// Returns constraints the next [`Capture::start`] call will use.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> MediaStreamSettings {
        self.0.settings.borrow().clone()
    }

    /// Replaces constraints used by the next [`Capture::start`] call.
    ///
    /// A running capture is not restarted.
    #[inline]
    pub fn set_settings(&self, settings: MediaStreamSettings) {
        *self.0.settings.borrow_mut() = settings;
    }

    /// Acquires a new [`LocalMediaStream`], stopping the current one (if
    /// any).
    ///
    /// # Errors
    ///
    /// With [`CaptureError::NoMediaRequested`] if the current settings
    /// request nothing of this [`Capture`]'s [`MediaSourceKind`].
    ///
    /// With [`CaptureError::GetUserMediaFailed`] or
    /// [`CaptureError::GetDisplayMediaFailed`] if the platform request
    /// fails.
    ///
    /// With [`CaptureError::TrackIsEnded`] if some acquired track has already
    /// ended.
    ///
    /// With [`CaptureError::Superseded`] if [`Capture::start`] or
    /// [`Capture::stop`] has been called while acquiring.
    pub async fn start(
        &self,
    ) -> Result<LocalMediaStream, Traced<CaptureError>> {
        let kind = self.0.kind;
        let settings = self.settings();

        self.0.release();
        let ticket = self.0.request.begin();
        log::debug!("Starting {} capture", kind);

        let result = if settings.requests(kind) {
            Self::acquire(kind, &settings).await
        } else {
            Err(tracerr::new!(CaptureError::NoMediaRequested(kind)))
        };

        let stored = match &result {
            Ok(stream) => Ok(stream.clone()),
            Err(e) => Err(clone_traced(e)),
        };
        match self.0.request.resolve(ticket, stored) {
            Resolution::Applied => {
                let stream = result?;
                self.watch_tracks(&stream);
                log::debug!("{} capture is ready", kind);
                Ok(stream)
            }
            Resolution::Superseded(stream) => {
                if let Some(stream) = stream {
                    stream.stop();
                }
                log::debug!("{} capture has been superseded", kind);
                Err(tracerr::new!(CaptureError::Superseded))
            }
        }
    }

    /// Stops the current [`LocalMediaStream`] and returns to the
    /// [`RequestState::Idle`] state.
    ///
    /// An in-flight acquisition is superseded.
    pub fn stop(&self) {
        log::debug!("Stopping {} capture", self.0.kind);
        self.0.release();
        self.0.request.reset();
    }

    /// Returns the current [`CaptureState`].
    #[inline]
    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.0.request.state()
    }

    /// Returns the [`Store`] of this [`Capture`]'s [`CaptureState`].
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<CaptureState> {
        self.0.request.store()
    }

    /// Calls the provided `callback` on each [`CaptureState`] change.
    #[inline]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(CaptureState) + 'static,
    {
        self.0.request.on_change(callback)
    }

    /// Requests a new [`LocalMediaStream`] from the platform.
    async fn acquire(
        kind: MediaSourceKind,
        settings: &MediaStreamSettings,
    ) -> Result<LocalMediaStream, Traced<CaptureError>> {
        let stream = match kind {
            MediaSourceKind::Device => {
                platform::get_user_media(MediaStreamConstraints::from(
                    settings,
                ))
                .await
                .map_err(|e| {
                    let (e, trace) = e.into_parts();
                    Traced::from_parts(
                        CaptureError::GetUserMediaFailed(e),
                        trace,
                    )
                })
                .map_err(tracerr::wrap!())?
            }
            MediaSourceKind::Display => {
                platform::get_display_media(
                    DisplayMediaStreamConstraints::from(settings),
                )
                .await
                .map_err(|e| {
                    let (e, trace) = e.into_parts();
                    Traced::from_parts(
                        CaptureError::GetDisplayMediaFailed(e),
                        trace,
                    )
                })
                .map_err(tracerr::wrap!())?
            }
        };
        let stream = LocalMediaStream::new(stream, kind);

        if let Some(ended) = stream.ended_track_kind() {
            stream.stop();
            return Err(tracerr::new!(CaptureError::TrackIsEnded(ended)));
        }

        Ok(stream)
    }

    /// Returns this [`Capture`] to the [`RequestState::Idle`] state once all
    /// the tracks of the provided [`LocalMediaStream`] end on their own.
    fn watch_tracks(&self, stream: &LocalMediaStream) {
        let mut listeners = self.0.ended_listeners.borrow_mut();
        for track in stream.tracks() {
            let weak_inner: Weak<InnerCapture> = Rc::downgrade(&self.0);
            let stream = stream.clone();
            let bound = track.on_ended(move || {
                let inner = match weak_inner.upgrade() {
                    Some(inner) => inner,
                    None => return,
                };
                let is_current =
                    inner.request.state().ready() == Some(&stream);
                if is_current && stream.is_ended() {
                    log::debug!(
                        "All {} capture tracks have ended",
                        stream.source_kind(),
                    );
                    inner.request.reset();
                }
            });
            match bound {
                Ok(listener) => listeners.push(listener),
                Err(e) => log::error!("{}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        media::{MediaKind, MediaSourceKind},
        platform,
        utils::JsCaused as _,
    };

    use super::CaptureError;

    #[test]
    fn error_names_and_causes() {
        let js = platform::Error::new("NotAllowedError", "Permission denied");

        let err = CaptureError::GetUserMediaFailed(js.clone());
        assert_eq!(err.name(), "GetUserMediaFailed");
        assert_eq!(err.clone().js_cause(), Some(js));
        assert_eq!(
            err.to_string(),
            "MediaDevices.getUserMedia() failed: \
             NotAllowedError: Permission denied",
        );

        let err = CaptureError::NoMediaRequested(MediaSourceKind::Display);
        assert_eq!(err.name(), "NoMediaRequested");
        assert_eq!(err.clone().js_cause(), None);
        assert_eq!(
            err.to_string(),
            "No display media is requested by the settings",
        );

        assert_eq!(
            CaptureError::TrackIsEnded(MediaKind::Video).to_string(),
            "video track is ended",
        );
    }
}
