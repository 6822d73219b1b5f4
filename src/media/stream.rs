//! Locally acquired [`MediaStream`].

use std::rc::Rc;

use crate::{
    media::{MediaKind, MediaSourceKind, MediaStreamTrackState},
    platform::{self, MediaStreamTrack},
};

#[derive(Debug)]
struct Inner {
    /// Underlying platform [`platform::MediaStream`].
    stream: platform::MediaStream,

    /// [`MediaStreamTrack`]s of the [`platform::MediaStream`] at the moment
    /// it has been acquired.
    tracks: Vec<MediaStreamTrack>,

    /// Kind of the media source this stream has been acquired from.
    source_kind: MediaSourceKind,
}

/// [`platform::MediaStream`] acquired by a [`Capture`].
///
/// Cloning is cheap and two [`LocalMediaStream`]s are equal only if they are
/// clones of the same acquisition.
///
/// [`Capture`]: crate::media::Capture
#[derive(Clone, Debug)]
pub struct LocalMediaStream(Rc<Inner>);

impl LocalMediaStream {
    /// Wraps the provided [`platform::MediaStream`] acquired from a media
    /// source of the provided kind.
    #[must_use]
    pub fn new(
        stream: platform::MediaStream,
        source_kind: MediaSourceKind,
    ) -> Self {
        let tracks = stream.tracks();
        Self(Rc::new(Inner {
            stream,
            tracks,
            source_kind,
        }))
    }

    /// Returns the underlying [`platform::MediaStream`].
    #[inline]
    #[must_use]
    pub fn stream(&self) -> &platform::MediaStream {
        &self.0.stream
    }

    /// Returns the underlying [`web_sys::MediaStream`].
    #[inline]
    #[must_use]
    pub fn as_sys(&self) -> &web_sys::MediaStream {
        self.0.stream.as_ref()
    }

    /// Returns kind of the media source this stream has been acquired from.
    #[inline]
    #[must_use]
    pub fn source_kind(&self) -> MediaSourceKind {
        self.0.source_kind
    }

    /// Returns all the [`MediaStreamTrack`]s of this stream.
    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[MediaStreamTrack] {
        &self.0.tracks
    }

    /// Returns an iterator over the [`MediaStreamTrack`]s of the provided
    /// [`MediaKind`].
    pub fn tracks_of(
        &self,
        kind: MediaKind,
    ) -> impl Iterator<Item = &MediaStreamTrack> {
        self.0.tracks.iter().filter(move |t| t.kind() == kind)
    }

    /// Indicates whether this stream has at least one audio track.
    #[inline]
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.tracks_of(MediaKind::Audio).next().is_some()
    }

    /// Indicates whether this stream has at least one video track.
    #[inline]
    #[must_use]
    pub fn has_video(&self) -> bool {
        self.tracks_of(MediaKind::Video).next().is_some()
    }

    /// Returns [`MediaKind`] of the first track which has already ended, if
    /// any.
    #[must_use]
    pub fn ended_track_kind(&self) -> Option<MediaKind> {
        self.0
            .tracks
            .iter()
            .find(|t| t.ready_state() == MediaStreamTrackState::Ended)
            .map(MediaStreamTrack::kind)
    }

    /// Indicates whether all the tracks of this stream have ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.0
            .tracks
            .iter()
            .all(|t| t.ready_state() == MediaStreamTrackState::Ended)
    }

    /// Stops all the tracks of this stream.
    pub fn stop(&self) {
        log::debug!("Stopping MediaStream [id = {}]", self.0.stream.id());
        for track in &self.0.tracks {
            track.stop();
        }
    }
}

impl PartialEq for LocalMediaStream {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
