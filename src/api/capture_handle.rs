//! Handle of a media capture.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    api::{
        snapshot::{self, SnapshotCache},
        CaptureException, LocalMediaStream, MediaSourceKind,
        MediaStreamSettings, RequestStatus,
    },
    media::{self, CaptureState},
};

/// Capture of a local media from media devices (camera/microphone) or from a
/// display, observable as an external store.
///
/// Its `snapshot()` is a frozen object of shape
/// `{ status: RequestStatus, stream?: LocalMediaStream,
/// error?: CaptureException }`, the same object being returned until the
/// capture state changes.
///
/// Freeing this handle stops the captured tracks.
#[wasm_bindgen]
#[derive(Debug)]
pub struct CaptureHandle {
    capture: media::Capture,
    snapshot: SnapshotCache,
}

impl From<media::Capture> for CaptureHandle {
    #[inline]
    fn from(capture: media::Capture) -> Self {
        Self {
            capture,
            snapshot: SnapshotCache::default(),
        }
    }
}

#[wasm_bindgen]
impl CaptureHandle {
    /// Acquires a new [`LocalMediaStream`] with the current settings,
    /// stopping the previous one.
    ///
    /// The returned [`Promise`] rejects with a [`CaptureException`].
    pub fn start(&self) -> Promise {
        let capture = self.capture.clone();
        future_to_promise(async move {
            capture
                .start()
                .await
                .map(|stream| LocalMediaStream::from(stream).into())
                .map_err(CaptureException::from)
                .map_err(JsValue::from)
        })
    }

    /// Stops the captured tracks. An in-flight acquisition is discarded.
    pub fn stop(&self) -> Promise {
        self.capture.stop();
        Promise::resolve(&JsValue::UNDEFINED)
    }

    /// Replaces [`MediaStreamSettings`] the next `start()` call will use.
    ///
    /// The running capture is left untouched.
    pub fn set_settings(&self, settings: &MediaStreamSettings) {
        self.capture.set_settings(settings.clone().into());
    }

    /// Returns [`MediaSourceKind`] of this capture.
    #[must_use]
    pub fn kind(&self) -> MediaSourceKind {
        self.capture.kind().into()
    }

    /// Returns [`RequestStatus`] of this capture.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        (&self.capture.state()).into()
    }

    /// Calls the provided `callback` on each change of this capture's state.
    ///
    /// Returns a function cancelling the subscription.
    pub fn subscribe(&self, callback: Function) -> Function {
        snapshot::subscribe(self.capture.store(), callback)
    }

    /// Returns the current snapshot of this capture's state.
    #[must_use]
    pub fn snapshot(&self) -> JsValue {
        self.snapshot.get(self.capture.store(), |state: CaptureState| {
            let status = RequestStatus::from(&state);
            let stream = state
                .ready()
                .cloned()
                .map_or(JsValue::UNDEFINED, |s| {
                    LocalMediaStream::from(s).into()
                });
            let error = state.error().map_or(JsValue::UNDEFINED, |e| {
                CaptureException::from(e).into()
            });
            snapshot::frozen_object(&[
                ("status", JsValue::from(status as u32)),
                ("stream", stream),
                ("error", error),
            ])
        })
    }
}
