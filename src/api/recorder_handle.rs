//! Handle of a media recorder.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;

use crate::{
    api::{
        snapshot::{self, SnapshotCache},
        CaptureException, LocalMediaStream, RecordingState,
    },
    media::{self, RecorderSnapshot, Segment},
};

/// Converts the provided [`Segment`] into a frozen
/// `{ index, data, size, startedAt, duration }` JS object.
fn segment_to_js(segment: &Segment) -> JsValue {
    #[allow(clippy::cast_precision_loss)]
    let index = segment.index as f64;
    snapshot::frozen_object(&[
        ("index", JsValue::from_f64(index)),
        ("data", segment.data.clone().into()),
        ("size", JsValue::from_f64(segment.size)),
        ("startedAt", JsValue::from_f64(segment.started_at)),
        ("duration", JsValue::from_f64(segment.duration)),
    ])
}

/// Converts the provided command result into a settled [`Promise`].
fn settle<E>(result: Result<(), tracerr::Traced<E>>) -> Promise
where
    CaptureException: From<tracerr::Traced<E>>,
{
    match result {
        Ok(()) => Promise::resolve(&JsValue::UNDEFINED),
        Err(e) => Promise::reject(&CaptureException::from(e).into()),
    }
}

/// Recorder of a [`LocalMediaStream`] into timed segments, observable as an
/// external store.
///
/// Its `snapshot()` is a frozen object of shape
/// `{ state: RecordingState, segments: Segment[], error?: CaptureException }`
/// where every segment is `{ index, data: Blob, size, startedAt, duration }`.
///
/// Freeing this handle stops an active recording.
#[wasm_bindgen]
#[derive(Debug)]
pub struct RecorderHandle {
    recorder: media::Recorder,
    snapshot: SnapshotCache,
}

impl From<media::Recorder> for RecorderHandle {
    #[inline]
    fn from(recorder: media::Recorder) -> Self {
        Self {
            recorder,
            snapshot: SnapshotCache::default(),
        }
    }
}

#[wasm_bindgen]
impl RecorderHandle {
    /// Starts recording of the provided [`LocalMediaStream`], dropping the
    /// previously recorded segments.
    ///
    /// The returned [`Promise`] rejects with a [`CaptureException`].
    pub fn start(&self, stream: &LocalMediaStream) -> Promise {
        let stream: media::LocalMediaStream = stream.clone().into();
        settle(self.recorder.start(&stream))
    }

    /// Pauses the active recording.
    ///
    /// The returned [`Promise`] rejects with a [`CaptureException`].
    pub fn pause(&self) -> Promise {
        settle(self.recorder.pause())
    }

    /// Resumes the paused recording.
    ///
    /// The returned [`Promise`] rejects with a [`CaptureException`].
    pub fn resume(&self) -> Promise {
        settle(self.recorder.resume())
    }

    /// Stops the recording. The last segment arrives asynchronously.
    ///
    /// The returned [`Promise`] rejects with a [`CaptureException`].
    pub fn stop(&self) -> Promise {
        settle(self.recorder.stop())
    }

    /// Drops the recorded segments.
    pub fn clear(&self) {
        self.recorder.clear();
    }

    /// Returns the current [`RecordingState`].
    #[must_use]
    pub fn state(&self) -> RecordingState {
        self.recorder.state().state.into()
    }

    /// Calls the provided `callback` on each change of this recorder's state.
    ///
    /// Returns a function cancelling the subscription.
    pub fn subscribe(&self, callback: Function) -> Function {
        snapshot::subscribe(self.recorder.store(), callback)
    }

    /// Returns the current snapshot of this recorder's state.
    #[must_use]
    pub fn snapshot(&self) -> JsValue {
        self.snapshot.get(self.recorder.store(), |s: RecorderSnapshot| {
            let state = RecordingState::from(s.state);
            let segments: js_sys::Array =
                s.segments.iter().map(segment_to_js).collect();
            let error = s.error.as_ref().map_or(JsValue::UNDEFINED, |e| {
                CaptureException::from(e).into()
            });
            snapshot::frozen_object(&[
                ("state", JsValue::from(state as u32)),
                ("segments", js_sys::Object::freeze(&segments).into()),
                ("error", error),
            ])
        })
    }
}
