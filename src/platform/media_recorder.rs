//! Wrapper around [MediaRecorder][1].
//!
//! [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api

use std::{rc::Rc, time::Duration};

use tracerr::Traced;
use web_sys::{Blob, BlobEvent, Event};

use crate::{
    media::{RecorderOptions, RecordingState},
    platform::{
        get_property_by_name, Error, EventListener, EventListenerBindError,
        MediaStream,
    },
    utils::as_js_millis,
};

/// Result of binding a handler to some [MediaRecorder][1] event.
///
/// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
type BindResult<A> = Result<
    EventListener<web_sys::MediaRecorder, A>,
    Traced<EventListenerBindError>,
>;

/// Recorder of a [`MediaStream`] into [`Blob`] chunks.
///
/// Adapter for a [MediaRecorder][1] object.
///
/// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
#[derive(Clone, Debug)]
pub struct MediaRecorder(Rc<web_sys::MediaRecorder>);

impl MediaRecorder {
    /// Creates a new [`MediaRecorder`] of the provided [`MediaStream`]
    /// configured with the provided [`RecorderOptions`].
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaRecorder()][1] constructor throws (for
    /// example, when the requested MIME type is not supported).
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-constructor
    pub fn new(
        stream: &MediaStream,
        options: &RecorderOptions,
    ) -> Result<Self, Traced<Error>> {
        let mut sys_options = web_sys::MediaRecorderOptions::new();
        if let Some(mime_type) = options.get_mime_type() {
            sys_options.mime_type(mime_type);
        }
        if let Some(bps) = options.get_audio_bits_per_second() {
            sys_options.audio_bits_per_second(bps);
        }
        if let Some(bps) = options.get_video_bits_per_second() {
            sys_options.video_bits_per_second(bps);
        }

        web_sys::MediaRecorder::new_with_media_stream_and_media_recorder_options(
            stream.as_ref(),
            &sys_options,
        )
        .map(|recorder| Self(Rc::new(recorder)))
        .map_err(Error::from)
        .map_err(tracerr::wrap!())
    }

    /// Indicates whether the provided MIME type is supported for recording
    /// by the current User Agent.
    ///
    /// Adapter for a [MediaRecorder.isTypeSupported()][1] function.
    ///
    /// [1]: https://tinyurl.com/mediarecorder-istypesupported
    #[inline]
    #[must_use]
    pub fn is_type_supported(mime_type: &str) -> bool {
        web_sys::MediaRecorder::is_type_supported(mime_type)
    }

    /// Starts recording, emitting a `dataavailable` event every `timeslice`
    /// (or only once the recording stops, if `timeslice` is [`None`]).
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaRecorder.start()][1] throws.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-start
    pub fn start(
        &self,
        timeslice: Option<Duration>,
    ) -> Result<(), Traced<Error>> {
        match timeslice {
            Some(timeslice) => {
                self.0.start_with_time_slice(as_js_millis(timeslice))
            }
            None => self.0.start(),
        }
        .map_err(Error::from)
        .map_err(tracerr::wrap!())
    }

    /// Pauses recording.
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaRecorder.pause()][1] throws.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-pause
    pub fn pause(&self) -> Result<(), Traced<Error>> {
        self.0
            .pause()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }

    /// Resumes a paused recording.
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaRecorder.resume()][1] throws.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-resume
    pub fn resume(&self) -> Result<(), Traced<Error>> {
        self.0
            .resume()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }

    /// Stops recording. The last chunk is emitted in a `dataavailable` event
    /// followed by a `stop` event.
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaRecorder.stop()][1] throws.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-stop
    pub fn stop(&self) -> Result<(), Traced<Error>> {
        self.0
            .stop()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }

    /// Returns the current [`RecordingState`] of the underlying
    /// [MediaRecorder][1].
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
    #[must_use]
    pub fn state(&self) -> RecordingState {
        match self.0.state() {
            web_sys::RecordingState::Recording => RecordingState::Recording,
            web_sys::RecordingState::Paused => RecordingState::Paused,
            _ => RecordingState::Inactive,
        }
    }

    /// Returns the MIME type the underlying [MediaRecorder][1] records with.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
    #[inline]
    #[must_use]
    pub fn mime_type(&self) -> String {
        self.0.mime_type()
    }

    /// Binds the provided `callback` to the [dataavailable][1] event.
    ///
    /// The `callback` receives the recorded [`Blob`] (if any) and the
    /// [timeStamp][2] of the event.
    ///
    /// # Errors
    ///
    /// With [`EventListenerBindError`] if the event binding fails.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#eventdef-mediarecorder-dataavailable
    /// [2]: https://dom.spec.whatwg.org/#dom-event-timestamp
    pub fn on_data_available<F>(&self, mut callback: F) -> BindResult<BlobEvent>
    where
        F: FnMut(Option<Blob>, f64) + 'static,
    {
        EventListener::new_mut(
            Rc::clone(&self.0),
            "dataavailable",
            move |event: BlobEvent| {
                let time_stamp = event.time_stamp();
                callback(event.data(), time_stamp);
            },
        )
    }

    /// Binds the provided `callback` to the `event_name` event which carries
    /// no payload (`start`, `pause`, `resume`, `stop`).
    ///
    /// # Errors
    ///
    /// With [`EventListenerBindError`] if the event binding fails.
    pub fn on_event<F>(
        &self,
        event_name: &'static str,
        mut callback: F,
    ) -> BindResult<Event>
    where
        F: FnMut(f64) + 'static,
    {
        EventListener::new_mut(
            Rc::clone(&self.0),
            event_name,
            move |event: Event| callback(event.time_stamp()),
        )
    }

    /// Binds the provided `callback` to the [error][1] event.
    ///
    /// # Errors
    ///
    /// With [`EventListenerBindError`] if the event binding fails.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#eventdef-mediarecorder-error
    pub fn on_error<F>(&self, mut callback: F) -> BindResult<Event>
    where
        F: FnMut(Error) + 'static,
    {
        EventListener::new_mut(Rc::clone(&self.0), "error", move |e: Event| {
            let err = get_property_by_name(&e, "error", |v| {
                if v.is_undefined() || v.is_null() {
                    None
                } else {
                    Some(Error::from(v))
                }
            })
            .unwrap_or_else(|| {
                Error::new("UnknownError", "MediaRecorder failed")
            });
            callback(err);
        })
    }
}
