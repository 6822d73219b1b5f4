//! Recording of a [`LocalMediaStream`] into timed segments.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Duration,
};

use derive_more::Display;
use tracerr::Traced;
use web_sys::{Blob, BlobEvent, Event};

use crate::{
    media::{LocalMediaStream, RecordingState},
    platform::{self, EventListener, EventListenerBindError},
    store::{SharedError, Store, Subscription},
    utils::{clone_traced, JsCaused},
};

/// Errors occurring when recording media.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum RecorderError {
    /// Requested MIME type is not supported by the User Agent.
    #[display(fmt = "MIME type '{}' is not supported for recording", _0)]
    MimeTypeNotSupported(String),

    /// [MediaRecorder()][1] constructor threw.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-constructor
    #[display(fmt = "Failed to create MediaRecorder: {}", _0)]
    CreateRecorderFailed(platform::Error),

    /// Operation is not allowed in the current [`RecordingState`].
    #[display(fmt = "Operation is not allowed while {}", _0)]
    InvalidState(RecordingState),

    /// Underlying [MediaRecorder][1] failed.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
    #[display(fmt = "MediaRecorder failed: {}", _0)]
    RecorderFailed(platform::Error),

    /// Failed to bind to some [MediaRecorder][1] event.
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
    #[display(fmt = "Failed to bind to MediaRecorder event: {}", _0)]
    ListenerBindFailed(platform::Error),
}

impl JsCaused for RecorderError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::MimeTypeNotSupported(_) => "MimeTypeNotSupported",
            Self::CreateRecorderFailed(_) => "CreateRecorderFailed",
            Self::InvalidState(_) => "InvalidState",
            Self::RecorderFailed(_) => "RecorderFailed",
            Self::ListenerBindFailed(_) => "ListenerBindFailed",
        }
    }

    fn js_cause(self) -> Option<platform::Error> {
        match self {
            Self::CreateRecorderFailed(e)
            | Self::RecorderFailed(e)
            | Self::ListenerBindFailed(e) => Some(e),
            Self::MimeTypeNotSupported(_) | Self::InvalidState(_) => None,
        }
    }
}

impl From<EventListenerBindError> for RecorderError {
    #[inline]
    fn from(e: EventListenerBindError) -> Self {
        Self::ListenerBindFailed(e.cause())
    }
}

/// Options of a [`Recorder`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecorderOptions {
    /// MIME type to record with. Chosen by the User Agent if [`None`].
    mime_type: Option<String>,

    /// Bitrate of the recorded audio.
    audio_bits_per_second: Option<u32>,

    /// Bitrate of the recorded video.
    video_bits_per_second: Option<u32>,

    /// Length of a single [`Segment`]. The whole recording is a single
    /// [`Segment`] if [`None`].
    timeslice: Option<Duration>,
}

impl RecorderOptions {
    /// Creates new [`RecorderOptions`] with nothing configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MIME type to record with.
    #[inline]
    pub fn mime_type(&mut self, mime_type: String) {
        self.mime_type = Some(mime_type);
    }

    /// Sets bitrate of the recorded audio.
    #[inline]
    pub fn audio_bits_per_second(&mut self, bps: u32) {
        self.audio_bits_per_second = Some(bps);
    }

    /// Sets bitrate of the recorded video.
    #[inline]
    pub fn video_bits_per_second(&mut self, bps: u32) {
        self.video_bits_per_second = Some(bps);
    }

    /// Sets length of a single [`Segment`].
    #[inline]
    pub fn timeslice(&mut self, timeslice: Duration) {
        self.timeslice = Some(timeslice);
    }

    /// Returns the configured MIME type.
    #[inline]
    #[must_use]
    pub fn get_mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the configured bitrate of the recorded audio.
    #[inline]
    #[must_use]
    pub fn get_audio_bits_per_second(&self) -> Option<u32> {
        self.audio_bits_per_second
    }

    /// Returns the configured bitrate of the recorded video.
    #[inline]
    #[must_use]
    pub fn get_video_bits_per_second(&self) -> Option<u32> {
        self.video_bits_per_second
    }

    /// Returns the configured length of a single [`Segment`].
    #[inline]
    #[must_use]
    pub fn get_timeslice(&self) -> Option<Duration> {
        self.timeslice
    }
}

/// Chunk of a recording.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Position of this [`Segment`] in the recording, counting the
    /// [`Segment`]s dropped by [`Recorder::clear`] too.
    pub index: usize,

    /// Recorded data.
    pub data: Blob,

    /// Size of the recorded data in bytes.
    pub size: f64,

    /// Milliseconds since the recording start at which this [`Segment`]
    /// starts. Paused time is not counted.
    pub started_at: f64,

    /// Duration of this [`Segment`] in milliseconds.
    pub duration: f64,
}

/// Immutable snapshot of a [`Recorder`] state.
#[derive(Clone, Debug, PartialEq)]
pub struct RecorderSnapshot {
    /// Current [`RecordingState`].
    pub state: RecordingState,

    /// [`Segment`]s recorded since the last [`Recorder::start`] or
    /// [`Recorder::clear`] call.
    pub segments: Rc<[Segment]>,

    /// Last error of the underlying [MediaRecorder][1].
    ///
    /// [1]: https://w3.org/TR/mediastream-recording#mediarecorder-api
    pub error: Option<SharedError<RecorderError>>,
}

impl RecorderSnapshot {
    /// Returns total size of the recorded [`Segment`]s in bytes.
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.segments.iter().map(|s| s.size).sum()
    }

    /// Returns total duration of the recorded [`Segment`]s in milliseconds.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

impl Default for RecorderSnapshot {
    fn default() -> Self {
        Self {
            state: RecordingState::Inactive,
            segments: Rc::from(Vec::new()),
            error: None,
        }
    }
}

/// Clock of a recording, measured in event [timeStamp][1]s.
///
/// [1]: https://dom.spec.whatwg.org/#dom-event-timestamp
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Timeline {
    /// Time stamp of the recording start.
    origin: f64,

    /// Time stamp of the current pause, if paused.
    paused_since: Option<f64>,

    /// Total paused time.
    paused_total: f64,

    /// Recorded time at which the last [`Segment`] ends.
    recorded: f64,

    /// Number of [`Segment`]s closed since the recording start.
    closed: usize,
}

impl Timeline {
    fn start(at: f64) -> Self {
        Self {
            origin: at,
            ..Self::default()
        }
    }

    fn pause(&mut self, at: f64) {
        if self.paused_since.is_none() {
            self.paused_since = Some(at);
        }
    }

    fn resume(&mut self, at: f64) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += (at - since).max(0.0);
        }
    }

    /// Returns recorded time at the provided time stamp.
    fn elapsed(&self, at: f64) -> f64 {
        let at = self.paused_since.unwrap_or(at);
        (at - self.origin - self.paused_total).max(0.0)
    }

    /// Closes a [`Segment`] at the provided time stamp, returning its index,
    /// start and duration.
    fn next_segment(&mut self, at: f64) -> (usize, f64, f64) {
        let index = self.closed;
        let started_at = self.recorded;
        let ended_at = self.elapsed(at).max(started_at);
        self.recorded = ended_at;
        self.closed += 1;
        (index, started_at, ended_at - started_at)
    }
}

/// Underlying [`platform::MediaRecorder`] with its bound listeners.
#[derive(Debug)]
struct Session {
    recorder: platform::MediaRecorder,
    _data_available: EventListener<web_sys::MediaRecorder, BlobEvent>,
    _events: Vec<EventListener<web_sys::MediaRecorder, Event>>,
}

#[derive(Debug)]
struct InnerRecorder {
    /// Options of every started recording.
    options: RecorderOptions,

    /// Current [`RecorderSnapshot`].
    store: Store<RecorderSnapshot>,

    /// Clock of the current recording.
    timeline: Cell<Timeline>,

    /// Last started recording.
    session: RefCell<Option<Session>>,
}

impl InnerRecorder {
    fn set_state(&self, state: RecordingState) {
        self.store.update(|s| RecorderSnapshot {
            state,
            ..s.clone()
        });
    }

    fn fail(&self, err: Traced<RecorderError>) {
        log::error!("Recording failed: {}", err);
        let err = SharedError::from(err);
        self.store.update(|s| RecorderSnapshot {
            state: RecordingState::Inactive,
            error: Some(err),
            ..s.clone()
        });
    }

    fn push_segment(&self, data: Blob, time_stamp: f64) {
        let size = data.size();
        let mut timeline = self.timeline.get();
        let (index, started_at, duration) = timeline.next_segment(time_stamp);
        self.timeline.set(timeline);

        self.store.update(|s| {
            let mut segments = s.segments.to_vec();
            segments.push(Segment {
                index,
                data,
                size,
                started_at,
                duration,
            });
            RecorderSnapshot {
                segments: Rc::from(segments),
                ..s.clone()
            }
        });
    }

    /// Binds listeners of the provided [`platform::MediaRecorder`] events.
    fn bind(
        this: &Rc<Self>,
        recorder: platform::MediaRecorder,
    ) -> Result<Session, Traced<RecorderError>> {
        let weak = Rc::downgrade(this);
        let data_available = recorder
            .on_data_available(move |data, time_stamp| {
                if let Some(this) = weak.upgrade() {
                    match data {
                        Some(data) if data.size() > 0.0 => {
                            this.push_segment(data, time_stamp);
                        }
                        _ => log::debug!("Skipping empty recorded chunk"),
                    }
                }
            })
            .map_err(tracerr::map_from_and_wrap!())?;

        let mut events = Vec::with_capacity(5);
        events.push(
            recorder
                .on_event("start", Self::handler(this, |this, at| {
                    this.timeline.set(Timeline::start(at));
                    this.set_state(RecordingState::Recording);
                }))
                .map_err(tracerr::map_from_and_wrap!())?,
        );
        events.push(
            recorder
                .on_event("pause", Self::handler(this, |this, at| {
                    let mut timeline = this.timeline.get();
                    timeline.pause(at);
                    this.timeline.set(timeline);
                    this.set_state(RecordingState::Paused);
                }))
                .map_err(tracerr::map_from_and_wrap!())?,
        );
        events.push(
            recorder
                .on_event("resume", Self::handler(this, |this, at| {
                    let mut timeline = this.timeline.get();
                    timeline.resume(at);
                    this.timeline.set(timeline);
                    this.set_state(RecordingState::Recording);
                }))
                .map_err(tracerr::map_from_and_wrap!())?,
        );
        events.push(
            recorder
                .on_event("stop", Self::handler(this, |this, _| {
                    log::debug!("Recording has stopped");
                    this.set_state(RecordingState::Inactive);
                }))
                .map_err(tracerr::map_from_and_wrap!())?,
        );

        let weak = Rc::downgrade(this);
        events.push(
            recorder
                .on_error(move |e| {
                    if let Some(this) = weak.upgrade() {
                        this.fail(tracerr::new!(RecorderError::RecorderFailed(
                            e
                        )));
                    }
                })
                .map_err(tracerr::map_from_and_wrap!())?,
        );

        Ok(Session {
            recorder,
            _data_available: data_available,
            _events: events,
        })
    }

    /// Wraps the provided handler into a closure holding a [`Weak`] reference
    /// to this [`InnerRecorder`].
    fn handler<F>(this: &Rc<Self>, handler: F) -> impl FnMut(f64) + 'static
    where
        F: Fn(&Self, f64) + 'static,
    {
        let weak: Weak<Self> = Rc::downgrade(this);
        move |at| {
            if let Some(this) = weak.upgrade() {
                handler(&this, at);
            }
        }
    }

    /// Returns [`RecordingState`] of the underlying
    /// [`platform::MediaRecorder`].
    fn recording_state(&self) -> RecordingState {
        self.session
            .borrow()
            .as_ref()
            .map_or(RecordingState::Inactive, |s| s.recorder.state())
    }
}

impl Drop for InnerRecorder {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            if session.recorder.state() != RecordingState::Inactive {
                if let Err(e) = session.recorder.stop() {
                    log::error!("Failed to stop MediaRecorder: {}", e);
                }
            }
        }
    }
}

/// Recorder of a [`LocalMediaStream`] into timed [`Segment`]s.
///
/// Clones share the same underlying recorder. Once the last clone is dropped
/// an active recording is stopped.
#[derive(Clone, Debug)]
pub struct Recorder(Rc<InnerRecorder>);

impl Recorder {
    /// Creates a new inactive [`Recorder`] with the provided
    /// [`RecorderOptions`].
    #[must_use]
    pub fn new(options: RecorderOptions) -> Self {
        Self(Rc::new(InnerRecorder {
            options,
            store: Store::new(RecorderSnapshot::default()),
            timeline: Cell::new(Timeline::default()),
            session: RefCell::new(None),
        }))
    }

    /// Indicates whether the provided MIME type is supported for recording.
    #[inline]
    #[must_use]
    pub fn is_type_supported(mime_type: &str) -> bool {
        platform::MediaRecorder::is_type_supported(mime_type)
    }

    /// Returns [`RecorderOptions`] of this [`Recorder`].
    #[inline]
    #[must_use]
    pub fn options(&self) -> &RecorderOptions {
        &self.0.options
    }

    /// Starts recording of the provided [`LocalMediaStream`], dropping the
    /// previously recorded [`Segment`]s.
    ///
    /// # Errors
    ///
    /// With [`RecorderError::InvalidState`] if a recording is already active.
    ///
    /// With [`RecorderError::MimeTypeNotSupported`] if the configured MIME
    /// type is not supported.
    ///
    /// With [`RecorderError::CreateRecorderFailed`],
    /// [`RecorderError::ListenerBindFailed`] or
    /// [`RecorderError::RecorderFailed`] if the platform fails.
    pub fn start(
        &self,
        stream: &LocalMediaStream,
    ) -> Result<(), Traced<RecorderError>> {
        let state = self.0.recording_state();
        if state != RecordingState::Inactive {
            return Err(tracerr::new!(RecorderError::InvalidState(state)));
        }

        self.start_session(stream).map_err(|e| {
            let stored = clone_traced(&e);
            self.0.fail(stored);
            e
        })
    }

    fn start_session(
        &self,
        stream: &LocalMediaStream,
    ) -> Result<(), Traced<RecorderError>> {
        if let Some(mime_type) = self.0.options.get_mime_type() {
            if !Self::is_type_supported(mime_type) {
                return Err(tracerr::new!(
                    RecorderError::MimeTypeNotSupported(mime_type.into())
                ));
            }
        }

        let recorder =
            platform::MediaRecorder::new(stream.stream(), &self.0.options)
                .map_err(|e| {
                    let (e, trace) = e.into_parts();
                    Traced::from_parts(
                        RecorderError::CreateRecorderFailed(e),
                        trace,
                    )
                })
                .map_err(tracerr::wrap!())?;
        let session = InnerRecorder::bind(&self.0, recorder.clone())?;
        drop(self.0.session.replace(Some(session)));

        self.0.timeline.set(Timeline::default());
        self.0.store.set(RecorderSnapshot::default());

        recorder
            .start(self.0.options.get_timeslice())
            .map_err(|e| {
                let (e, trace) = e.into_parts();
                Traced::from_parts(RecorderError::RecorderFailed(e), trace)
            })
            .map_err(tracerr::wrap!())?;
        log::debug!("Recording with '{}' has started", recorder.mime_type());
        self.0.set_state(recorder.state());

        Ok(())
    }

    /// Pauses an active recording.
    ///
    /// # Errors
    ///
    /// With [`RecorderError::InvalidState`] if not recording.
    ///
    /// With [`RecorderError::RecorderFailed`] if the platform fails.
    pub fn pause(&self) -> Result<(), Traced<RecorderError>> {
        self.command(RecordingState::Recording, platform::MediaRecorder::pause)
    }

    /// Resumes a paused recording.
    ///
    /// # Errors
    ///
    /// With [`RecorderError::InvalidState`] if not paused.
    ///
    /// With [`RecorderError::RecorderFailed`] if the platform fails.
    pub fn resume(&self) -> Result<(), Traced<RecorderError>> {
        self.command(RecordingState::Paused, platform::MediaRecorder::resume)
    }

    /// Stops an active or paused recording. The last [`Segment`] is
    /// collected asynchronously.
    ///
    /// # Errors
    ///
    /// With [`RecorderError::InvalidState`] if the recording is inactive.
    ///
    /// With [`RecorderError::RecorderFailed`] if the platform fails.
    pub fn stop(&self) -> Result<(), Traced<RecorderError>> {
        let state = self.0.recording_state();
        if state == RecordingState::Inactive {
            return Err(tracerr::new!(RecorderError::InvalidState(state)));
        }
        self.command(state, platform::MediaRecorder::stop)
    }

    /// Drops the recorded [`Segment`]s.
    ///
    /// An active recording goes on: its next [`Segment`] keeps the index and
    /// the start time it would have had without clearing.
    pub fn clear(&self) {
        self.0.store.update(|s| RecorderSnapshot {
            segments: Rc::from(Vec::new()),
            ..s.clone()
        });
    }

    /// Returns the current [`RecorderSnapshot`].
    #[inline]
    #[must_use]
    pub fn state(&self) -> RecorderSnapshot {
        self.0.store.snapshot()
    }

    /// Returns the [`Store`] of this [`Recorder`]'s [`RecorderSnapshot`].
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<RecorderSnapshot> {
        &self.0.store
    }

    /// Calls the provided `callback` on each [`RecorderSnapshot`] change.
    #[inline]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(RecorderSnapshot) + 'static,
    {
        self.0.store.on_change(callback)
    }

    /// Runs the provided `command` on the underlying
    /// [`platform::MediaRecorder`] if it's in the `required` state.
    fn command<F>(
        &self,
        required: RecordingState,
        command: F,
    ) -> Result<(), Traced<RecorderError>>
    where
        F: FnOnce(
            &platform::MediaRecorder,
        ) -> Result<(), Traced<platform::Error>>,
    {
        let session = self.0.session.borrow();
        let recorder = match session.as_ref() {
            Some(s) if s.recorder.state() == required => &s.recorder,
            _ => {
                return Err(tracerr::new!(RecorderError::InvalidState(
                    self.0.store.snapshot().state
                )));
            }
        };

        command(recorder)
            .map_err(|e| {
                let (e, trace) = e.into_parts();
                Traced::from_parts(RecorderError::RecorderFailed(e), trace)
            })
            .map_err(tracerr::wrap!())?;
        let state = recorder.state();
        drop(session);
        self.0.set_state(state);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{media::RecordingState, platform, utils::JsCaused as _};

    use super::{RecorderError, RecorderOptions, RecorderSnapshot, Timeline};

    #[test]
    fn segments_follow_each_other() {
        let mut timeline = Timeline::start(1000.0);

        assert_eq!(timeline.next_segment(2000.0), (0, 0.0, 1000.0));
        assert_eq!(timeline.next_segment(3500.0), (1, 1000.0, 1500.0));
    }

    #[test]
    fn indices_keep_counting() {
        let mut timeline = Timeline::start(0.0);
        for _ in 0..3 {
            let _ = timeline.next_segment(100.0);
        }

        assert_eq!(timeline.next_segment(400.0), (3, 100.0, 300.0));
    }

    #[test]
    fn paused_time_is_not_recorded() {
        let mut timeline = Timeline::start(0.0);

        timeline.pause(1000.0);
        assert_eq!(timeline.next_segment(1500.0), (0, 0.0, 1000.0));
        timeline.resume(3000.0);

        assert_eq!(timeline.next_segment(4000.0), (1, 1000.0, 1000.0));
    }

    #[test]
    fn repeated_pause_keeps_first_time_stamp() {
        let mut timeline = Timeline::start(0.0);

        timeline.pause(100.0);
        timeline.pause(200.0);
        timeline.resume(300.0);

        assert_eq!(timeline.elapsed(400.0), 200.0);
    }

    #[test]
    fn segment_never_goes_backwards() {
        let mut timeline = Timeline::start(500.0);

        assert_eq!(timeline.next_segment(400.0), (0, 0.0, 0.0));
        assert_eq!(timeline.next_segment(700.0), (1, 0.0, 200.0));
    }

    #[test]
    fn options_getters() {
        let mut options = RecorderOptions::new();
        assert_eq!(options.get_mime_type(), None);

        options.mime_type("video/webm".into());
        options.video_bits_per_second(2_500_000);
        options.timeslice(Duration::from_secs(1));

        assert_eq!(options.get_mime_type(), Some("video/webm"));
        assert_eq!(options.get_audio_bits_per_second(), None);
        assert_eq!(options.get_video_bits_per_second(), Some(2_500_000));
        assert_eq!(options.get_timeslice(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = RecorderSnapshot::default();

        assert_eq!(snapshot.state, RecordingState::Inactive);
        assert!(snapshot.segments.is_empty());
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.total_size(), 0.0);
        assert_eq!(snapshot.total_duration(), 0.0);
    }

    #[test]
    fn error_names() {
        let err = RecorderError::InvalidState(RecordingState::Inactive);
        assert_eq!(err.name(), "InvalidState");
        assert_eq!(err.to_string(), "Operation is not allowed while inactive");
        assert_eq!(err.clone().js_cause(), None);

        let js = platform::Error::new("NotSupportedError", "nope");
        let err = RecorderError::CreateRecorderFailed(js.clone());
        assert_eq!(err.name(), "CreateRecorderFailed");
        assert_eq!(err.clone().js_cause(), Some(js));
    }
}
