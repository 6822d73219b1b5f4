#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use medea_capture::{
    media::{
        Capture, MediaSourceKind, Recorder, RecorderError, RecorderOptions,
        RecordingState,
    },
    utils::JsCaused as _,
};
use wasm_bindgen_test::*;

use crate::{audio_video_settings, resolve_after, MockRecorder};

wasm_bindgen_test_configure!(run_in_browser);

fn recorder_with_timeslice(ms: u64) -> Recorder {
    let mut options = RecorderOptions::new();
    options.timeslice(Duration::from_millis(ms));
    Recorder::new(options)
}

#[wasm_bindgen_test]
async fn records_segments() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let recorder = recorder_with_timeslice(100);

    recorder.start(&stream).unwrap();
    assert_eq!(recorder.state().state, RecordingState::Recording);
    resolve_after(350).await.unwrap();
    recorder.stop().unwrap();
    resolve_after(100).await.unwrap();

    let snapshot = recorder.state();
    assert_eq!(snapshot.state, RecordingState::Inactive);
    assert!(snapshot.segments.len() >= 2);
    assert!(snapshot.total_size() > 0.0);
    for (i, segment) in snapshot.segments.iter().enumerate() {
        assert_eq!(segment.index, i);
        assert!(segment.duration >= 0.0);
    }
    assert!(snapshot.error.is_none());
}

#[wasm_bindgen_test]
async fn pauses_and_resumes() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let recorder = recorder_with_timeslice(100);
    recorder.start(&stream).unwrap();

    recorder.pause().unwrap();
    assert_eq!(recorder.state().state, RecordingState::Paused);
    let err = recorder.pause().unwrap_err();
    assert_eq!(
        *err.as_ref(),
        RecorderError::InvalidState(RecordingState::Paused),
    );

    recorder.resume().unwrap();
    assert_eq!(recorder.state().state, RecordingState::Recording);

    recorder.stop().unwrap();
}

#[wasm_bindgen_test]
async fn rejects_commands_when_inactive() {
    let recorder = Recorder::new(RecorderOptions::new());

    for err in vec![
        recorder.pause().unwrap_err(),
        recorder.resume().unwrap_err(),
        recorder.stop().unwrap_err(),
    ] {
        assert_eq!(err.as_ref().name(), "InvalidState");
    }
}

#[wasm_bindgen_test]
async fn rejects_second_start() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let recorder = Recorder::new(RecorderOptions::new());

    recorder.start(&stream).unwrap();
    let err = recorder.start(&stream).unwrap_err();

    assert_eq!(
        *err.as_ref(),
        RecorderError::InvalidState(RecordingState::Recording),
    );
    recorder.stop().unwrap();
}

#[wasm_bindgen_test]
async fn fails_on_unsupported_mime_type() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let mut options = RecorderOptions::new();
    options.mime_type("video/unknown".into());
    let recorder = Recorder::new(options);

    let err = recorder.start(&stream).unwrap_err();

    assert_eq!(err.as_ref().name(), "MimeTypeNotSupported");
    assert!(err.into_parts().0.js_cause().is_none());
    let snapshot = recorder.state();
    assert_eq!(snapshot.state, RecordingState::Inactive);
    assert_eq!(
        snapshot.error.map(|e| e.error().clone()),
        Some(RecorderError::MimeTypeNotSupported("video/unknown".into())),
    );
}

#[wasm_bindgen_test]
async fn clear_drops_segments() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let recorder = recorder_with_timeslice(50);
    recorder.start(&stream).unwrap();
    resolve_after(200).await.unwrap();
    recorder.stop().unwrap();
    resolve_after(100).await.unwrap();
    assert!(!recorder.state().segments.is_empty());

    recorder.clear();

    assert!(recorder.state().segments.is_empty());
    assert_eq!(recorder.state().state, RecordingState::Inactive);
}

#[wasm_bindgen_test]
fn webm_is_supported() {
    assert!(Recorder::is_type_supported("video/webm"));
    assert!(!Recorder::is_type_supported("video/unknown"));
}

#[wasm_bindgen_test]
async fn error_event_fails_recording() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let mock_recorder = MockRecorder::new();
    let recorder = recorder_with_timeslice(10_000);
    recorder.start(&stream).unwrap();

    mock_recorder.emit_error("UnknownError");
    mock_recorder.stop();

    let snapshot = recorder.state();
    assert_eq!(snapshot.state, RecordingState::Inactive);
    let err = snapshot.error.unwrap();
    assert_eq!(err.error().name(), "RecorderFailed");
    assert_eq!(
        err.error().to_string(),
        "MediaRecorder failed: UnknownError: mocked recorder failure",
    );
}

#[wasm_bindgen_test]
async fn empty_chunks_are_skipped() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let mock_recorder = MockRecorder::new();
    let recorder = recorder_with_timeslice(10_000);
    recorder.start(&stream).unwrap();

    mock_recorder.emit_data(0);
    assert!(recorder.state().segments.is_empty());

    mock_recorder.emit_data(16);
    mock_recorder.stop();

    let segments = recorder.state().segments;
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].index, 0);
    assert_eq!(segments[0].size, 16.0);
}

#[wasm_bindgen_test]
async fn clear_keeps_segment_indices() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let mock_recorder = MockRecorder::new();
    let recorder = recorder_with_timeslice(10_000);
    recorder.start(&stream).unwrap();

    mock_recorder.emit_data(8);
    mock_recorder.emit_data(8);
    recorder.clear();
    mock_recorder.emit_data(8);
    mock_recorder.stop();

    let segments = recorder.state().segments;
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].index, 2);
    assert_eq!(recorder.state().state, RecordingState::Recording);
    recorder.stop().unwrap();
}

#[wasm_bindgen_test]
async fn dropping_recorder_stops_recording() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    let mock_recorder = MockRecorder::new();
    let recorder = Recorder::new(RecorderOptions::new());
    recorder.start(&stream).unwrap();
    assert_eq!(mock_recorder.last_state().as_deref(), Some("recording"));

    drop(recorder);
    mock_recorder.stop();

    assert_eq!(mock_recorder.last_state().as_deref(), Some("inactive"));
}
