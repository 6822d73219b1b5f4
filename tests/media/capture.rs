#![cfg(target_arch = "wasm32")]

use futures::future;
use medea_capture::{
    media::{
        AudioTrackConstraints, Capture, CaptureError,
        DisplayVideoTrackConstraints, MediaKind, MediaSourceKind,
        MediaStreamSettings,
    },
    utils::JsCaused as _,
};
use wasm_bindgen_test::*;

use crate::{audio_video_settings, MockNavigator};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn captures_audio_and_video() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    assert!(capture.state().is_idle());

    let stream = capture.start().await.unwrap();

    assert!(stream.has_audio());
    assert!(stream.has_video());
    assert_eq!(stream.source_kind(), MediaSourceKind::Device);
    assert_eq!(capture.state().ready(), Some(&stream));
}

#[wasm_bindgen_test]
async fn fails_when_nothing_requested() {
    let capture =
        Capture::new(MediaSourceKind::Device, MediaStreamSettings::new());

    let err = capture.start().await.unwrap_err();

    assert_eq!(
        *err.as_ref(),
        CaptureError::NoMediaRequested(MediaSourceKind::Device),
    );
    let state = capture.state();
    let stored = state.error().unwrap();
    assert_eq!(stored.error().name(), "NoMediaRequested");
}

#[wasm_bindgen_test]
async fn fails_on_get_user_media_error() {
    let mock_navigator = MockNavigator::new();
    mock_navigator.error_get_user_media("failed_get_user_media".into());
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());

    let result = capture.start().await;
    mock_navigator.stop();

    let err = result.unwrap_err();
    assert_eq!(err.as_ref().name(), "GetUserMediaFailed");
    assert_eq!(
        err.as_ref().to_string(),
        "MediaDevices.getUserMedia() failed: Unknown JS error: \
         failed_get_user_media",
    );
    assert!(err.into_parts().0.js_cause().is_some());
    assert!(capture.state().error().is_some());
}

#[wasm_bindgen_test]
async fn captures_display() {
    let mock_navigator = MockNavigator::new();
    let mut settings = MediaStreamSettings::new();
    settings.display_video(DisplayVideoTrackConstraints::new());
    let capture = Capture::new(MediaSourceKind::Display, settings);

    let result = capture.start().await;
    mock_navigator.stop();

    let stream = result.unwrap();
    assert!(stream.has_video());
    assert!(!stream.has_audio());
    assert_eq!(stream.source_kind(), MediaSourceKind::Display);
}

#[wasm_bindgen_test]
async fn fails_on_get_display_media_error() {
    let mock_navigator = MockNavigator::new();
    mock_navigator.error_get_display_media("failed_get_display_media".into());
    let mut settings = MediaStreamSettings::new();
    settings.display_video(DisplayVideoTrackConstraints::new());
    let capture = Capture::new(MediaSourceKind::Display, settings);

    let result = capture.start().await;
    mock_navigator.stop();

    assert_eq!(result.unwrap_err().as_ref().name(), "GetDisplayMediaFailed");
}

#[wasm_bindgen_test]
async fn restart_stops_previous_stream() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());

    let first = capture.start().await.unwrap();
    let second = capture.start().await.unwrap();

    assert!(first.is_ended());
    assert!(!second.is_ended());
    assert_eq!(capture.state().ready(), Some(&second));
}

#[wasm_bindgen_test]
async fn stop_releases_stream() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();

    capture.stop();

    assert!(stream.is_ended());
    assert!(capture.state().is_idle());
}

#[wasm_bindgen_test]
async fn stop_supersedes_pending_start() {
    let mock_navigator = MockNavigator::new();
    mock_navigator.get_user_media_delay(100);
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());

    let pending = capture.start();
    let stop = async {
        assert!(capture.state().is_loading());
        capture.stop();
    };
    let (result, _) = future::join(pending, stop).await;
    mock_navigator.stop();

    assert_eq!(*result.unwrap_err().as_ref(), CaptureError::Superseded);
    assert!(capture.state().is_idle());
}

#[wasm_bindgen_test]
async fn last_start_wins() {
    let mock_navigator = MockNavigator::new();
    mock_navigator.get_user_media_delay(50);
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());

    let (first, second) = future::join(capture.start(), capture.start()).await;
    mock_navigator.stop();

    assert_eq!(*first.unwrap_err().as_ref(), CaptureError::Superseded);
    let second = second.unwrap();
    assert_eq!(capture.state().ready(), Some(&second));
}

#[wasm_bindgen_test]
async fn settings_apply_on_next_start() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();

    let mut audio_only = MediaStreamSettings::new();
    audio_only.audio(AudioTrackConstraints::new());
    capture.set_settings(audio_only);

    assert!(stream.has_video());
    assert!(!stream.is_ended());

    let stream = capture.start().await.unwrap();
    assert!(stream.has_audio());
    assert_eq!(stream.tracks_of(MediaKind::Video).count(), 0);
}

#[wasm_bindgen_test]
async fn ended_tracks_reset_capture() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();

    for track in stream.tracks() {
        let track: &web_sys::MediaStreamTrack = track.as_ref();
        track.stop();
        track
            .dispatch_event(&web_sys::Event::new("ended").unwrap())
            .unwrap();
    }

    assert!(capture.state().is_idle());
}

#[wasm_bindgen_test]
async fn partially_ended_stream_stays_ready() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();

    let track = stream.tracks_of(MediaKind::Audio).next().unwrap();
    let track: &web_sys::MediaStreamTrack = track.as_ref();
    track.stop();
    track
        .dispatch_event(&web_sys::Event::new("ended").unwrap())
        .unwrap();

    assert_eq!(capture.state().ready(), Some(&stream));
}

#[wasm_bindgen_test]
async fn dropping_capture_stops_tracks() {
    let capture = Capture::new(MediaSourceKind::Device, audio_video_settings());
    let stream = capture.start().await.unwrap();
    assert!(!stream.is_ended());

    drop(capture);

    assert!(stream.is_ended());
}
