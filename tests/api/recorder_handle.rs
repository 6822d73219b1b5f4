#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use medea_capture::{MediaCapture, RecorderOptions, RecordingState};
use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use crate::{
    audio_video_settings, get_capture_exception, get_local_media_stream,
    resolve_after,
};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn snapshot_lists_segments() {
    let media = MediaCapture::new();
    let capture = media.user_media(&audio_video_settings().into());
    let stream = get_local_media_stream(
        JsFuture::from(capture.start()).await.unwrap(),
    );
    let mut options = RecorderOptions::new();
    options.timeslice_ms(100);
    let recorder = media.recorder(&options);

    JsFuture::from(recorder.start(&stream)).await.unwrap();
    assert_eq!(recorder.state(), RecordingState::Recording);
    resolve_after(250).await.unwrap();
    JsFuture::from(recorder.stop()).await.unwrap();
    resolve_after(100).await.unwrap();

    let snapshot = recorder.snapshot();
    assert_eq!(
        Reflect::get(&snapshot, &"state".into())
            .unwrap()
            .as_f64()
            .unwrap() as u32,
        RecordingState::Inactive as u32,
    );
    let segments = Array::from(
        &Reflect::get(&snapshot, &"segments".into()).unwrap(),
    );
    assert!(segments.length() >= 1);
    let segment = segments.get(0);
    assert_eq!(
        Reflect::get(&segment, &"index".into()).unwrap().as_f64(),
        Some(0.0),
    );
    assert!(Reflect::get(&segment, &"data".into())
        .unwrap()
        .is_instance_of::<web_sys::Blob>());
    for key in &["size", "startedAt", "duration"] {
        assert!(Reflect::get(&segment, &(*key).into())
            .unwrap()
            .as_f64()
            .is_some());
    }

    recorder.clear();
    let cleared = recorder.snapshot();
    assert_eq!(
        Array::from(&Reflect::get(&cleared, &"segments".into()).unwrap())
            .length(),
        0,
    );
}

#[wasm_bindgen_test]
async fn commands_reject_with_exception() {
    let recorder = MediaCapture::new().recorder(&RecorderOptions::new());

    let err = JsFuture::from(recorder.pause()).await.unwrap_err();
    let err = get_capture_exception(err);

    assert_eq!(err.name(), "InvalidState");
    assert_eq!(err.message(), "Operation is not allowed while inactive");
}

#[wasm_bindgen_test]
fn reports_supported_types() {
    assert!(MediaCapture::is_type_supported("video/webm"));
    assert!(!MediaCapture::is_type_supported("video/unknown"));
}
