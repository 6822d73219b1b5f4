#![cfg(target_arch = "wasm32")]

use std::{cell::Cell, rc::Rc};

use futures::channel::oneshot;
use js_sys::{Function, Object, Reflect};
use medea_capture::{
    AudioTrackConstraints, MediaCapture, MediaSourceKind, MediaStreamSettings,
    RequestStatus,
};
use wasm_bindgen::{prelude::*, JsCast as _};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use crate::{
    get_capture_exception, resolve_after, wait_and_check_test_result,
    MockNavigator,
};

wasm_bindgen_test_configure!(run_in_browser);

fn audio_settings() -> MediaStreamSettings {
    let mut settings = MediaStreamSettings::new();
    settings.audio(AudioTrackConstraints::new());
    settings
}

fn status_of(snapshot: &JsValue) -> u32 {
    Reflect::get(snapshot, &"status".into())
        .unwrap()
        .as_f64()
        .unwrap() as u32
}

#[wasm_bindgen_test]
async fn snapshot_is_cached_until_change() {
    let capture = MediaCapture::new().user_media(&audio_settings());
    assert_eq!(capture.kind(), MediaSourceKind::Device);

    let idle = capture.snapshot();
    assert!(Object::is(&idle, &capture.snapshot()));
    assert!(Object::is_frozen::<JsValue>(&idle.clone().unchecked_into()));
    assert_eq!(status_of(&idle), RequestStatus::Idle as u32);

    JsFuture::from(capture.start()).await.unwrap();

    let ready = capture.snapshot();
    assert!(!Object::is(&idle, &ready));
    assert!(Object::is(&ready, &capture.snapshot()));
    assert_eq!(status_of(&ready), RequestStatus::Ready as u32);
    assert!(!Reflect::get(&ready, &"stream".into()).unwrap().is_undefined());
    assert!(Reflect::get(&ready, &"error".into()).unwrap().is_undefined());
}

#[wasm_bindgen_test]
async fn start_rejects_with_exception() {
    let mock_navigator = MockNavigator::new();
    mock_navigator.error_get_user_media("failed_get_user_media".into());
    let capture = MediaCapture::new().user_media(&audio_settings());

    let result = JsFuture::from(capture.start()).await;
    mock_navigator.stop();

    let err = get_capture_exception(result.unwrap_err());
    assert_eq!(err.name(), "GetUserMediaFailed");
    assert_eq!(
        err.message(),
        "MediaDevices.getUserMedia() failed: Unknown JS error: \
         failed_get_user_media",
    );
    assert_eq!(capture.status(), RequestStatus::Failed);
    let snapshot = capture.snapshot();
    assert!(!Reflect::get(&snapshot, &"error".into())
        .unwrap()
        .is_undefined());
}

#[wasm_bindgen_test]
async fn subscriber_is_notified_until_unsubscribed() {
    let capture = MediaCapture::new().user_media(&audio_settings());
    let calls = Rc::new(Cell::new(0));
    let (test_tx, test_rx) = oneshot::channel();
    let mut test_tx = Some(test_tx);

    let callback = Closure::wrap(Box::new({
        let calls = Rc::clone(&calls);
        move || {
            calls.set(calls.get() + 1);
            if let Some(tx) = test_tx.take() {
                tx.send(Ok(())).unwrap();
            }
        }
    }) as Box<dyn FnMut()>);
    let unsubscribe: Function =
        capture.subscribe(callback.as_ref().clone().unchecked_into());

    JsFuture::from(capture.start()).await.unwrap();
    wait_and_check_test_result(test_rx).await;
    assert!(calls.get() >= 1);

    unsubscribe.call0(&JsValue::NULL).unwrap();
    unsubscribe.call0(&JsValue::NULL).unwrap();
    resolve_after(10).await.unwrap();
    let before = calls.get();
    JsFuture::from(capture.stop()).await.unwrap();
    resolve_after(50).await.unwrap();
    assert_eq!(calls.get(), before);

    drop(callback);
}

#[wasm_bindgen_test]
async fn stop_moves_to_idle() {
    let capture = MediaCapture::new().user_media(&audio_settings());
    JsFuture::from(capture.start()).await.unwrap();
    assert_eq!(capture.status(), RequestStatus::Ready);

    JsFuture::from(capture.stop()).await.unwrap();

    assert_eq!(capture.status(), RequestStatus::Idle);
    let snapshot = capture.snapshot();
    assert_eq!(status_of(&snapshot), RequestStatus::Idle as u32);
    assert!(Reflect::get(&snapshot, &"stream".into())
        .unwrap()
        .is_undefined());
}

#[wasm_bindgen_test]
fn repeated_construction_initializes_once() {
    let first = MediaCapture::new();
    let second = MediaCapture::new();

    assert_eq!(
        first.user_media(&audio_settings()).status(),
        second.user_media(&audio_settings()).status(),
    );
}
