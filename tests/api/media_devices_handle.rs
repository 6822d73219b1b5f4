#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use medea_capture::{MediaCapture, MediaDeviceKind};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use crate::{get_capture_exception, MockNavigator};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn refresh_resolves_with_devices() {
    let devices = MediaCapture::new().media_devices();

    let list = JsFuture::from(devices.refresh()).await.unwrap();

    let list = Array::from(&list);
    assert!(list.length() >= 2);
    let first = list.get(0);
    for key in &["deviceId", "kind", "label", "groupId"] {
        assert!(Reflect::has(&first, &(*key).into()).unwrap());
    }
    let video = Array::from(&devices.devices_of(MediaDeviceKind::VideoInput));
    assert_eq!(video.length(), Array::from(&devices.video_inputs()).length());
    assert!(video.length() >= 1);
}

#[wasm_bindgen_test]
async fn refresh_rejects_with_exception() {
    let mock_navigator = MockNavigator::new();
    mock_navigator
        .error_enumerate_devices("failed_enumerate_devices".into());
    let devices = MediaCapture::new().media_devices();

    let result = JsFuture::from(devices.refresh()).await;
    mock_navigator.stop();

    let err = get_capture_exception(result.unwrap_err());
    assert_eq!(err.name(), "EnumerateDevicesFailed");
    assert_eq!(
        err.message(),
        "MediaDevices.enumerateDevices() failed: Unknown JS error: \
         failed_enumerate_devices",
    );
}

#[wasm_bindgen_test]
async fn handles_share_devices_list() {
    let media = MediaCapture::new();
    let first = media.media_devices();
    let second = media.media_devices();

    JsFuture::from(first.refresh()).await.unwrap();

    let snapshot = second.snapshot();
    assert!(Object::is_frozen(&Object::from(snapshot.clone())));
    let list = Reflect::get(&snapshot, &"devices".into()).unwrap();
    assert!(Array::from(&list).length() >= 2);
}
