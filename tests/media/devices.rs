#![cfg(target_arch = "wasm32")]

use futures::FutureExt as _;
use medea_capture::{
    media::{DeviceList, MediaDeviceKind},
    platform::window,
    utils::JsCaused as _,
};
use wasm_bindgen_test::*;

use crate::{resolve_after, MockNavigator};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn enumerates_devices() {
    let devices = DeviceList::new();
    assert!(devices.state().is_idle());

    let enumerated = devices.refresh().await.unwrap();

    assert!(enumerated.len() >= 2);
    assert_eq!(devices.state().ready(), Some(&enumerated));
    assert!(!devices.audio_inputs().is_empty());
    assert!(!devices.video_inputs().is_empty());
    assert!(devices
        .video_inputs()
        .iter()
        .all(|d| d.kind == MediaDeviceKind::VideoInput));
}

#[wasm_bindgen_test]
async fn fails_on_enumerate_devices_error() {
    let mock_navigator = MockNavigator::new();
    mock_navigator
        .error_enumerate_devices("failed_enumerate_devices".into());
    let devices = DeviceList::new();

    let result = devices.refresh().await;
    mock_navigator.stop();

    let err = result.unwrap_err();
    assert_eq!(err.as_ref().name(), "EnumerateDevicesFailed");
    assert_eq!(
        err.as_ref().to_string(),
        "MediaDevices.enumerateDevices() failed: Unknown JS error: \
         failed_enumerate_devices",
    );
    assert!(devices.state().error().is_some());
    assert!(devices.audio_inputs().is_empty());
}

#[wasm_bindgen_test]
async fn keeps_previous_list_while_refreshing() {
    let devices = DeviceList::new();
    let enumerated = devices.refresh().await.unwrap();

    let mut refreshing = Box::pin(devices.refresh());
    assert!((&mut refreshing).now_or_never().is_none());
    assert!(!devices.state().is_loading());
    assert_eq!(devices.state().ready(), Some(&enumerated));

    refreshing.await.unwrap();
    assert!(devices.state().ready().is_some());
}

#[wasm_bindgen_test]
async fn watches_device_changes_once() {
    let devices = DeviceList::new();
    assert!(!devices.is_watching());

    devices.watch().unwrap();
    devices.watch().unwrap();

    assert!(devices.is_watching());
}

#[wasm_bindgen_test]
async fn device_change_triggers_refresh() {
    let devices = DeviceList::new();
    devices.watch().unwrap();
    let version = devices.store().version();

    window()
        .navigator()
        .media_devices()
        .unwrap()
        .dispatch_event(&web_sys::Event::new("devicechange").unwrap())
        .unwrap();
    resolve_after(200).await.unwrap();

    assert!(devices.store().version() > version);
    assert!(devices.state().ready().is_some());
}

#[wasm_bindgen_test]
async fn unwatched_list_ignores_device_change() {
    let devices = DeviceList::new();

    window()
        .navigator()
        .media_devices()
        .unwrap()
        .dispatch_event(&web_sys::Event::new("devicechange").unwrap())
        .unwrap();
    resolve_after(100).await.unwrap();

    assert_eq!(devices.store().version(), 0);
    assert!(devices.state().is_idle());
}
