//! Handle of the available media devices list.

use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    api::{
        snapshot::{self, SnapshotCache},
        CaptureException, MediaDeviceKind, RequestStatus,
    },
    media::{self, DeviceListState},
    platform::MediaDeviceInfo,
};

/// Converts the provided devices into a JS array of plain
/// `{ deviceId, kind, label, groupId }` objects.
fn devices_to_js(devices: &[MediaDeviceInfo]) -> JsValue {
    JsValue::from_serde(devices).unwrap_or_else(|e| {
        log::error!("Failed to serialize media devices: {}", e);
        js_sys::Array::new().into()
    })
}

/// List of the available media devices, observable as an external store.
///
/// Its `snapshot()` is a frozen object of shape
/// `{ status: RequestStatus, devices: MediaDeviceInfo[],
/// error?: CaptureException }`. A previously enumerated list stays in
/// `devices` while re-enumerating.
#[wasm_bindgen]
#[derive(Debug)]
pub struct MediaDevicesHandle {
    devices: media::DeviceList,
    snapshot: SnapshotCache,
}

impl From<media::DeviceList> for MediaDevicesHandle {
    #[inline]
    fn from(devices: media::DeviceList) -> Self {
        Self {
            devices,
            snapshot: SnapshotCache::default(),
        }
    }
}

#[wasm_bindgen]
impl MediaDevicesHandle {
    /// Re-enumerates the available media devices.
    ///
    /// The returned [`Promise`] resolves with an array of the enumerated
    /// devices or rejects with a [`CaptureException`].
    pub fn refresh(&self) -> Promise {
        let devices = self.devices.clone();
        future_to_promise(async move {
            devices
                .refresh()
                .await
                .map(|devices| devices_to_js(&devices))
                .map_err(CaptureException::from)
                .map_err(JsValue::from)
        })
    }

    /// Starts re-enumerating the media devices whenever the set of the
    /// available ones changes.
    ///
    /// # Errors
    ///
    /// With a [`CaptureException`] if the `devicechange` event binding fails.
    pub fn watch(&self) -> Result<(), JsValue> {
        self.devices
            .watch()
            .map_err(CaptureException::from)
            .map_err(JsValue::from)
    }

    /// Returns [`RequestStatus`] of the enumeration.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        (&self.devices.state()).into()
    }

    /// Returns the enumerated devices of the provided [`MediaDeviceKind`].
    #[must_use]
    pub fn devices_of(&self, kind: MediaDeviceKind) -> JsValue {
        devices_to_js(&self.devices.devices_of(kind.into()))
    }

    /// Returns the enumerated audio input devices.
    #[must_use]
    pub fn audio_inputs(&self) -> JsValue {
        devices_to_js(&self.devices.audio_inputs())
    }

    /// Returns the enumerated video input devices.
    #[must_use]
    pub fn video_inputs(&self) -> JsValue {
        devices_to_js(&self.devices.video_inputs())
    }

    /// Returns the enumerated audio output devices.
    #[must_use]
    pub fn audio_outputs(&self) -> JsValue {
        devices_to_js(&self.devices.audio_outputs())
    }

    /// Calls the provided `callback` on each change of the devices list.
    ///
    /// Returns a function cancelling the subscription.
    pub fn subscribe(&self, callback: Function) -> Function {
        snapshot::subscribe(self.devices.store(), callback)
    }

    /// Returns the current snapshot of the devices list.
    #[must_use]
    pub fn snapshot(&self) -> JsValue {
        self.snapshot.get(self.devices.store(), |state: DeviceListState| {
            let status = RequestStatus::from(&state);
            let devices = state.ready().map_or_else(
                || js_sys::Array::new().into(),
                |devices| devices_to_js(devices),
            );
            let error = state.error().map_or(JsValue::UNDEFINED, |e| {
                CaptureException::from(e).into()
            });
            snapshot::frozen_object(&[
                ("status", JsValue::from(status as u32)),
                ("devices", devices),
                ("error", error),
            ])
        })
    }
}
