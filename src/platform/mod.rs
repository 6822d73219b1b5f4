//! Adapters over the browser APIs used by this crate.
//!
//! Everything above this module works with the wrappers defined here and
//! never touches [`web_sys`] directly.

mod constraints;
mod device_info;
mod error;
mod media_devices;
mod media_recorder;
mod media_stream;
mod media_track;
mod utils;

use std::{future::Future, sync::Once};

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::Window;

#[doc(inline)]
pub use self::{
    constraints::{DisplayMediaStreamConstraints, MediaStreamConstraints},
    device_info::{MediaDeviceInfo, UnknownDeviceKindError},
    error::Error,
    media_devices::{
        enumerate_devices, get_display_media, get_user_media,
        on_device_change,
    },
    media_recorder::MediaRecorder,
    media_stream::MediaStream,
    media_track::MediaStreamTrack,
    utils::{EventListener, EventListenerBindError},
};

/// Returns [`Window`] object.
///
/// # Panics
///
/// When global [`Window`] object is inaccessible.
#[must_use]
pub fn window() -> Window {
    // Cannot use `lazy_static` since `window` is `!Sync`.
    // Safe to unwrap.
    web_sys::window().unwrap()
}

/// Initializes [`wasm_logger`] as the default application logger, routing
/// [`log`] records to the browser console.
///
/// Only the first call installs the logger, the following ones do nothing.
pub fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}

/// Sets Rust's [panic hook][1] providing backtrace of the occurred panic to
/// the browser console.
///
/// [1]: https://doc.rust-lang.org/std/panic/fn.set_hook.html
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Runs the provided [`Future`] on the current thread's JS microtask queue.
#[inline]
pub fn spawn<F>(task: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task);
}

/// Returns property of JS object by name if its defined.
/// Converts the value with a given predicate.
pub fn get_property_by_name<T, F, U>(
    value: &T,
    name: &str,
    into: F,
) -> Option<U>
where
    T: AsRef<JsValue>,
    F: Fn(JsValue) -> Option<U>,
{
    Reflect::get(value.as_ref(), &JsValue::from_str(name))
        .ok()
        .and_then(into)
}
