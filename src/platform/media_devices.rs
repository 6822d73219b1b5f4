//! [MediaDevices][1] functionality.
//!
//! [1]: https://w3.org/TR/mediacapture-streams#mediadevices

use std::{convert::TryFrom as _, rc::Rc};

use tracerr::Traced;
use wasm_bindgen_futures::JsFuture;
use web_sys::Event;

use crate::platform::{
    DisplayMediaStreamConstraints, Error, EventListener,
    EventListenerBindError, MediaDeviceInfo, MediaStream,
    MediaStreamConstraints,
};

use super::window;

/// Returns [MediaDevices][1] of the current [`Window`].
///
/// # Errors
///
/// If [MediaDevices][1] are unavailable (insecure context, for example).
///
/// [`Window`]: web_sys::Window
/// [1]: https://w3.org/TR/mediacapture-streams#mediadevices
fn media_devices() -> Result<web_sys::MediaDevices, Traced<Error>> {
    window()
        .navigator()
        .media_devices()
        .map_err(Error::from)
        .map_err(tracerr::wrap!())
}

/// Collects information about the User Agent's available media devices.
///
/// Adapter for a [MediaDevices.enumerateDevices()][1] function.
///
/// Devices of unknown kinds are skipped.
///
/// # Errors
///
/// With [`Error`] if [MediaDevices.enumerateDevices()][1] returns error or
/// cannot get [MediaDevices][2].
///
/// [1]: https://tinyurl.com/w3-streams#dom-mediadevices-enumeratedevices
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub async fn enumerate_devices() -> Result<Vec<MediaDeviceInfo>, Traced<Error>>
{
    let devices = media_devices()?;
    let devices = JsFuture::from(
        devices
            .enumerate_devices()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())?,
    )
    .await
    .map_err(Error::from)
    .map_err(tracerr::wrap!())?;

    Ok(js_sys::Array::from(&devices)
        .iter()
        .filter_map(|info| {
            let info = web_sys::MediaDeviceInfo::from(info);
            MediaDeviceInfo::try_from(info).ok()
        })
        .collect())
}

/// Prompts a user for a permission to use a media input which produces a
/// [`MediaStream`] containing the requested types of media.
///
/// Adapter for a [MediaDevices.getUserMedia()][1] function.
///
/// # Errors
///
/// With [`Error`] if [MediaDevices.getUserMedia()][1] returns error or cannot
/// get [MediaDevices][2].
///
/// [1]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub async fn get_user_media(
    caps: MediaStreamConstraints,
) -> Result<MediaStream, Traced<Error>> {
    let media_devices = media_devices()?;

    let stream = JsFuture::from(
        media_devices
            .get_user_media_with_constraints(caps.as_ref())
            .map_err(Error::from)
            .map_err(tracerr::wrap!())?,
    )
    .await
    .map_err(Error::from)
    .map_err(tracerr::wrap!())?;

    Ok(MediaStream::from(web_sys::MediaStream::from(stream)))
}

/// Prompts a user to select and grant a permission to capture contents of a
/// display or portion thereof (such as a single window) as a
/// [`MediaStream`].
///
/// Adapter for a [MediaDevices.getDisplayMedia()][1] function.
///
/// # Errors
///
/// With [`Error`] if [MediaDevices.getDisplayMedia()][1] returns error or
/// cannot get [MediaDevices][2].
///
/// [1]: https://w3.org/TR/screen-capture#dom-mediadevices-getdisplaymedia
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub async fn get_display_media(
    caps: DisplayMediaStreamConstraints,
) -> Result<MediaStream, Traced<Error>> {
    let media_devices = media_devices()?;

    let stream = JsFuture::from(
        media_devices
            .get_display_media_with_constraints(caps.as_ref())
            .map_err(Error::from)
            .map_err(tracerr::wrap!())?,
    )
    .await
    .map_err(Error::from)
    .map_err(tracerr::wrap!())?;

    Ok(MediaStream::from(web_sys::MediaStream::from(stream)))
}

/// Binds the provided `callback` to the [devicechange][1] event of
/// [MediaDevices][2], fired whenever the set of available media devices
/// changes.
///
/// The `callback` is unbound once the returned [`EventListener`] is dropped.
///
/// # Errors
///
/// With [`EventListenerBindError`] if [MediaDevices][2] are unavailable or
/// the event binding fails.
///
/// [1]: https://w3.org/TR/mediacapture-streams#event-mediadevices-devicechange
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub fn on_device_change<F>(
    mut callback: F,
) -> Result<
    EventListener<web_sys::MediaDevices, Event>,
    Traced<EventListenerBindError>,
>
where
    F: FnMut() + 'static,
{
    let media_devices = media_devices().map_err(|e| {
        tracerr::new!(EventListenerBindError::new(
            "devicechange",
            e.into_inner(),
        ))
    })?;

    EventListener::new_mut(
        Rc::new(media_devices),
        "devicechange",
        move |_: Event| callback(),
    )
}
