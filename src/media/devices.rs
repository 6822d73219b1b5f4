//! Media devices enumeration.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use derive_more::Display;
use tracerr::Traced;
use web_sys::Event;

use crate::{
    media::MediaDeviceKind,
    platform::{self, EventListener, MediaDeviceInfo},
    store::{Request, RequestState, Resolution, Store, Subscription},
    utils::{clone_traced, JsCaused},
};

/// State of a [`DeviceList`].
pub type DeviceListState = RequestState<Rc<[MediaDeviceInfo]>, DevicesError>;

/// Errors occurring when enumerating media devices.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum DevicesError {
    /// [enumerateDevices()][1] request failed.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dom-mediadevices-enumeratedevices
    #[display(fmt = "MediaDevices.enumerateDevices() failed: {}", _0)]
    EnumerateDevicesFailed(platform::Error),

    /// Failed to bind to the [devicechange][1] event.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams#event-mediadevices-devicechange
    #[display(fmt = "Failed to bind to 'devicechange' event: {}", _0)]
    DeviceChangeListenerBindFailed(platform::Error),
}

impl JsCaused for DevicesError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::EnumerateDevicesFailed(_) => "EnumerateDevicesFailed",
            Self::DeviceChangeListenerBindFailed(_) => {
                "DeviceChangeListenerBindFailed"
            }
        }
    }

    fn js_cause(self) -> Option<platform::Error> {
        match self {
            Self::EnumerateDevicesFailed(e)
            | Self::DeviceChangeListenerBindFailed(e) => Some(e),
        }
    }
}

#[derive(Debug)]
struct InnerDeviceList {
    /// Enumeration lifecycle.
    request: Request<Rc<[MediaDeviceInfo]>, DevicesError>,

    /// [devicechange][1] listener, if watching.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams#event-mediadevices-devicechange
    device_change:
        RefCell<Option<EventListener<web_sys::MediaDevices, Event>>>,
}

/// Observable list of the available media devices.
///
/// Clones share the same underlying list.
#[derive(Clone, Debug)]
pub struct DeviceList(Rc<InnerDeviceList>);

impl DeviceList {
    /// Creates a new [`RequestState::Idle`] [`DeviceList`].
    ///
    /// Nothing is enumerated until [`DeviceList::refresh`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(InnerDeviceList {
            request: Request::new(),
            device_change: RefCell::new(None),
        }))
    }

    /// Re-enumerates the available media devices.
    ///
    /// A previously enumerated list stays visible until the new one is
    /// ready. If [`DeviceList::refresh`] is called again before this one
    /// completes, this one's result is discarded.
    ///
    /// # Errors
    ///
    /// With [`DevicesError::EnumerateDevicesFailed`] if the platform request
    /// fails.
    pub async fn refresh(
        &self,
    ) -> Result<Rc<[MediaDeviceInfo]>, Traced<DevicesError>> {
        Self::refresh_inner(&self.0).await
    }

    /// Starts re-enumerating the media devices whenever the set of the
    /// available ones changes. Does nothing if already watching.
    ///
    /// Watching stops once the last clone of this [`DeviceList`] is dropped.
    ///
    /// # Errors
    ///
    /// With [`DevicesError::DeviceChangeListenerBindFailed`] if the
    /// [devicechange][1] event binding fails.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams#event-mediadevices-devicechange
    pub fn watch(&self) -> Result<(), Traced<DevicesError>> {
        if self.0.device_change.borrow().is_some() {
            return Ok(());
        }

        let weak_inner = Rc::downgrade(&self.0);
        let listener = platform::on_device_change(move || {
            let weak_inner: Weak<InnerDeviceList> = weak_inner.clone();
            platform::spawn(async move {
                if let Some(inner) = weak_inner.upgrade() {
                    log::debug!("Media devices have changed");
                    if let Err(e) = Self::refresh_inner(&inner).await {
                        log::error!("Failed to refresh media devices: {}", e);
                    }
                }
            });
        })
        .map_err(|e| {
            let (e, trace) = e.into_parts();
            Traced::from_parts(
                DevicesError::DeviceChangeListenerBindFailed(e.cause()),
                trace,
            )
        })
        .map_err(tracerr::wrap!())?;

        self.0.device_change.replace(Some(listener));
        Ok(())
    }

    /// Indicates whether this [`DeviceList`] is watching for the available
    /// media devices changes.
    #[inline]
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.0.device_change.borrow().is_some()
    }

    /// Returns the current [`DeviceListState`].
    #[inline]
    #[must_use]
    pub fn state(&self) -> DeviceListState {
        self.0.request.state()
    }

    /// Returns the [`Store`] of this [`DeviceList`]'s [`DeviceListState`].
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<DeviceListState> {
        self.0.request.store()
    }

    /// Calls the provided `callback` on each [`DeviceListState`] change.
    #[inline]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(DeviceListState) + 'static,
    {
        self.0.request.on_change(callback)
    }

    /// Returns the enumerated devices of the provided [`MediaDeviceKind`].
    ///
    /// Empty if nothing has been enumerated yet.
    #[must_use]
    pub fn devices_of(&self, kind: MediaDeviceKind) -> Vec<MediaDeviceInfo> {
        filter_by_kind(&self.state(), kind)
    }

    /// Returns the enumerated audio input devices.
    #[inline]
    #[must_use]
    pub fn audio_inputs(&self) -> Vec<MediaDeviceInfo> {
        self.devices_of(MediaDeviceKind::AudioInput)
    }

    /// Returns the enumerated video input devices.
    #[inline]
    #[must_use]
    pub fn video_inputs(&self) -> Vec<MediaDeviceInfo> {
        self.devices_of(MediaDeviceKind::VideoInput)
    }

    /// Returns the enumerated audio output devices.
    #[inline]
    #[must_use]
    pub fn audio_outputs(&self) -> Vec<MediaDeviceInfo> {
        self.devices_of(MediaDeviceKind::AudioOutput)
    }

    async fn refresh_inner(
        inner: &InnerDeviceList,
    ) -> Result<Rc<[MediaDeviceInfo]>, Traced<DevicesError>> {
        let ticket = inner.request.begin_keeping_ready();

        let result = platform::enumerate_devices()
            .await
            .map(Rc::from)
            .map_err(|e| {
                let (e, trace) = e.into_parts();
                Traced::from_parts(
                    DevicesError::EnumerateDevicesFailed(e),
                    trace,
                )
            })
            .map_err(tracerr::wrap!());
        let stored = match &result {
            Ok(devices) => Ok(Rc::clone(devices)),
            Err(e) => Err(clone_traced(e)),
        };

        match inner.request.resolve(ticket, stored) {
            Resolution::Applied => {
                if let Ok(devices) = &result {
                    log::debug!("Enumerated {} media devices", devices.len());
                }
                result
            }
            Resolution::Superseded(_) => {
                log::debug!("Media devices enumeration has been superseded");
                result
            }
        }
    }
}

impl Default for DeviceList {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Returns devices of the provided [`MediaDeviceKind`] from the ready
/// `state`.
fn filter_by_kind(
    state: &DeviceListState,
    kind: MediaDeviceKind,
) -> Vec<MediaDeviceInfo> {
    state
        .ready()
        .map(|devices| {
            devices.iter().filter(|d| d.kind == kind).cloned().collect()
        })
        .unwrap_or_default()
}
