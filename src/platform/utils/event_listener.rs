use std::{ops::Deref, rc::Rc};

use derive_more::Display;
use tracerr::Traced;
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast as _};

use crate::platform;

/// Failed to bind to [`EventTarget`][1] event.
///
/// [1]: https://developer.mozilla.org/en-US/docs/Web/API/EventTarget
#[derive(Clone, Debug, Display, PartialEq)]
#[display(fmt = "Failed to bind to '{}' event: {}", event_name, cause)]
pub struct EventListenerBindError {
    /// Name of the event the binding was attempted to.
    event_name: &'static str,

    /// JS side error thrown by [addEventListener()][1].
    ///
    /// [1]: https://tinyurl.com/dom-addeventlistener
    cause: platform::Error,
}

impl EventListenerBindError {
    /// Creates a new [`EventListenerBindError`] of binding to the
    /// `event_name` event failed with the provided `cause`.
    #[inline]
    #[must_use]
    pub fn new(event_name: &'static str, cause: platform::Error) -> Self {
        Self { event_name, cause }
    }

    /// Returns the JS side error thrown on binding.
    #[inline]
    #[must_use]
    pub fn cause(&self) -> platform::Error {
        self.cause.clone()
    }
}

/// Wrapper for closure that handles some [`EventTarget`] event.
///
/// The handler is unregistered once this [`EventListener`] is dropped.
///
/// [`EventTarget`]: web_sys::EventTarget
#[derive(Debug)]
pub struct EventListener<T, A>
where
    T: Deref<Target = web_sys::EventTarget>,
{
    event_name: &'static str,
    target: Rc<T>,
    closure: Closure<dyn FnMut(A)>,
}

impl<T, A> EventListener<T, A>
where
    T: Deref<Target = web_sys::EventTarget>,
    A: FromWasmAbi + 'static,
{
    /// Creates new [`EventListener`] from a given [`FnMut`] `closure`.
    ///
    /// # Errors
    ///
    /// Errors if [`EventListener`] bound fails.
    pub fn new_mut<F>(
        target: Rc<T>,
        event_name: &'static str,
        closure: F,
    ) -> Result<Self, Traced<EventListenerBindError>>
    where
        F: FnMut(A) + 'static,
    {
        let closure = Closure::wrap(Box::new(closure) as Box<dyn FnMut(A)>);
        Self::bind(target, event_name, closure)
    }

    /// Creates new [`EventListener`] from a given [`FnOnce`] `closure`.
    ///
    /// # Errors
    ///
    /// Errors if [`EventListener`] bound fails.
    pub fn new_once<F>(
        target: Rc<T>,
        event_name: &'static str,
        closure: F,
    ) -> Result<Self, Traced<EventListenerBindError>>
    where
        F: FnOnce(A) + 'static,
    {
        let closure: Closure<dyn FnMut(A)> = Closure::once(closure);
        Self::bind(target, event_name, closure)
    }

    /// Registers the provided `closure` as `event_name` handler of the
    /// `target`.
    fn bind(
        target: Rc<T>,
        event_name: &'static str,
        closure: Closure<dyn FnMut(A)>,
    ) -> Result<Self, Traced<EventListenerBindError>> {
        target
            .add_event_listener_with_callback(
                event_name,
                closure.as_ref().unchecked_ref(),
            )
            .map_err(platform::Error::from)
            .map_err(|cause| EventListenerBindError::new(event_name, cause))
            .map_err(tracerr::wrap!())?;

        Ok(Self {
            event_name,
            target,
            closure,
        })
    }
}

impl<T, A> Drop for EventListener<T, A>
where
    T: Deref<Target = web_sys::EventTarget>,
{
    /// Drops [`EventListener`]'s closure and unregisters appropriate event
    /// handler.
    fn drop(&mut self) {
        let target: &web_sys::EventTarget = &self.target;
        if let Err(err) = target.remove_event_listener_with_callback(
            self.event_name,
            self.closure.as_ref().unchecked_ref(),
        ) {
            log::error!(
                "Failed to remove '{}' EventListener: {:?}",
                self.event_name,
                err,
            );
        }
    }
}
