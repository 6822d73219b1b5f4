//! Helpers for binding to JS side events.

mod event_listener;

#[doc(inline)]
pub use self::event_listener::{EventListener, EventListenerBindError};
