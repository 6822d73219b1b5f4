//! Miscellaneous utility structs and functions.

use derive_more::From;
use futures::future::AbortHandle;
use tracerr::Traced;

/// Representation of an error which can be caused by an error on the JS side.
pub trait JsCaused {
    /// Type of the wrapper for JS errors.
    type Error;

    /// Returns name of this error.
    fn name(&self) -> &'static str;

    /// Returns the JS error if it's the cause.
    fn js_cause(self) -> Option<Self::Error>;
}

/// Wrapper around [`AbortHandle`] which aborts [`Future`] on [`Drop`].
///
/// [`Future`]: std::future::Future
#[derive(Debug, From)]
pub struct TaskHandle(AbortHandle);

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Converts the provided [`Duration`] into `i32` milliseconds, the only
/// duration type the JS side timers and [MediaRecorder.start()][1] accept.
///
/// Durations longer than [`i32::MAX`] milliseconds are truncated.
///
/// [`Duration`]: std::time::Duration
/// [1]: https://w3.org/TR/mediastream-recording#dom-mediarecorder-start
#[must_use]
pub fn as_js_millis(duration: std::time::Duration) -> i32 {
    use std::convert::TryInto as _;

    duration.as_millis().try_into().unwrap_or(i32::MAX)
}

/// Duplicates the provided [`Traced`] error along with its trace.
#[must_use]
pub fn clone_traced<E: Clone>(err: &Traced<E>) -> Traced<E> {
    Traced::from_parts(err.as_ref().clone(), err.trace().clone())
}
