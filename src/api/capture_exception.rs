//! Exception thrown to the JS side.

use std::{borrow::Cow, fmt};

use tracerr::{Trace, Traced};
use wasm_bindgen::prelude::*;

use crate::{
    platform,
    store::SharedError,
    utils::{clone_traced, JsCaused},
};

/// Exception thrown when some capturing, enumeration or recording operation
/// fails.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct CaptureException {
    /// Name of the error kind (`GetUserMediaFailed`, `InvalidState`, etc).
    name: &'static str,

    /// Message describing the problem.
    message: Cow<'static, str>,

    /// [`platform::Error`] that caused this [`CaptureException`].
    cause: Option<platform::Error>,

    /// Stacktrace of this [`CaptureException`].
    trace: Trace,
}

impl CaptureException {
    /// Creates a new [`CaptureException`] from the provided error `name`,
    /// `message`, optional `cause` and `trace`.
    #[inline]
    #[must_use]
    pub fn new<M: Into<Cow<'static, str>>>(
        name: &'static str,
        message: M,
        cause: Option<platform::Error>,
        trace: Trace,
    ) -> Self {
        Self {
            name,
            message: message.into(),
            cause,
            trace,
        }
    }
}

#[wasm_bindgen]
impl CaptureException {
    /// Returns name of the error kind.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.to_owned()
    }

    /// Returns error message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns native stacktrace of this [`CaptureException`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }

    /// Returns the JS side error that caused this [`CaptureException`], if
    /// any.
    #[must_use]
    pub fn cause(&self) -> Option<js_sys::Error> {
        self.cause.clone().map(Into::into)
    }
}

impl fmt::Display for CaptureException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}\n{}", self.name, self.message, self.trace)
    }
}

impl<E> From<Traced<E>> for CaptureException
where
    E: JsCaused<Error = platform::Error> + fmt::Display,
{
    fn from(err: Traced<E>) -> Self {
        let (err, trace) = err.into_parts();
        Self::new(err.name(), err.to_string(), err.js_cause(), trace)
    }
}

impl<E> From<&SharedError<E>> for CaptureException
where
    E: JsCaused<Error = platform::Error> + Clone + fmt::Display,
{
    #[inline]
    fn from(err: &SharedError<E>) -> Self {
        Self::from(clone_traced(err.traced()))
    }
}
