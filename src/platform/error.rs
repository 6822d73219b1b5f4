//! Errors thrown by the JS side.

use std::borrow::Cow;

use derive_more::Display;
use wasm_bindgen::{JsCast as _, JsValue};

/// Wrapper for a JS value thrown by some browser API.
///
/// Keeps the original [`js_sys::Error`] (if the thrown value was one), so it
/// can be handed back to the JS side untouched.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{}: {}", name, message)]
pub struct Error {
    /// Name of this [`Error`] (`NotAllowedError`, `NotFoundError`, etc).
    name: Cow<'static, str>,

    /// Message describing this [`Error`].
    message: Cow<'static, str>,

    /// Original JS error, if the thrown value was an [`js_sys::Error`].
    sys_cause: Option<js_sys::Error>,
}

impl Error {
    /// Creates a new [`Error`] which has no JS side cause.
    #[must_use]
    pub fn new<N, M>(name: N, message: M) -> Self
    where
        N: Into<Cow<'static, str>>,
        M: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            message: message.into(),
            sys_cause: None,
        }
    }

    /// Returns name of this [`Error`].
    #[inline]
    #[must_use]
    pub fn name(&self) -> String {
        self.name.to_string()
    }

    /// Returns message of this [`Error`].
    #[inline]
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns the JS side error this [`Error`] was built from, if any.
    #[inline]
    #[must_use]
    pub fn sys_cause(&self) -> Option<js_sys::Error> {
        self.sys_cause.clone()
    }
}

impl From<JsValue> for Error {
    fn from(val: JsValue) -> Self {
        match val.dyn_into::<js_sys::Error>() {
            Ok(err) => Self {
                name: Cow::Owned(err.name().into()),
                message: Cow::Owned(err.message().into()),
                sys_cause: Some(err),
            },
            Err(val) => match val.as_string() {
                Some(reason) => Self::new("Unknown JS error", reason),
                None => Self::new(
                    "Unknown JS error",
                    format!("no str representation for {:?}", val),
                ),
            },
        }
    }
}

impl From<Error> for js_sys::Error {
    fn from(err: Error) -> Self {
        match err.sys_cause {
            Some(cause) => cause,
            None => {
                let sys_err = Self::new(&err.message);
                sys_err.set_name(&err.name);
                sys_err
            }
        }
    }
}

impl From<Error> for JsValue {
    #[inline]
    fn from(err: Error) -> Self {
        js_sys::Error::from(err).into()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn displays_name_and_message() {
        let err = Error::new("NotAllowedError", "Permission denied");

        assert_eq!(err.to_string(), "NotAllowedError: Permission denied");
        assert_eq!(err.name(), "NotAllowedError");
        assert!(err.sys_cause().is_none());
    }

    #[test]
    fn equality_ignores_cause() {
        assert_eq!(Error::new("A", "b"), Error::new("A", "b"));
        assert_ne!(Error::new("A", "b"), Error::new("A", "c"));
    }
}
