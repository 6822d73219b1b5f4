//! Bridge between event-driven browser objects and a rendering framework.
//!
//! A [`Store`] keeps an immutable snapshot of some state. Snapshots are
//! replaced as a whole and subscribers are notified only about real
//! changes, which is exactly what an external store of a UI framework
//! (`subscribe(callback)` + `getSnapshot()`) needs.

pub mod request;

use std::{cell::Cell, fmt, ops::Deref, rc::Rc};

use futures::{
    future::{self, LocalBoxFuture},
    stream::{LocalBoxStream, StreamExt as _},
};
use medea_reactive::{DroppedError, ObservableCell};
use tracerr::Traced;

use crate::{platform, utils::TaskHandle};

#[doc(inline)]
pub use self::request::{Request, RequestState, Resolution, Ticket};

/// Observable holder of immutable state snapshots.
#[derive(Debug)]
pub struct Store<S> {
    /// Current snapshot.
    state: ObservableCell<S>,

    /// Number of changes this [`Store`] went through.
    version: Cell<u64>,
}

impl<S> Store<S>
where
    S: Clone + PartialEq + 'static,
{
    /// Creates a new [`Store`] holding the provided `initial` snapshot.
    #[inline]
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            state: ObservableCell::new(initial),
            version: Cell::new(0),
        }
    }

    /// Returns the current snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.state.get()
    }

    /// Returns the number of changes this [`Store`] went through.
    ///
    /// Two reads returning the same version are guaranteed to observe equal
    /// snapshots.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// Replaces the current snapshot with the provided one.
    ///
    /// Returns `false` and notifies nobody if the provided snapshot is equal
    /// to the current one.
    pub fn set(&self, snapshot: S) -> bool {
        if *self.state.borrow() == snapshot {
            return false;
        }
        self.version.set(self.version.get() + 1);
        self.state.set(snapshot);
        true
    }

    /// Replaces the current snapshot with the one computed from it by the
    /// provided function.
    ///
    /// Returns `false` if the computed snapshot is equal to the current one.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&S) -> S,
    {
        let snapshot = f(&self.state.borrow());
        self.set(snapshot)
    }

    /// Returns a [`Stream`] of snapshots starting with the current one.
    ///
    /// [`Stream`]: futures::Stream
    #[inline]
    pub fn subscribe(&self) -> LocalBoxStream<'static, S> {
        self.state.subscribe()
    }

    /// Returns a [`Stream`] of the snapshots set after this call.
    ///
    /// The [`Stream`] ends once this [`Store`] is dropped.
    ///
    /// [`Stream`]: futures::Stream
    #[inline]
    pub fn changes(&self) -> LocalBoxStream<'static, S> {
        Box::pin(self.state.subscribe().skip(1))
    }

    /// Returns a [`Future`] resolving once the snapshot satisfies the
    /// provided `predicate` (at once, if the current one does).
    ///
    /// [`Future`]: std::future::Future
    #[inline]
    pub fn when<F>(
        &self,
        predicate: F,
    ) -> LocalBoxFuture<'static, Result<(), DroppedError>>
    where
        F: Fn(&S) -> bool + 'static,
    {
        self.state.when(predicate)
    }

    /// Calls the provided `callback` with every snapshot set after this call,
    /// until the returned [`Subscription`] is dropped.
    pub fn on_change<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(S) + 'static,
    {
        let mut changes = self.changes();
        let (fut, handle) = future::abortable(async move {
            while let Some(snapshot) = changes.next().await {
                callback(snapshot);
            }
        });
        platform::spawn(async move {
            let _ = fut.await;
        });
        Subscription(TaskHandle::from(handle))
    }
}

/// Guard of a [`Store::on_change`] subscription.
///
/// Dropping it stops notifications delivery.
#[derive(Debug)]
pub struct Subscription(TaskHandle);

impl Subscription {
    /// Stops notifications delivery.
    #[inline]
    pub fn unsubscribe(self) {
        drop(self);
    }
}

/// Shared [`Traced`] error, suitable for storing inside snapshots.
///
/// Two [`SharedError`]s are equal only if they are clones of the same error,
/// so a repeated failure is still observed as a change.
pub struct SharedError<E>(Rc<Traced<E>>);

impl<E> SharedError<E> {
    /// Returns the underlying error.
    #[inline]
    #[must_use]
    pub fn error(&self) -> &E {
        self.0.as_ref().as_ref()
    }

    /// Returns the [`Traced`] underlying error.
    #[inline]
    #[must_use]
    pub fn traced(&self) -> &Traced<E> {
        &self.0
    }
}

impl<E> From<Traced<E>> for SharedError<E> {
    #[inline]
    fn from(err: Traced<E>) -> Self {
        Self(Rc::new(err))
    }
}

impl<E> Clone for SharedError<E> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> PartialEq for SharedError<E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Deref for SharedError<E> {
    type Target = E;

    #[inline]
    fn deref(&self) -> &E {
        self.error()
    }
}

impl<E: fmt::Debug> fmt::Debug for SharedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedError").field(self.error()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for SharedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.error(), f)
    }
}
