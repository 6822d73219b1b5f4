//! Lifecycle of an asynchronous request observed through a [`Store`].

use std::{cell::Cell, fmt};

use tracerr::Traced;

use super::{SharedError, Store, Subscription};

/// State of an asynchronous request.
pub enum RequestState<T, E> {
    /// Request has not been issued yet, or has been reset.
    Idle,

    /// Request is in flight.
    Loading,

    /// Request has completed successfully.
    Ready(T),

    /// Request has failed.
    Failed(SharedError<E>),
}

impl<T, E> RequestState<T, E> {
    /// Indicates whether this is [`RequestState::Idle`].
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Indicates whether this is [`RequestState::Loading`].
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the successful result, if any.
    #[inline]
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        if let Self::Ready(val) = self {
            Some(val)
        } else {
            None
        }
    }

    /// Returns the failure, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&SharedError<E>> {
        if let Self::Failed(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl<T: Clone, E> Clone for RequestState<T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Ready(val) => Self::Ready(val.clone()),
            Self::Failed(err) => Self::Failed(err.clone()),
        }
    }
}

impl<T: PartialEq, E> PartialEq for RequestState<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Idle, Self::Idle) | (Self::Loading, Self::Loading) => true,
            (Self::Ready(a), Self::Ready(b)) => a == b,
            (Self::Failed(a), Self::Failed(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for RequestState<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Loading => f.write_str("Loading"),
            Self::Ready(val) => f.debug_tuple("Ready").field(val).finish(),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// Generation token of a [`Request::begin`] call.
///
/// Only the latest issued [`Ticket`] is able to resolve a [`Request`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ticket(u64);

/// Outcome of a [`Request::resolve`] call.
#[derive(Debug, Eq, PartialEq)]
pub enum Resolution<T> {
    /// Result has been applied to the [`Request`] state.
    Applied,

    /// [`Ticket`] has been superseded by a newer one, so the result has been
    /// discarded.
    ///
    /// The successful value (if any) is handed back for releasing.
    Superseded(Option<T>),
}

/// Asynchronous request whose state is observable via a [`Store`].
///
/// Every [`Request::begin`] call invalidates all the previously issued
/// [`Ticket`]s, so the last issued request always wins.
#[derive(Debug)]
pub struct Request<T, E> {
    /// [`Store`] of this [`Request`]'s [`RequestState`].
    store: Store<RequestState<T, E>>,

    /// Generation of the last issued [`Ticket`].
    generation: Cell<u64>,
}

impl<T, E> Request<T, E>
where
    T: Clone + PartialEq + 'static,
    E: 'static,
{
    /// Creates a new [`RequestState::Idle`] [`Request`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new(RequestState::Idle),
            generation: Cell::new(0),
        }
    }

    /// Issues a new [`Ticket`] invalidating all the previous ones and moves
    /// this [`Request`] to [`RequestState::Loading`].
    pub fn begin(&self) -> Ticket {
        let ticket = self.next_ticket();
        self.store.set(RequestState::Loading);
        ticket
    }

    /// Issues a new [`Ticket`] invalidating all the previous ones, keeping an
    /// already [`RequestState::Ready`] result visible until it's resolved.
    pub fn begin_keeping_ready(&self) -> Ticket {
        let ticket = self.next_ticket();
        if self.store.snapshot().ready().is_none() {
            self.store.set(RequestState::Loading);
        }
        ticket
    }

    /// Applies the provided `result` if the provided [`Ticket`] is still the
    /// current one.
    pub fn resolve(
        &self,
        ticket: Ticket,
        result: Result<T, Traced<E>>,
    ) -> Resolution<T> {
        if !self.is_current(ticket) {
            return Resolution::Superseded(result.ok());
        }
        self.store.set(match result {
            Ok(val) => RequestState::Ready(val),
            Err(e) => RequestState::Failed(SharedError::from(e)),
        });
        Resolution::Applied
    }

    /// Invalidates all the issued [`Ticket`]s and moves this [`Request`] to
    /// [`RequestState::Idle`].
    pub fn reset(&self) {
        let _ = self.next_ticket();
        self.store.set(RequestState::Idle);
    }

    /// Indicates whether the provided [`Ticket`] is the last issued one.
    #[inline]
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Returns the current [`RequestState`].
    #[inline]
    #[must_use]
    pub fn state(&self) -> RequestState<T, E> {
        self.store.snapshot()
    }

    /// Returns the [`Store`] of this [`Request`]'s [`RequestState`].
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store<RequestState<T, E>> {
        &self.store
    }

    /// Calls the provided `callback` on each [`RequestState`] change.
    #[inline]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(RequestState<T, E>) + 'static,
    {
        self.store.on_change(callback)
    }

    fn next_ticket(&self) -> Ticket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        Ticket(generation)
    }
}

impl<T, E> Default for Request<T, E>
where
    T: Clone + PartialEq + 'static,
    E: 'static,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::StreamExt as _;

    use super::{Request, RequestState, Resolution};

    type TestRequest = Request<u32, &'static str>;

    #[test]
    fn goes_through_lifecycle() {
        let req = TestRequest::new();
        assert!(req.state().is_idle());

        let ticket = req.begin();
        assert!(req.state().is_loading());

        assert_eq!(req.resolve(ticket, Ok(7)), Resolution::Applied);
        assert_eq!(req.state().ready(), Some(&7));
    }

    #[test]
    fn failure_is_stored() {
        let req = TestRequest::new();

        let ticket = req.begin();
        req.resolve(ticket, Err(tracerr::new!("boom")));

        let state = req.state();
        let err = state.error().unwrap();
        assert_eq!(**err, "boom");
        assert_eq!(state, req.state());
    }

    #[test]
    fn last_request_wins() {
        let req = TestRequest::new();

        let first = req.begin();
        let second = req.begin();
        assert!(!req.is_current(first));

        assert_eq!(req.resolve(second, Ok(2)), Resolution::Applied);
        assert_eq!(req.resolve(first, Ok(1)), Resolution::Superseded(Some(1)));
        assert_eq!(req.state().ready(), Some(&2));
    }

    #[test]
    fn superseded_failure_hands_back_nothing() {
        let req = TestRequest::new();

        let first = req.begin();
        let _second = req.begin();

        assert_eq!(
            req.resolve(first, Err(tracerr::new!("late"))),
            Resolution::Superseded(None),
        );
        assert!(req.state().is_loading());
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let req = TestRequest::new();

        let ticket = req.begin();
        req.reset();

        assert!(req.state().is_idle());
        assert_eq!(
            req.resolve(ticket, Ok(3)),
            Resolution::Superseded(Some(3)),
        );
        assert!(req.state().is_idle());
    }

    #[test]
    fn keeps_ready_result_while_reloading() {
        let req = TestRequest::new();

        let first = req.begin_keeping_ready();
        assert!(req.state().is_loading());
        req.resolve(first, Ok(1));

        let second = req.begin_keeping_ready();
        assert_eq!(req.state().ready(), Some(&1));
        req.resolve(second, Ok(2));
        assert_eq!(req.state().ready(), Some(&2));
    }

    #[tokio::test]
    async fn repeated_failures_are_distinct_changes() {
        let req = TestRequest::new();
        let mut changes = req.store().changes();

        let ticket = req.begin();
        req.resolve(ticket, Err(tracerr::new!("first")));
        let ticket = req.begin();
        req.resolve(ticket, Err(tracerr::new!("first")));

        assert!(changes.next().await.unwrap().is_loading());
        assert!(changes.next().await.unwrap().error().is_some());
        assert!(changes.next().await.unwrap().is_loading());
        assert!(changes.next().await.unwrap().error().is_some());
        assert_eq!(req.store().version(), 4);
    }
}
