//! Dispatcher handles for queueing actions onto a store
//!
//! Every action sent through a [`Dispatcher`] lands in the store's FIFO queue
//! and is processed by the dispatch loop one at a time: full middleware chain,
//! then reducer, then observers. The returned [`DispatchHandle`] resolves once
//! that specific action has been fully processed.

use crate::{Action, StoreError};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};

pub(crate) type Reply = oneshot::Sender<Result<(), StoreError>>;

/// An action queued for the dispatch loop together with its completion channel
pub(crate) struct Envelope<A> {
    pub(crate) action: A,
    pub(crate) reply: Reply,
}

/// Dispatcher allows any thread or task to queue actions on a store
///
/// Holding a dispatcher keeps the store's dispatch loop alive.
pub struct Dispatcher<A> {
    tx: mpsc::UnboundedSender<Envelope<A>>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Action> Dispatcher<A> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Envelope<A>>) -> Self {
        Self { tx }
    }

    /// Queue an action
    ///
    /// The action is processed after every action queued before it.
    /// Dropping the returned handle does not cancel processing.
    pub fn dispatch(&self, action: A) -> DispatchHandle {
        let (reply, rx) = oneshot::channel();
        match self.tx.send(Envelope { action, reply }) {
            Ok(()) => DispatchHandle::pending(rx),
            Err(e) => {
                log::error!("Failed to dispatch action: {:?}", e.0.action);
                DispatchHandle::failed(StoreError::Closed)
            }
        }
    }

    /// Create a dispatcher that does not keep the store alive
    pub fn downgrade(&self) -> WeakDispatcher<A> {
        WeakDispatcher {
            tx: self.tx.downgrade(),
        }
    }
}

/// A dispatcher that does not keep the store alive
///
/// Handed to middleware and to engine observers: long-lived collaborators
/// must not prevent the store from shutting down once its owners are gone.
pub struct WeakDispatcher<A> {
    tx: mpsc::WeakUnboundedSender<Envelope<A>>,
}

impl<A> Clone for WeakDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Action> WeakDispatcher<A> {
    pub(crate) fn new(tx: mpsc::WeakUnboundedSender<Envelope<A>>) -> Self {
        Self { tx }
    }

    /// Upgrade to a dispatcher, if the store is still alive
    pub fn upgrade(&self) -> Option<Dispatcher<A>> {
        self.tx.upgrade().map(Dispatcher::new)
    }

    /// Queue an action if the store is still alive
    pub fn dispatch(&self, action: A) -> DispatchHandle {
        match self.upgrade() {
            Some(dispatcher) => dispatcher.dispatch(action),
            None => {
                log::debug!("Store is gone, dropping action: {:?}", action);
                DispatchHandle::failed(StoreError::Closed)
            }
        }
    }
}

/// Completes once the dispatched action went through middleware, reducer and
/// observer notification
#[must_use = "a dispatch handle does nothing unless awaited; drop it explicitly to fire and forget"]
pub struct DispatchHandle {
    inner: HandleState,
}

enum HandleState {
    Pending(oneshot::Receiver<Result<(), StoreError>>),
    Failed(Option<StoreError>),
}

impl DispatchHandle {
    fn pending(rx: oneshot::Receiver<Result<(), StoreError>>) -> Self {
        Self {
            inner: HandleState::Pending(rx),
        }
    }

    fn failed(error: StoreError) -> Self {
        Self {
            inner: HandleState::Failed(Some(error)),
        }
    }
}

impl Future for DispatchHandle {
    type Output = Result<(), StoreError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            HandleState::Pending(rx) => Pin::new(rx)
                .poll(cx)
                .map(|received| received.unwrap_or(Err(StoreError::Closed))),
            HandleState::Failed(error) => {
                Poll::Ready(Err(error.take().unwrap_or(StoreError::Closed)))
            }
        }
    }
}
