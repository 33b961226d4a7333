//! State observation
//!
//! Each subscriber owns an unbounded channel so that no state is coalesced:
//! every reduced action produces exactly one notification per subscriber, in
//! dispatch order. A subscription starts with a replay of the state that was
//! current when it was created.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Registered subscribers of one store
pub(crate) struct Registry<S> {
    next_id: u64,
    entries: Vec<Entry<S>>,
}

struct Entry<S> {
    id: u64,
    sender: mpsc::UnboundedSender<Arc<S>>,
    token: CancellationToken,
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<S> Registry<S> {
    pub(crate) fn insert(
        &mut self,
        sender: mpsc::UnboundedSender<Arc<S>>,
        token: CancellationToken,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, sender, token });
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Send `state` to every live subscriber, dropping the ones that went away
    pub(crate) fn notify(&mut self, state: &Arc<S>) {
        self.entries.retain(|entry| {
            !entry.token.is_cancelled() && entry.sender.send(Arc::clone(state)).is_ok()
        });
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle to a registered observer
pub struct Subscription<S> {
    id: u64,
    registry: Weak<Mutex<Registry<S>>>,
    token: CancellationToken,
}

impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            registry: Weak::clone(&self.registry),
            token: self.token.clone(),
        }
    }
}

impl<S> Subscription<S> {
    pub(crate) fn new(id: u64, registry: Weak<Mutex<Registry<S>>>, token: CancellationToken) -> Self {
        Self {
            id,
            registry,
            token,
        }
    }

    /// Stop receiving state; takes effect immediately, even for updates already queued
    pub fn unsubscribe(&self) {
        self.token.cancel();
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(self.id);
        }
    }

    /// Whether this subscription will still receive state
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && self.registry.strong_count() > 0
    }
}

/// Ordered stream of states: the current state first, then one per reduced action
///
/// Ends when its lifecycle ends, when it is unsubscribed, or when the store is
/// dropped. Dropping the stream unsubscribes it.
pub struct StateStream<S> {
    receiver: mpsc::UnboundedReceiver<Arc<S>>,
    subscription: Subscription<S>,
}

impl<S> StateStream<S> {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<Arc<S>>, subscription: Subscription<S>) -> Self {
        Self {
            receiver,
            subscription,
        }
    }

    /// Wait for the next state
    pub async fn next(&mut self) -> Option<Arc<S>> {
        let token = self.subscription.token.clone();
        if token.is_cancelled() {
            return None;
        }

        let received = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            state = self.receiver.recv() => state,
        };

        // the lifecycle may have ended while the state was in flight
        if token.is_cancelled() {
            return None;
        }
        received
    }

    /// Take the next state if one is already queued
    pub fn try_next(&mut self) -> Option<Arc<S>> {
        if self.subscription.token.is_cancelled() {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    pub fn subscription(&self) -> &Subscription<S> {
        &self.subscription
    }
}

impl<S> Drop for StateStream<S> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<Mutex<Registry<u32>>> {
        Arc::new(Mutex::new(Registry::default()))
    }

    fn stream(registry: &Arc<Mutex<Registry<u32>>>, token: CancellationToken) -> StateStream<u32> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = registry.lock().unwrap().insert(sender, token.clone());
        StateStream::new(receiver, Subscription::new(id, Arc::downgrade(registry), token))
    }

    #[tokio::test]
    async fn test_notify_delivers_every_state_in_order() {
        let registry = registry();
        let mut stream = stream(&registry, CancellationToken::new());

        for value in 1..=3 {
            registry.lock().unwrap().notify(&Arc::new(value));
        }

        assert_eq!(*stream.next().await.unwrap(), 1);
        assert_eq!(*stream.next().await.unwrap(), 2);
        assert_eq!(*stream.next().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_token_drops_queued_states() {
        let registry = registry();
        let token = CancellationToken::new();
        let mut stream = stream(&registry, token.clone());

        registry.lock().unwrap().notify(&Arc::new(1));
        token.cancel();

        assert!(stream.next().await.is_none());
        assert!(stream.try_next().is_none());
    }

    #[test]
    fn test_notify_prunes_cancelled_subscribers() {
        let registry = registry();
        let token = CancellationToken::new();
        let _stream = stream(&registry, token.clone());
        assert_eq!(registry.lock().unwrap().len(), 1);

        token.cancel();
        registry.lock().unwrap().notify(&Arc::new(1));

        assert_eq!(registry.lock().unwrap().len(), 0);
    }

    #[test]
    fn test_dropping_stream_unsubscribes() {
        let registry = registry();
        let stream = stream(&registry, CancellationToken::new());
        let subscription = stream.subscription().clone();
        assert!(subscription.is_active());

        drop(stream);

        assert!(!subscription.is_active());
        assert_eq!(registry.lock().unwrap().len(), 0);
    }
}
