use crate::dispatcher::{DispatchHandle, Dispatcher, Envelope, WeakDispatcher};
use crate::middleware::{Middleware, MiddlewareContext};
use crate::scope::BackgroundScope;
use crate::subscription::{Registry, StateStream, Subscription};
use crate::{Action, Lifecycle, Reducer, State, StoreError};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Everything the dispatch loop and middleware contexts share
pub(crate) struct Shared<S, A> {
    state: RwLock<Arc<S>>,
    subscribers: Arc<Mutex<Registry<S>>>,
    reducer: Box<dyn Reducer<S, A>>,
    pub(crate) middleware: Vec<Arc<dyn Middleware<S, A>>>,
    pub(crate) scope: BackgroundScope,
}

impl<S: State, A: Action> Shared<S, A> {
    pub(crate) fn current_state(&self) -> Arc<S> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Run the reducer, swap the state and notify observers
    ///
    /// Only the dispatch loop calls this, so reductions never overlap. The
    /// swap happens under the subscriber lock so that a new subscriber either
    /// sees the old state plus this update, or the new state as its replay.
    pub(crate) fn reduce(&self, action: &A) -> Result<(), StoreError> {
        let current = self.current_state();
        let reduced = Arc::new(self.reducer.reduce(S::clone(&current), action)?);

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&reduced);
        subscribers.notify(&reduced);
        Ok(())
    }
}

/// Store - holds the state and runs the unidirectional dispatch loop
///
/// The store follows the Redux pattern:
/// - Centralized state, replaced wholesale on every reduction
/// - Actions are dispatched to modify state
/// - Middleware handles side effects, the reducer stays pure
/// - Observers receive every reduced state in dispatch order
///
/// Actions are processed one at a time on a dedicated task, no matter which
/// thread dispatched them. A failing or panicking action fails only its own
/// [`DispatchHandle`]; the committed state stays untouched and the loop keeps
/// serving later actions.
///
/// Cloning a store is cheap and yields another handle to the same state.
/// The loop stops once every `Store` and [`Dispatcher`] is dropped.
pub struct Store<S, A> {
    shared: Arc<Shared<S, A>>,
    dispatcher: Dispatcher<A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<S: State, A: Action> Store<S, A> {
    /// Create a store and start its dispatch loop on the current tokio runtime
    ///
    /// Middleware is called in the order given here, for every action.
    /// Fails with [`StoreError::InvalidState`] if `initial_state` violates its
    /// invariants.
    pub fn new<R>(
        initial_state: S,
        reducer: R,
        middleware: Vec<Arc<dyn Middleware<S, A>>>,
    ) -> Result<Self, StoreError>
    where
        R: Reducer<S, A>,
    {
        initial_state.validate()?;
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let middleware_count = middleware.len();
        let shared = Arc::new(Shared {
            state: RwLock::new(Arc::new(initial_state)),
            subscribers: Arc::new(Mutex::new(Registry::default())),
            reducer: Box::new(reducer),
            middleware,
            scope: BackgroundScope::new(runtime.clone()),
        });

        let weak = WeakDispatcher::new(tx.downgrade());
        runtime.spawn(run_dispatch_loop(Arc::clone(&shared), rx, weak));
        log::info!("Store started with {} middleware", middleware_count);

        Ok(Self {
            shared,
            dispatcher: Dispatcher::new(tx),
        })
    }

    /// Queue an action; the handle resolves once it was fully processed
    pub fn dispatch(&self, action: A) -> DispatchHandle {
        self.dispatcher.dispatch(action)
    }

    /// The current state snapshot
    pub fn state(&self) -> Arc<S> {
        self.shared.current_state()
    }

    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// The scope that middleware side effects run in
    pub fn scope(&self) -> &BackgroundScope {
        &self.shared.scope
    }

    /// Subscribe to state updates
    ///
    /// The stream yields the current state first, then every reduced state.
    /// With a lifecycle the stream ends as soon as the lifecycle ends.
    pub fn subscribe(&self, lifecycle: Option<&Lifecycle>) -> StateStream<S> {
        let token = lifecycle
            .map(Lifecycle::child_token)
            .unwrap_or_default();
        let (tx, rx) = mpsc::unbounded_channel();

        let id = {
            let mut registry = self
                .shared
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            // replay under the lock, no reduction can slip in before registration
            let _ = tx.send(self.shared.current_state());
            registry.insert(tx, token.clone())
        };

        let subscription = Subscription::new(id, Arc::downgrade(&self.shared.subscribers), token);
        StateStream::new(rx, subscription)
    }

    /// Invoke `callback` with the current state and every reduced state
    ///
    /// The callback runs on the runtime, never after the lifecycle ended or
    /// the returned subscription was unsubscribed.
    pub fn observe<F>(&self, lifecycle: Option<&Lifecycle>, callback: F) -> Subscription<S>
    where
        F: Fn(&S) + Send + 'static,
    {
        let mut stream = self.subscribe(lifecycle);
        let subscription = stream.subscription().clone();

        self.shared.scope.runtime().spawn(async move {
            while let Some(state) = stream.next().await {
                callback(&state);
            }
        });

        subscription
    }
}

async fn run_dispatch_loop<S: State, A: Action>(
    shared: Arc<Shared<S, A>>,
    mut rx: mpsc::UnboundedReceiver<Envelope<A>>,
    dispatcher: WeakDispatcher<A>,
) {
    log::debug!("Store: dispatch loop running");

    while let Some(Envelope { action, reply }) = rx.recv().await {
        let context = MiddlewareContext::new(Arc::clone(&shared), dispatcher.clone());

        // Each action runs in its own task so that a panic fails only this
        // action's handle.
        let result = match tokio::spawn(async move { context.dispatch(action).await }).await {
            Ok(result) => result,
            Err(join_error) => Err(StoreError::from_join_error(join_error)),
        };

        if let Err(e) = &result {
            log::error!("Store: action failed: {}", e);
        }
        let _ = reply.send(result);
    }

    shared.scope.cancel();
    log::debug!("Store: dispatch loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{BoxFuture, CaptureActionsMiddleware, Next};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct CounterState {
        value: i64,
        history: Vec<i64>,
    }

    impl State for CounterState {
        fn validate(&self) -> Result<(), StoreError> {
            if self.value < 0 {
                return Err(StoreError::InvalidState(format!(
                    "counter must not be negative: {}",
                    self.value
                )));
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Increment,
        Add(i64),
        Reject,
        Explode,
    }

    impl Action for CounterAction {}

    fn reduce(mut state: CounterState, action: &CounterAction) -> Result<CounterState, StoreError> {
        match action {
            CounterAction::Increment => state.value += 1,
            CounterAction::Add(amount) => state.value += amount,
            CounterAction::Reject => return Err(StoreError::Rejected("no".to_string())),
            CounterAction::Explode => panic!("reducer exploded"),
        }
        state.history.push(state.value);
        Ok(state)
    }

    type Mw = Arc<dyn Middleware<CounterState, CounterAction>>;

    fn store(middleware: Vec<Mw>) -> Store<CounterState, CounterAction> {
        let _ = env_logger::builder().is_test(true).try_init();
        Store::new(CounterState::default(), reduce, middleware).unwrap()
    }

    /// Records its own name before passing the action on
    struct NamedMiddleware {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware<CounterState, CounterAction> for NamedMiddleware {
        fn invoke<'a>(
            &'a self,
            _ctx: &'a MiddlewareContext<CounterState, CounterAction>,
            next: Next<'a, CounterState, CounterAction>,
            action: CounterAction,
        ) -> BoxFuture<'a, Result<(), StoreError>> {
            Box::pin(async move {
                self.log
                    .lock()
                    .unwrap()
                    .push(format!("{}:{:?}", self.name, action));
                next.run(action).await
            })
        }
    }

    /// Rewrites Increment into Add(10) and swallows Add(0)
    struct RewritingMiddleware;

    impl Middleware<CounterState, CounterAction> for RewritingMiddleware {
        fn invoke<'a>(
            &'a self,
            _ctx: &'a MiddlewareContext<CounterState, CounterAction>,
            next: Next<'a, CounterState, CounterAction>,
            action: CounterAction,
        ) -> BoxFuture<'a, Result<(), StoreError>> {
            Box::pin(async move {
                match action {
                    CounterAction::Increment => next.run(CounterAction::Add(10)).await,
                    CounterAction::Add(0) => Ok(()),
                    other => next.run(other).await,
                }
            })
        }
    }

    /// After every Add(100) dispatches an Increment, and records the value
    /// it saw before and after the chain continued
    struct FollowUpMiddleware {
        seen: Arc<Mutex<Vec<(i64, i64)>>>,
    }

    impl Middleware<CounterState, CounterAction> for FollowUpMiddleware {
        fn invoke<'a>(
            &'a self,
            ctx: &'a MiddlewareContext<CounterState, CounterAction>,
            next: Next<'a, CounterState, CounterAction>,
            action: CounterAction,
        ) -> BoxFuture<'a, Result<(), StoreError>> {
            Box::pin(async move {
                let follow_up = action == CounterAction::Add(100);
                let before = ctx.state().value;
                next.run(action).await?;
                self.seen.lock().unwrap().push((before, ctx.state().value));
                if follow_up {
                    ctx.dispatch(CounterAction::Increment).await?;
                }
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn test_dispatch_reduces_in_order() {
        let store = store(vec![]);

        let first = store.dispatch(CounterAction::Increment);
        let second = store.dispatch(CounterAction::Add(5));
        let third = store.dispatch(CounterAction::Increment);
        first.await.unwrap();
        second.await.unwrap();
        third.await.unwrap();

        assert_eq!(store.state().value, 7);
        assert_eq!(store.state().history, vec![1, 6, 7]);
    }

    #[tokio::test]
    async fn test_invalid_initial_state_is_rejected() {
        let state = CounterState {
            value: -1,
            history: vec![],
        };

        let result = Store::<CounterState, CounterAction>::new(state, reduce, vec![]);

        assert!(matches!(result, Err(StoreError::InvalidState(_))));
    }

    #[test]
    fn test_store_requires_runtime() {
        let result =
            Store::<CounterState, CounterAction>::new(CounterState::default(), reduce, vec![]);

        assert!(matches!(result, Err(StoreError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_middleware_runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = store(vec![
            Arc::new(NamedMiddleware {
                name: "first",
                log: Arc::clone(&log),
            }),
            Arc::new(NamedMiddleware {
                name: "second",
                log: Arc::clone(&log),
            }),
        ]);

        store.dispatch(CounterAction::Increment).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:Increment".to_string(), "second:Increment".to_string()]
        );
    }

    #[tokio::test]
    async fn test_middleware_can_rewrite_and_drop_actions() {
        let capture = Arc::new(CaptureActionsMiddleware::<CounterAction>::new());
        let store = store(vec![Arc::new(RewritingMiddleware), capture.clone()]);
        let mut states = store.subscribe(None);
        assert_eq!(states.next().await.unwrap().value, 0);

        store.dispatch(CounterAction::Increment).await.unwrap();
        store.dispatch(CounterAction::Add(0)).await.unwrap();

        assert_eq!(store.state().value, 10);
        assert_eq!(capture.actions(), vec![CounterAction::Add(10)]);
        assert_eq!(states.next().await.unwrap().value, 10);
        // the dropped action produced no notification
        assert!(states.try_next().is_none());
    }

    #[tokio::test]
    async fn test_nested_dispatch_reenters_chain_from_front() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = store(vec![
            Arc::new(NamedMiddleware {
                name: "outer",
                log: Arc::clone(&log),
            }),
            Arc::new(FollowUpMiddleware {
                seen: Arc::clone(&seen),
            }),
        ]);

        store.dispatch(CounterAction::Add(100)).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["outer:Add(100)".to_string(), "outer:Increment".to_string()]
        );
        // the follow-up was fully processed before the dispatch completed
        assert_eq!(store.state().value, 101);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 100), (100, 101)]);
    }

    #[tokio::test]
    async fn test_rejected_action_keeps_state_and_store_usable() {
        let store = store(vec![]);
        store.dispatch(CounterAction::Add(3)).await.unwrap();

        let result = store.dispatch(CounterAction::Reject).await;

        assert!(matches!(result, Err(StoreError::Rejected(_))));
        assert_eq!(store.state().value, 3);

        store.dispatch(CounterAction::Increment).await.unwrap();
        assert_eq!(store.state().value, 4);
    }

    #[tokio::test]
    async fn test_panicking_reducer_fails_only_its_dispatch() {
        let store = store(vec![]);
        store.dispatch(CounterAction::Add(3)).await.unwrap();

        let result = store.dispatch(CounterAction::Explode).await;

        match result {
            Err(StoreError::Panicked(message)) => assert!(message.contains("reducer exploded")),
            other => panic!("expected a panic error, got {:?}", other),
        }
        assert_eq!(store.state().value, 3);

        store.dispatch(CounterAction::Increment).await.unwrap();
        assert_eq!(store.state().value, 4);
    }

    #[tokio::test]
    async fn test_subscription_replays_current_state_then_every_update() {
        let store = store(vec![]);
        store.dispatch(CounterAction::Add(2)).await.unwrap();

        let mut states = store.subscribe(None);
        store.dispatch(CounterAction::Increment).await.unwrap();
        store.dispatch(CounterAction::Increment).await.unwrap();

        let values: Vec<i64> = vec![
            states.next().await.unwrap().value,
            states.next().await.unwrap().value,
            states.next().await.unwrap().value,
        ];
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_ended_lifecycle_stops_notifications() {
        let store = store(vec![]);
        let lifecycle = Lifecycle::new();
        let mut states = store.subscribe(Some(&lifecycle));
        assert_eq!(states.next().await.unwrap().value, 0);

        store.dispatch(CounterAction::Increment).await.unwrap();
        lifecycle.end();
        store.dispatch(CounterAction::Increment).await.unwrap();

        // the update queued before the lifecycle ended is not delivered either
        assert!(states.next().await.is_none());
        assert!(!states.subscription().is_active());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_notifications() {
        let store = store(vec![]);
        let mut states = store.subscribe(None);
        let subscription = states.subscription().clone();

        subscription.unsubscribe();
        store.dispatch(CounterAction::Increment).await.unwrap();

        assert!(states.next().await.is_none());
    }

    #[tokio::test]
    async fn test_observe_invokes_callback_for_each_state() {
        let store = store(vec![]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let subscription = store.observe(None, move |state: &CounterState| {
            let _ = tx.send(state.value);
        });
        store.dispatch(CounterAction::Increment).await.unwrap();
        store.dispatch(CounterAction::Increment).await.unwrap();

        let mut received = Vec::new();
        for _ in 0..3 {
            let value = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap()
                .unwrap();
            received.push(value);
        }
        assert_eq!(received, vec![0, 1, 2]);

        subscription.unsubscribe();
        store.dispatch(CounterAction::Increment).await.unwrap();
        let after = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(!matches!(after, Ok(Some(_))));
    }

    #[tokio::test]
    async fn test_dispatch_from_other_threads_is_serialized() {
        let store = store(vec![]);

        let mut threads = Vec::new();
        for _ in 0..4 {
            let dispatcher = store.dispatcher();
            threads.push(std::thread::spawn(move || {
                (0..25)
                    .map(|_| dispatcher.dispatch(CounterAction::Increment))
                    .collect::<Vec<_>>()
            }));
        }
        let handles: Vec<DispatchHandle> = threads
            .into_iter()
            .flat_map(|thread| thread.join().unwrap())
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.state().value, 100);
        assert_eq!(store.state().history.len(), 100);
    }

    #[tokio::test]
    async fn test_dropping_store_cancels_background_scope() {
        let store = store(vec![]);
        let scope = store.scope().clone();

        drop(store);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !scope.is_cancelled() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
