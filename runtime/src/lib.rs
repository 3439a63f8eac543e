//! # Tourcart Runtime
//!
//! The Store runtime that owns a reducer's state and coordinates dispatch.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state, runs the reducer, executes effects
//! - **Subscriptions**: every committed state is published on a `watch`
//!   channel, every applied action on a `broadcast` channel
//!
//! ## Example
//!
//! ```ignore
//! use tourcart_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tourcart_core::{effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tourcart_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the action broadcast channel
    ///
    /// Slow observers that fall further behind than this skip actions.
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, Duration, Effect, Ordering, Reducer,
        RwLock, StoreConfig, StoreError,
    };
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Subscriptions to committed state and applied actions
    ///
    /// Cloning a Store produces another handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        shutdown_timeout: Duration,
        /// Latest committed state, published after every reducer run.
        state_watch: Arc<watch::Sender<S>>,
        /// Every action the reducer has applied, in application order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + Clone + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// A zero broadcast capacity is raised to one, since the channel
        /// cannot be created empty.
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));
            let (state_watch, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                shutdown_timeout: config.shutdown_timeout,
                state_watch: Arc::new(state_watch),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Publishes the new state to subscribers and broadcasts the action
        /// 4. Executes returned effects (which may feed actions back)
        ///
        /// Concurrent `send()` calls serialize at the reducer level, so every
        /// action sees the state left by the one before it.
        ///
        /// # Returns
        ///
        /// A copy of the state as committed by this action.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<S, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let (committed, effects) = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self
                    .reducer
                    .reduce(&mut *state, action.clone(), &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                // Published while the lock is held so subscribers observe
                // states in the same order the reducer produced them.
                let committed = state.clone();
                self.state_watch.send_replace(committed.clone());
                let _ = self.action_broadcast.send(action);

                (committed, effects)
            };

            for effect in effects {
                self.execute_effect(effect);
            }
            tracing::debug!("Action processing completed");

            Ok(committed)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Clone of the current state
        pub async fn snapshot(&self) -> S {
            self.state(Clone::clone).await
        }

        /// Subscribe to committed states
        ///
        /// The receiver starts at the current state and is marked changed after
        /// every `send()`. Intermediate states may be skipped by slow readers;
        /// the latest one is always visible.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.state_watch.subscribe()
        }

        /// Subscribe to every action applied by the reducer
        ///
        /// Includes actions sent directly and actions fed back by effects.
        /// Receivers lagging by more than the broadcast capacity get
        /// `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Number of effects still running
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Whether shutdown has been initiated
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Shut down using the configured default timeout
        ///
        /// # Errors
        ///
        /// See [`Store::shutdown`].
        pub async fn shutdown_default(&self) -> Result<(), StoreError> {
            self.shutdown(self.shutdown_timeout).await
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Sets the shutdown flag (rejecting new actions), then waits for
        /// pending effects to complete.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running", pending
                    );
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::trace!(
                    pending_effects = pending,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Waiting for effects to complete"
                );

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Execute an effect
        ///
        /// - `None`: No-op
        /// - `Parallel`: Executes each effect, all concurrently
        /// - `Future`: Spawned; a produced action is sent back to the store
        ///
        /// Effect failures never halt the store. A panicking future is
        /// contained by its task, and the pending counter is still released.
        fn execute_effect(&self, effect: Effect<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel")
                        .increment(1);
                    for effect in effects {
                        self.execute_effect(effect);
                    }
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));
                    let store = self.clone();

                    tokio::spawn(async move {
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            if let Err(error) = store.send(action).await {
                                tracing::warn!(%error, "Dropped action produced by effect");
                            }
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                shutdown_timeout: self.shutdown_timeout,
                state_watch: Arc::clone(&self.state_watch),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tourcart_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        ProduceEffect,
        ProduceParallelEffects,
        ProduceSlowEffect(u64),
        ProducePanickingEffect,
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                },
                TestAction::ProduceEffect => {
                    smallvec![Effect::future(async { Some(TestAction::Increment) })]
                },
                TestAction::ProduceParallelEffects => smallvec![Effect::merge(vec![
                    Effect::future(async { Some(TestAction::Increment) }),
                    Effect::future(async { Some(TestAction::Increment) }),
                    Effect::future(async { Some(TestAction::Increment) }),
                ])],
                TestAction::ProduceSlowEffect(millis) => {
                    smallvec![Effect::future(async move {
                        tokio::time::sleep(Duration::from_millis(millis)).await;
                        None
                    })]
                },
                TestAction::ProducePanickingEffect => {
                    #[allow(clippy::panic)] // Intentional panic for testing error handling
                    {
                        smallvec![Effect::future(async {
                            panic!("Intentional panic in effect for testing");
                        })]
                    }
                },
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::default(), TestReducer, TestEnv)
    }

    async fn wait_for_value(
        store: &Store<TestState, TestAction, TestEnv, TestReducer>,
        expected: i32,
    ) {
        let mut rx = store.subscribe();
        tokio::time::timeout(Duration::from_secs(1), rx.wait_for(|s| s.value == expected))
            .await
            .expect("timed out waiting for state")
            .expect("state channel closed");
    }

    #[tokio::test]
    async fn test_send_returns_committed_state() {
        let store = store();

        let committed = store.send(TestAction::Increment).await.unwrap();
        assert_eq!(committed.value, 1);

        let committed = store.send(TestAction::Decrement).await.unwrap();
        assert_eq!(committed.value, 0);
        assert_eq!(store.state(|s| s.value).await, 0);
    }

    #[tokio::test]
    async fn test_subscribers_see_every_commit() {
        let store = store();
        let mut rx = store.subscribe();
        assert_eq!(rx.borrow().value, 0);

        store.send(TestAction::Increment).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 1);

        store.send(TestAction::Increment).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().value, 2);
    }

    #[tokio::test]
    async fn test_action_broadcast_in_order() {
        let store = store();
        let mut rx = store.subscribe_actions();

        store.send(TestAction::Increment).await.unwrap();
        store.send(TestAction::Decrement).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), TestAction::Increment);
        assert_eq!(rx.recv().await.unwrap(), TestAction::Decrement);
    }

    #[tokio::test]
    async fn test_future_effect_feeds_back() {
        let store = store();
        store.send(TestAction::ProduceEffect).await.unwrap();
        wait_for_value(&store, 1).await;
    }

    #[tokio::test]
    async fn test_parallel_effects_all_feed_back() {
        let store = store();
        store.send(TestAction::ProduceParallelEffects).await.unwrap();
        wait_for_value(&store, 3).await;
    }

    #[tokio::test]
    async fn test_panicking_effect_does_not_halt_store() {
        let store = store();
        store.send(TestAction::ProducePanickingEffect).await.unwrap();
        store.send(TestAction::Increment).await.unwrap();
        assert_eq!(store.state(|s| s.value).await, 1);
        store.shutdown(Duration::from_secs(1)).await.unwrap();
        assert_eq!(store.pending_effects(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_sends_serialize() {
        let store = store();
        let handles: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.send(TestAction::Increment).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.snapshot().await.value, 20);
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() {
        let store = store();
        store.shutdown(Duration::from_millis(100)).await.unwrap();

        assert!(store.is_shutting_down());
        assert_eq!(
            store.send(TestAction::Increment).await,
            Err(StoreError::ShutdownInProgress)
        );
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_effects() {
        let store = store();
        store.send(TestAction::ProduceSlowEffect(30)).await.unwrap();
        assert_eq!(store.pending_effects(), 1);

        store.shutdown(Duration::from_secs(2)).await.unwrap();
        assert_eq!(store.pending_effects(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_timeout() {
        let store = store();
        store.send(TestAction::ProduceSlowEffect(5_000)).await.unwrap();

        let result = store.shutdown(Duration::from_millis(30)).await;
        assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let store = Store::with_config(
            TestState::default(),
            TestReducer,
            TestEnv,
            StoreConfig::default().with_broadcast_capacity(0),
        );
        let _rx = store.subscribe_actions();
    }
}
