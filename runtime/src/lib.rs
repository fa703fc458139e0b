//! # Todolist Runtime
//!
//! Runtime implementation for the todolist architecture.
//!
//! This crate provides the Store runtime that coordinates reducer
//! execution, state subscriptions, and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: the runtime that owns state and processes actions
//! - **Subscriptions**: listeners invoked with the new snapshot after
//!   every transition (this is how persistence attaches)
//! - **Effect Executor**: executes effect descriptions and feeds
//!   produced actions back to the reducer
//!
//! ## Example
//!
//! ```ignore
//! use todolist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};

use todolist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{watch, RwLock};

/// Snapshot listener registered via [`Store::subscribe`]
type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Handle for waiting on effect completion
///
/// Returned by [`Store::send`]. The handle resolves once every effect
/// spawned by that send - including actions fed back into the store and
/// their own effects - has finished. Sends that produce no effects
/// resolve immediately.
#[derive(Debug)]
pub struct EffectHandle {
    pending: watch::Receiver<usize>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let (tx, rx) = watch::channel(0);
        (Self { pending: rx }, EffectTracking { tx: Arc::new(tx) })
    }

    /// Create a handle that is already complete
    #[must_use]
    pub fn completed() -> Self {
        let (_tx, rx) = watch::channel(0);
        Self { pending: rx }
    }

    /// Wait until all tracked effects have completed
    ///
    /// A channel-closed error means every tracking guard was dropped,
    /// which also counts as completion.
    pub async fn wait(&mut self) {
        let _ = self.pending.wait_for(|pending| *pending == 0).await;
    }
}

/// Shared pending-effect counter behind an [`EffectHandle`]
#[derive(Clone)]
struct EffectTracking {
    tx: Arc<watch::Sender<usize>>,
}

impl EffectTracking {
    /// Register one in-flight effect; the guard decrements on drop
    fn start(&self) -> TrackingGuard {
        self.tx.send_modify(|pending| *pending += 1);
        TrackingGuard {
            tx: Arc::clone(&self.tx),
        }
    }
}

struct TrackingGuard {
    tx: Arc<watch::Sender<usize>>,
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        self.tx.send_modify(|pending| *pending = pending.saturating_sub(1));
    }
}

/// The Store - runtime container for state, reducer, and environment
///
/// The Store processes actions through the reducer, notifies snapshot
/// subscribers after every transition, and executes any effects the
/// reducer returned.
///
/// Processing is single-actor: `send` holds the state write lock for
/// the duration of the reduction, and subscribers are notified before
/// `send` returns, so a transition and its persistence write complete
/// before the next action is accepted.
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(AppState::default(), ToDoReducer::new(), env);
///
/// store.subscribe(move |state| snapshots.save(state));
/// store.send(ToDoAction::AddToDo { text: "buy milk".into() }).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    listeners: Arc<Mutex<Vec<Listener<S>>>>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// # Arguments
    ///
    /// - `initial_state`: the starting state for the store
    /// - `reducer`: the reducer implementation (business logic)
    /// - `environment`: injected dependencies
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a snapshot listener
    ///
    /// The listener is invoked with a reference to the new state after
    /// every transition, synchronously within `send`. Listeners must be
    /// fast and must not panic; a persistence subscriber swallows its
    /// own errors.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.lock_listeners().push(Box::new(listener));
    }

    /// Send an action through the reducer
    ///
    /// Acquires the state write lock, runs the reducer, notifies every
    /// subscriber with the resulting snapshot, then hands returned
    /// effects to the executor.
    ///
    /// # Returns
    ///
    /// An [`EffectHandle`] for waiting on effect completion.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> EffectHandle {
        tracing::debug!("Processing action");
        metrics::counter!("store.actions.total").increment(1);

        let effects = {
            let mut state = self.state.write().await;

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            effects
        };

        self.notify_listeners().await;

        let (handle, tracking) = EffectHandle::new();
        for effect in effects {
            self.execute_effect(effect, &tracking);
        }

        handle
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure to ensure the lock is released
    /// promptly:
    ///
    /// ```ignore
    /// let item_count = store.state(|s| s.to_do_items.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Invoke every subscriber with the current snapshot
    async fn notify_listeners(&self) {
        let state = self.state.read().await;
        let listeners = self.lock_listeners();
        tracing::trace!(count = listeners.len(), "Notifying subscribers");
        for listener in listeners.iter() {
            listener(&state);
        }
    }

    /// Recover the listener list even if a previous holder panicked
    fn lock_listeners(&self) -> MutexGuard<'_, Vec<Listener<S>>> {
        match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Execute a single effect description
    ///
    /// `Parallel` branches each get their own task; `Sequential` runs
    /// its branches in order within one task; `Future` awaits the
    /// computation and feeds a produced action back through `send`.
    fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.execute_effect(effect, tracking);
                }
            },
            sequential @ Effect::Sequential(_) => {
                let guard = tracking.start();
                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    store.run_effect(sequential).await;
                });
            },
            Effect::Future(future) => {
                let guard = tracking.start();
                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    if let Some(action) = future.await {
                        let mut cascade = store.send(action).await;
                        cascade.wait().await;
                    }
                });
            },
        }
    }

    /// Await an effect tree to full completion, in order
    ///
    /// Used inside `Sequential` branches, where later effects must not
    /// start until earlier ones (and their cascades) finish.
    fn run_effect<'a>(
        &'a self,
        effect: Effect<A>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                },
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        let mut cascade = self.send(action).await;
                        cascade.wait().await;
                    }
                },
            }
        })
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
            listeners: Arc::clone(&self.listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist_core::SmallVec;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    struct CountState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CountAction {
        Increment,
        Decrement,
    }

    #[derive(Clone)]
    struct CountReducer;

    impl Reducer for CountReducer {
        type State = CountState;
        type Action = CountAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                CountAction::Increment => state.count += 1,
                CountAction::Decrement => state.count -= 1,
            }
            SmallVec::new()
        }
    }

    #[tokio::test]
    async fn send_applies_reducer() {
        let store = Store::new(CountState::default(), CountReducer, ());

        store.send(CountAction::Increment).await;
        store.send(CountAction::Increment).await;
        store.send(CountAction::Decrement).await;

        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn handle_without_effects_resolves_immediately() {
        let store = Store::new(CountState::default(), CountReducer, ());

        let mut handle = store.send(CountAction::Increment).await;
        handle.wait().await;

        assert_eq!(store.state(|s| s.count).await, 1);
    }

    #[tokio::test]
    async fn completed_handle_resolves() {
        EffectHandle::completed().wait().await;
    }
}
