//! # Tasklist Runtime
//!
//! Runtime implementation for the Tasklist reducer architecture.
//!
//! This crate provides the Store: it owns the held state, runs the reducer for
//! every action, executes the returned effects, and notifies subscribers after
//! each state transition.
//!
//! Reducers that only rearrange held state (the to-do list is one) return no
//! effects, and `send` then completes after a single reduce. The effect
//! executor serves reducers that describe async work and feed its result
//! back as an action.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
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
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A task spawned for parallel effect execution failed
        ///
        /// This typically means the effect's future panicked.
        #[error("Task failed during parallel execution: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),

        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;
pub use store::Store;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(256);
/// assert_eq!(config.broadcast_capacity, 256);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the processed-action broadcast channel
    ///
    /// Subscribers that fall further behind than this receive
    /// `RecvError::Lagged`. Zero is raised to one.
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the broadcast channel capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 64,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, Effect, Reducer, RwLock, StoreConfig, StoreError};
    use futures::future::{BoxFuture, FutureExt};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{broadcast, Mutex};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent reads)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Actions are dispatched one at a time: `send` holds a dispatch lock
    /// until the action, every effect it produced, and every action fed back
    /// by those effects have been reduced.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(TodoState::new(), TodoReducer::new(), env);
    ///
    /// store.send(TodoAction::SubmitNewTodo { text: "Buy milk".into() }).await?;
    /// let count = store.state(|s| s.todos.len()).await;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        dispatch: Mutex<()>,
        shutdown: AtomicBool,
        /// Every action is broadcast after the reducer has applied it, so a
        /// subscriber that reads state on receipt observes the new state.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                dispatch: Mutex::new(()),
                shutdown: AtomicBool::new(false),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state and calls the reducer
        /// 2. Broadcasts the action to subscribers
        /// 3. Executes returned effects, queueing any action they produce
        /// 4. Repeats until the queue is empty
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down.
        /// - [`StoreError::TaskJoinError`] if a parallel effect task panicked.
        ///   Actions reduced before the failure stay applied.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            self.reject_if_shutting_down(&action)?;

            let _dispatch = self.dispatch.lock().await;
            // Shutdown may have started while this send waited its turn
            self.reject_if_shutting_down(&action)?;
            let mut queue = VecDeque::from([action]);

            while let Some(action) = queue.pop_front() {
                tracing::debug!(?action, "Processing action");
                metrics::counter!("store.actions.total").increment(1);

                let effects = {
                    let mut state = self.state.write().await;
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();
                    self.reducer
                        .reduce(&mut *state, action.clone(), &self.environment)
                };

                // No subscribers is not an error
                let _ = self.action_broadcast.send(action);

                tracing::trace!("Reducer returned {} effects", effects.len());
                for effect in effects {
                    queue.extend(run_effect(effect).await?);
                }
            }

            Ok(())
        }

        fn reject_if_shutting_down(&self, action: &A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!(?action, "Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let pending = store.state(|s| s.counts().pending).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action processed by this store
        ///
        /// The receiver gets a clone of each action after it has been reduced,
        /// including actions fed back by effects.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting new actions
        ///
        /// The `send` currently being processed finishes normally. Sends still
        /// waiting for their turn, and every later `send`, return
        /// [`StoreError::ShutdownInProgress`].
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns true once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    /// Execute an effect description, collecting the actions it produces
    fn run_effect<A>(effect: Effect<A>) -> BoxFuture<'static, Result<Vec<A>, StoreError>>
    where
        A: Send + 'static,
    {
        match effect {
            Effect::None => futures::future::ready(Ok(Vec::new())).boxed(),
            Effect::Future(fut) => {
                async move { Ok::<_, StoreError>(fut.await.into_iter().collect()) }.boxed()
            },
            Effect::Sequential(effects) => async move {
                let mut produced = Vec::new();
                for effect in effects {
                    produced.extend(run_effect(effect).await?);
                }
                Ok::<_, StoreError>(produced)
            }
            .boxed(),
            Effect::Parallel(effects) => async move {
                let handles: Vec<_> = effects
                    .into_iter()
                    .map(|effect| tokio::spawn(run_effect(effect)))
                    .collect();

                let mut produced = Vec::new();
                for joined in futures::future::join_all(handles).await {
                    produced.extend(joined??);
                }
                Ok::<_, StoreError>(produced)
            }
            .boxed(),
        }
    }
}
