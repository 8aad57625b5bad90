//! # Todo Runtime
//!
//! The [`Store`] that drives a [`Reducer`]: it owns the state, feeds actions
//! through the reducer and executes the returned effects.
//!
//! The store is synchronous. `send` processes the action and every action
//! fed back through [`Effect::Send`] before it returns, so a caller always
//! observes a fully settled state.
//!
//! ## Example
//!
//! ```ignore
//! let mut store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::AddTodo {
//!     text: "Buy milk".to_string(),
//!     priority: Priority::High,
//! })?;
//!
//! let total = store.state(|s| s.count());
//! ```

use std::collections::VecDeque;
use todo_core::{effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured limit
        ///
        /// The actions processed before the limit was hit stay applied;
        /// the remaining queued actions are dropped.
        #[error("Feedback limit of {limit} actions exceeded while processing a single send")]
        FeedbackLimit {
            /// The configured maximum number of feedback actions
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Default bound on actions fed back by effects during a single `send`
pub const DEFAULT_MAX_FEEDBACK_ACTIONS: usize = 64;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions effects may feed back during one `send`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback action limit
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEEDBACK_ACTIONS)
    }
}

/// Store module - The runtime coordinator
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected capabilities)
    /// 4. Effect execution (with feedback loop)
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
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then executes its effects. Actions produced by
        /// [`Effect::Send`] are processed in FIFO order before this returns.
        ///
        /// Returns the number of actions reduced, including the initial one.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimit`] if effects feed back more
        /// than [`StoreConfig::max_feedback_actions`] actions.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut reduced = 0_usize;

            while let Some(action) = queue.pop_front() {
                if reduced > self.config.max_feedback_actions {
                    tracing::error!(
                        limit = self.config.max_feedback_actions,
                        dropped = queue.len() + 1,
                        "Feedback limit exceeded, dropping queued actions"
                    );
                    metrics::counter!("store.feedback_limit.exceeded").increment(1);
                    return Err(StoreError::FeedbackLimit {
                        limit: self.config.max_feedback_actions,
                    });
                }

                metrics::counter!("store.actions.total").increment(1);

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                    metrics::histogram!("store.reducer.duration_seconds")
                        .record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };
                reduced += 1;

                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            }

            tracing::debug!(reduced, "Action processing completed");
            Ok(reduced)
        }

        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            metrics::counter!("store.effects.executed", "type" => effect.kind()).increment(1);
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Send(action) => {
                    tracing::trace!("Executing Effect::Send, queueing feedback action");
                    queue.push_back(action);
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
            }
        }

        /// Read state via a closure
        ///
        /// # Example
        ///
        /// ```ignore
        /// let total = store.state(|s| s.count());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

pub use store::Store;
