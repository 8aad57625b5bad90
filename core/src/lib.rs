//! # Todo Core
//!
//! Core traits and types for the todo store.
//!
//! This crate provides the abstractions the todo list is built on: a reducer
//! that owns all business logic, effect descriptions that feed follow-up
//! actions back into the store, and the capabilities injected through the
//! environment.
//!
//! ## Core Concepts
//!
//! - **State**: The todo collection plus session inputs (filter, search, draft)
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as a value, executed by the store
//! - **Environment**: Injected capabilities (`Clock`, `IdGenerator`, `Confirm`)
//!
//! ## Example
//!
//! ```
//! use todo_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CountState {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CountAction {
//!     Bump,
//! }
//!
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = CountState;
//!     type Action = CountAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CountState,
//!         action: CountAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CountAction>; 4]> {
//!         match action {
//!             CountAction::Bump => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = CountState::default();
//! let effects = CountReducer.reduce(&mut state, CountAction::Bump, &());
//! assert_eq!(state.count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// Every observable change to the todo list goes through one.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected capabilities this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected capabilities
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This function:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the store
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work described as values
///
/// Effects are returned from reducers and executed by the store after the
/// reduction completes. The todo store is synchronous, so every effect is
/// resolved before `send` returns.
pub mod effect {
    /// Effect type - describes work the store performs after a reduction
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Send(Action),

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns the name of the variant, used as a metrics label
        #[must_use]
        pub const fn kind(&self) -> &'static str {
            match self {
                Effect::None => "none",
                Effect::Send(_) => "send",
                Effect::Sequential(_) => "sequential",
            }
        }
    }
}

/// Environment module - Capabilities injected into reducers
///
/// Anything a reducer cannot decide from state alone (the current time, a
/// fresh identifier, the user's answer to a prompt) is abstracted behind a
/// trait and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::sync::{Mutex, PoisonError};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Clock backed by the system time
    ///
    /// This is wall-clock time and goes backwards when the system clock is
    /// set back. Wrap it in [`MonotonicClock`] where readings must not
    /// decrease.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Clock whose readings never decrease
    ///
    /// A reading of the wrapped clock that is earlier than the previous one
    /// is replaced by the previous one.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_core::environment::{Clock, MonotonicClock, SystemClock};
    ///
    /// let clock = MonotonicClock::new(SystemClock);
    /// let first = clock.now();
    /// assert!(clock.now() >= first);
    /// ```
    #[derive(Debug, Default)]
    pub struct MonotonicClock<C> {
        inner: C,
        last: Mutex<Option<DateTime<Utc>>>,
    }

    impl<C: Clock> MonotonicClock<C> {
        /// Wrap `inner`
        #[must_use]
        pub const fn new(inner: C) -> Self {
            Self {
                inner,
                last: Mutex::new(None),
            }
        }
    }

    impl<C: Clock> Clock for MonotonicClock<C> {
        fn now(&self) -> DateTime<Utc> {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            let reading = self.inner.now();
            let now = last.map_or(reading, |previous| reading.max(previous));
            *last = Some(now);
            now
        }
    }

    /// Source of identifiers that are unique for the lifetime of a session
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> Uuid;
    }

    /// Random (v4) UUID generator
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }

    /// A two-choice question put to the user before a destructive change
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Prompt {
        /// Short title, e.g. "Delete Todo"
        pub title: String,
        /// The question itself
        pub message: String,
        /// Label of the choice that leaves state untouched
        pub cancel_label: String,
        /// Label of the choice that performs the change
        pub confirm_label: String,
    }

    impl Prompt {
        /// Creates a prompt with the default `Cancel` / `OK` labels
        #[must_use]
        pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
            Self {
                title: title.into(),
                message: message.into(),
                cancel_label: "Cancel".to_string(),
                confirm_label: "OK".to_string(),
            }
        }

        /// Overrides the label of the confirming choice
        #[must_use]
        pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
            self.confirm_label = label.into();
            self
        }
    }

    impl std::fmt::Display for Prompt {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "{}: {} [{} / {}]",
                self.title, self.message, self.cancel_label, self.confirm_label
            )
        }
    }

    /// Confirmation capability
    ///
    /// Returning `false` means the user dismissed the prompt and no mutation
    /// may happen.
    pub trait Confirm: Send + Sync {
        /// Ask the user to confirm the prompt
        fn confirm(&self, prompt: &Prompt) -> bool;
    }

    /// Confirms every prompt without asking
    #[derive(Debug, Clone, Copy, Default)]
    pub struct AlwaysConfirm;

    impl Confirm for AlwaysConfirm {
        fn confirm(&self, _prompt: &Prompt) -> bool {
            true
        }
    }

    /// Declines every prompt without asking
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NeverConfirm;

    impl Confirm for NeverConfirm {
        fn confirm(&self, _prompt: &Prompt) -> bool {
            false
        }
    }
}
