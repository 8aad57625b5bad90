//! # Todo Testing
//!
//! Testing utilities and helpers for the todo store.
//!
//! This crate provides:
//! - Mock implementations of the environment capabilities
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{test_clock, ScriptedConfirm, SequentialIds};
//!
//! let confirm = Arc::new(ScriptedConfirm::answering([true]));
//! let env = TodoEnvironment::new(
//!     Arc::new(test_clock()),
//!     Arc::new(SequentialIds::new()),
//!     confirm.clone(),
//! );
//! ```

use chrono::{DateTime, Utc};
use todo_core::environment::{Clock, Confirm, IdGenerator, Prompt};


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, Confirm, DateTime, IdGenerator, Prompt, Utc};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
    use std::sync::{Mutex, PoisonError};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::FixedClock;
    /// use todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by one second on every reading
    ///
    /// Gives each created record a strictly later timestamp than the last.
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        ticks: AtomicI64,
    }

    impl SteppingClock {
        /// Create a clock whose first reading is `start`
        #[must_use]
        pub const fn new(start: DateTime<Utc>) -> Self {
            Self {
                start,
                ticks: AtomicI64::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
            self.start + chrono::Duration::seconds(tick)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// Create a stepping clock starting at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn stepping_clock() -> SteppingClock {
        SteppingClock::new(test_epoch())
    }

    #[allow(clippy::expect_used)] // Hardcoded timestamp always parses
    fn test_epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }

    /// Predictable ids: `00000000-0000-0000-0000-000000000001`, `...02`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator whose first id ends in `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }

        /// The id this generator returns on its `n`th call (1-based)
        #[must_use]
        pub const fn nth(n: u64) -> Uuid {
            Uuid::from_u128(n as u128)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
            Self::nth(n)
        }
    }

    /// Confirmer that replays scripted answers and records every prompt
    ///
    /// Once the script runs out every further prompt is declined.
    #[derive(Debug, Default)]
    pub struct ScriptedConfirm {
        answers: Mutex<VecDeque<bool>>,
        prompts: Mutex<Vec<Prompt>>,
    }

    impl ScriptedConfirm {
        /// Create a confirmer that answers with `answers`, in order
        #[must_use]
        pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Every prompt shown so far
        #[must_use]
        pub fn prompts(&self) -> Vec<Prompt> {
            self.prompts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of prompts shown so far
        #[must_use]
        pub fn prompt_count(&self) -> usize {
            self.prompts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, prompt: &Prompt) -> bool {
            self.prompts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(prompt.clone());
            self.answers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or(false)
        }
    }
}

// Re-export commonly used items
pub use mocks::{
    FixedClock, ScriptedConfirm, SequentialIds, SteppingClock, stepping_clock, test_clock,
};
pub use reducer_test::{ReducerTest, assertions};
