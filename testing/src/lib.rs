//! # Todolist Testing
//!
//! Testing utilities and helpers for the todolist architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::{mocks::FixedIdGenerator, ReducerTest};
//!
//! ReducerTest::new(ToDoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(AppState::default())
//!     .when_action(ToDoAction::AddToDo { text: "buy milk".into() })
//!     .then_state(|state| assert_eq!(state.count(), 1))
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
///
/// Deterministic stand-ins for the production environment, making
/// reducer runs reproducible.
pub mod mocks {
    use std::sync::atomic::{AtomicU64, Ordering};

    use todolist_core::environment::IdGenerator;
    use uuid::Uuid;

    /// Identifier generator that always returns the same id
    ///
    /// Useful when a test needs to know the id an `AddToDo` will mint.
    ///
    /// # Example
    ///
    /// ```
    /// use todolist_core::environment::IdGenerator;
    /// use todolist_testing::mocks::FixedIdGenerator;
    /// use uuid::Uuid;
    ///
    /// let id = Uuid::from_u128(7);
    /// let ids = FixedIdGenerator::new(id);
    /// assert_eq!(ids.generate(), id);
    /// assert_eq!(ids.generate(), id); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedIdGenerator {
        id: Uuid,
    }

    impl FixedIdGenerator {
        /// Create a generator that always yields `id`
        #[must_use]
        pub const fn new(id: Uuid) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn generate(&self) -> Uuid {
            self.id
        }
    }

    /// Identifier generator yielding a predictable sequence
    ///
    /// Produces `Uuid::from_u128(1)`, `Uuid::from_u128(2)`, ... so
    /// tests can refer to generated ids without capturing them.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `Uuid::from_u128(1)`
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// The id the next call to `generate` will return
        #[must_use]
        pub fn peek(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.next.load(Ordering::SeqCst)) + 1)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }

}
