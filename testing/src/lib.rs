//! # Tourcart Testing
//!
//! Testing utilities and helpers for reducers built on `tourcart-core`.
//!
//! This crate provides:
//! - [`ReducerTest`]: a Given-When-Then harness for a single reducer step
//! - [`replay`]: run a sequence of actions from a starting state
//! - [`assertions`]: effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use tourcart_testing::ReducerTest;
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(CartEnvironment)
//!     .given_state(CartState::new())
//!     .when_action(CartAction::clear())
//!     .then_state(|state| assert!(state.is_empty()))
//!     .run();
//! ```


pub use reducer_test::{assertions, replay, ReducerTest};
