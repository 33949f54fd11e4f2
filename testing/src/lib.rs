//! Testing utilities for quizlog.
//!
//! Provides fast, deterministic testing infrastructure for replay and
//! projection tests:
//! - [`fixtures`]: builders for every event type in the quiz-game log,
//!   with a fixed, deterministic time base
//! - [`source`]: in-memory event sources ([`event_stream`],
//!   [`failing_stream`]) standing in for the on-disk log reader
//!
//! # Example
//!
//! ```
//! use quizlog_core::ReplayEngine;
//! use quizlog_testing::fixtures::{game_started, ts};
//! use quizlog_testing::source::event_stream;
//!
//! # futures::executor::block_on(async {
//! let mut engine = ReplayEngine::new();
//! let dispatched = engine
//!     .run(event_stream(vec![game_started("g-1", ts(0))]))
//!     .await
//!     .unwrap();
//! assert_eq!(dispatched, 1);
//! # });
//! ```

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity

pub mod fixtures;
pub mod source;

pub use source::{event_stream, failing_stream};
