//! # Quizlog Projections
//!
//! The five analytical projections derived from the quiz-game event log:
//!
//! - [`EventCounter`]: total number of events
//! - [`RegistrationCounter`]: number of `PlayerHasRegistered` events
//! - [`MonthlyRegistrationHistogram`]: registrations bucketed per month
//! - [`QuizPopularityRanking`]: top quizzes by started games, resolved
//!   through a three-stage indirect join
//! - [`BotPlayerDetector`]: players whose total answer latency is exactly
//!   zero, correlated across four event types
//!
//! Each projection folds the stream independently into its own state; the
//! replay engine in `quizlog-core` drives them uniformly and renders their
//! reports in registration order.
//!
//! # Example
//!
//! ```
//! use quizlog_core::ReplayEngine;
//! use quizlog_projections::{EventCounter, RegistrationCounter};
//!
//! let mut engine = ReplayEngine::new();
//! engine.register(EventCounter::new());
//! engine.register(RegistrationCounter::new());
//! assert_eq!(engine.projection_count(), 2);
//! ```

pub mod bots;
pub mod counters;
pub mod histogram;
pub mod ranking;

// Re-export main types for convenience
pub use bots::BotPlayerDetector;
pub use counters::{EventCounter, RegistrationCounter};
pub use histogram::MonthlyRegistrationHistogram;
pub use ranking::QuizPopularityRanking;
