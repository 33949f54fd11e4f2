//! # Quizlog Core
//!
//! Core types for replaying a quiz-game event log and deriving analytical
//! projections over it.
//!
//! ## Core Concepts
//!
//! - **Event**: immutable domain fact with a type tag, timestamp, and
//!   schema-dependent payload ([`event::Event`])
//! - **Projection**: a stateful fold over the event stream producing one
//!   derived report ([`projection::Projection`])
//! - **Replay**: one deterministic, ordered, single pass over the event
//!   source ([`replay::ReplayEngine`])
//! - **Fan-out**: broadcasting one ordered event stream to multiple
//!   independently-stated consumers
//!
//! ## Architecture Principles
//!
//! - Fail fast: a malformed or causally broken log aborts the replay with
//!   no partial report ([`error::ReplayError`])
//! - Disjoint projection state: no ambient or shared mutable state
//! - Tagged identifiers: player, game, quiz and question ids are distinct
//!   types, never interchangeable raw strings
//!
//! ## Example
//!
//! ```
//! use quizlog_core::event::{Event, types};
//! use quizlog_core::{Projection, ReplayEngine, Result};
//! use chrono::Utc;
//! use std::collections::HashMap;
//!
//! struct Registrations(u64);
//!
//! impl Projection for Registrations {
//!     fn name(&self) -> &str { "registrations" }
//!     fn consume(&mut self, event: &Event) -> Result<()> {
//!         if event.is(types::PLAYER_HAS_REGISTERED) {
//!             self.0 += 1;
//!         }
//!         Ok(())
//!     }
//!     fn render(&self) -> String { self.0.to_string() }
//! }
//!
//! # futures::executor::block_on(async {
//! let mut engine = ReplayEngine::new();
//! engine.register(Registrations(0));
//!
//! let event = Event::new(
//!     types::PLAYER_HAS_REGISTERED,
//!     Utc::now(),
//!     HashMap::from([
//!         ("player_id".to_string(), "p-1".to_string()),
//!         ("first_name".to_string(), "Ada".to_string()),
//!         ("last_name".to_string(), "Lovelace".to_string()),
//!     ]),
//! );
//! engine.run(futures::stream::iter(vec![Ok(event)])).await?;
//!
//! assert_eq!(engine.reports().next(), Some(("registrations", "1".to_string())));
//! # Ok::<(), quizlog_core::ReplayError>(())
//! # }).unwrap();
//! ```

pub mod error;
pub mod event;
pub mod projection;
pub mod replay;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub use error::{ReplayError, Result};
pub use event::Event;
pub use projection::Projection;
pub use replay::ReplayEngine;
