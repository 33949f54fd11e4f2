//! Projection capability: stateful folds over the event stream.
//!
//! # Overview
//!
//! A projection is the read side of the replay: it folds the ordered event
//! stream into its own private state and renders one derived report on
//! demand. The five analytical views (event count, registration count,
//! monthly registration histogram, quiz popularity ranking, bot detection)
//! all implement this trait and are driven uniformly by the
//! [`ReplayEngine`](crate::replay::ReplayEngine).
//!
//! ## Key Properties
//!
//! - **Disjoint state**: each projection owns its state exclusively;
//!   mutating one can never affect another's output.
//! - **Order-sensitive**: correctness (time deltas, join resolution,
//!   monthly buckets) depends on receiving events in exact source order.
//! - **Synchronous fold**: projection state is purely in-memory, so
//!   [`consume`](Projection::consume) is a plain synchronous call — the
//!   only await point in the system is pulling the next event from the
//!   source.
//!
//! # Example
//!
//! ```
//! use quizlog_core::event::Event;
//! use quizlog_core::projection::Projection;
//! use quizlog_core::Result;
//!
//! struct EventTally(u64);
//!
//! impl Projection for EventTally {
//!     fn name(&self) -> &str {
//!         "event-tally"
//!     }
//!
//!     fn consume(&mut self, _event: &Event) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//!
//!     fn render(&self) -> String {
//!         self.0.to_string()
//!     }
//! }
//! ```

use crate::error::Result;
use crate::event::Event;

/// A stateful fold over the event stream producing one derived report.
///
/// Implementations are registered with the replay engine, receive every
/// event exactly once in source order, and render their report after the
/// source is exhausted.
pub trait Projection: Send {
    /// Stable identifier for this projection, used in logs and reports.
    fn name(&self) -> &str;

    /// Fold one event into the projection's state.
    ///
    /// Called once per event, in source order. Implementations must not
    /// assume anything about other projections' state.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`](crate::ReplayError::SchemaViolation)
    /// if the event lacks a payload field required by its type, or
    /// [`ReplayError::OrderViolation`](crate::ReplayError::OrderViolation)
    /// if the event references an entity no earlier event created. Both
    /// abort the replay.
    fn consume(&mut self, event: &Event) -> Result<()>;

    /// Render the report for the current state.
    ///
    /// A pure function of state: callable any number of times, including
    /// before the replay completes, though only the post-replay value is
    /// meaningful for reporting. Before any event is consumed this renders
    /// the projection's identity (zero counts, empty collections).
    fn render(&self) -> String;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test assertions panic on failure
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    struct Tally(u64);

    impl Projection for Tally {
        fn name(&self) -> &str {
            "tally"
        }

        fn consume(&mut self, _event: &Event) -> Result<()> {
            self.0 += 1;
            Ok(())
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn projections_are_usable_as_trait_objects() {
        let mut boxed: Box<dyn Projection> = Box::new(Tally(0));
        let event = Event::new("Anything", Utc::now(), HashMap::new());

        assert_eq!(boxed.render(), "0");
        boxed.consume(&event).unwrap();
        boxed.consume(&event).unwrap();
        assert_eq!(boxed.name(), "tally");
        assert_eq!(boxed.render(), "2");
    }
}
