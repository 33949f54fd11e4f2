//! Replay engine: one ordered pass over the log, fanned out to projections.
//!
//! # Overview
//!
//! The engine pulls events from a finite, forward-only source stream and
//! dispatches each event, in source order, to every registered projection
//! before pulling the next. This is a broadcast-fold, not a pipeline: one
//! event produces N independent state updates over disjoint state, so
//! dispatch to one projection never observes the effects of another.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │ Event Source │ ───▶ │ ReplayEngine │ ───▶ │ Projection 1 │
//! └──────────────┘      └──────┬───────┘      ├──────────────┤
//!                              │  fan-out     │      ...     │
//!                              └────────────▶ ├──────────────┤
//!                                             │ Projection N │
//!                                             └──────────────┘
//! ```
//!
//! # Ordering Contract
//!
//! Per-projection source order is the only scheduling requirement. A single
//! task invoking the N projections sequentially per event satisfies it
//! trivially and keeps projection state unshared and lock-free, so that is
//! what this engine does. The source is treated as non-restartable:
//! re-running the analysis requires re-opening the source from the start.
//!
//! # Example
//!
//! ```
//! use quizlog_core::event::Event;
//! use quizlog_core::projection::Projection;
//! use quizlog_core::replay::ReplayEngine;
//! use quizlog_core::Result;
//! use chrono::Utc;
//! use std::collections::HashMap;
//!
//! struct Tally(u64);
//!
//! impl Projection for Tally {
//!     fn name(&self) -> &str { "tally" }
//!     fn consume(&mut self, _event: &Event) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//!     fn render(&self) -> String { self.0.to_string() }
//! }
//!
//! # futures::executor::block_on(async {
//! let mut engine = ReplayEngine::new();
//! engine.register(Tally(0));
//!
//! let payload = HashMap::from([("game_id".to_string(), "g-1".to_string())]);
//! let events = vec![Ok(Event::new("GameWasStarted", Utc::now(), payload))];
//! let dispatched = engine.run(futures::stream::iter(events)).await?;
//!
//! assert_eq!(dispatched, 1);
//! assert_eq!(engine.reports().next(), Some(("tally", "1".to_string())));
//! # Ok::<(), quizlog_core::ReplayError>(())
//! # }).unwrap();
//! ```

use crate::error::Result;
use crate::event::Event;
use crate::projection::Projection;
use futures::{Stream, StreamExt};
use std::pin::pin;

/// Drives one deterministic, ordered pass over an event source, fanning
/// each event out to every registered projection.
///
/// Projections are held in registration order; [`reports`](Self::reports)
/// yields rendered reports in that same order.
#[derive(Default)]
pub struct ReplayEngine {
    projections: Vec<Box<dyn Projection>>,
}

impl ReplayEngine {
    /// Create an engine with no registered projections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projections: Vec::new(),
        }
    }

    /// Register a projection.
    ///
    /// Registration order determines report order.
    pub fn register<P>(&mut self, projection: P)
    where
        P: Projection + 'static,
    {
        self.projections.push(Box::new(projection));
    }

    /// Number of registered projections.
    #[must_use]
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    /// Replay the source to exhaustion, dispatching every event exactly
    /// once to every registered projection in registration order.
    ///
    /// Returns the number of events dispatched. A source that yields zero
    /// events is valid: every projection simply renders its identity.
    ///
    /// Every event is schema-validated ([`Event::validate`]) before
    /// fan-out, so a malformed event aborts the replay even when no
    /// projection reads its type.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ReplayError`](crate::ReplayError) produced by
    /// the source (e.g. `Configuration` for an unopenable or undecodable
    /// log), by validation (`SchemaViolation`), or by a projection
    /// (`SchemaViolation`, `OrderViolation`). Replay aborts at that event;
    /// no further events are dispatched and any projection state already
    /// accumulated must not be reported.
    pub async fn run<S>(&mut self, source: S) -> Result<u64>
    where
        S: Stream<Item = Result<Event>>,
    {
        let mut source = pin!(source);
        let mut dispatched: u64 = 0;

        while let Some(next) = source.next().await {
            let event = next?;
            event.validate()?;
            tracing::trace!(event_type = %event.event_type(), "Dispatching event");

            for projection in &mut self.projections {
                projection.consume(&event)?;
            }
            dispatched += 1;
        }

        tracing::info!(
            events = dispatched,
            projections = self.projections.len(),
            "Replay complete"
        );
        Ok(dispatched)
    }

    /// Rendered reports, as `(name, report)` pairs in registration order.
    pub fn reports(&self) -> impl Iterator<Item = (&str, String)> {
        self.projections
            .iter()
            .map(|projection| (projection.name(), projection.render()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test assertions panic on failure
mod tests {
    use super::*;
    use crate::error::ReplayError;
    use chrono::Utc;
    use futures::stream;
    use std::collections::HashMap;

    struct Recorder {
        name: &'static str,
        seen: Vec<String>,
    }

    impl Recorder {
        fn new(name: &'static str) -> Self {
            Self { name, seen: Vec::new() }
        }
    }

    impl Projection for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn consume(&mut self, event: &Event) -> Result<()> {
            self.seen.push(event.event_type().to_string());
            Ok(())
        }

        fn render(&self) -> String {
            self.seen.join(",")
        }
    }

    struct FailsOn(&'static str);

    impl Projection for FailsOn {
        fn name(&self) -> &str {
            "fails-on"
        }

        fn consume(&mut self, event: &Event) -> Result<()> {
            if event.is(self.0) {
                return Err(ReplayError::OrderViolation {
                    event_type: event.event_type().to_string(),
                    detail: "induced failure".to_string(),
                });
            }
            Ok(())
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    fn event(event_type: &str) -> Result<Event> {
        Ok(Event::new(event_type, Utc::now(), HashMap::new()))
    }

    #[tokio::test]
    async fn dispatches_every_event_to_every_projection_in_order() {
        let mut engine = ReplayEngine::new();
        engine.register(Recorder::new("first"));
        engine.register(Recorder::new("second"));

        let events = vec![event("A"), event("B"), event("C")];
        let dispatched = engine.run(stream::iter(events)).await.unwrap();

        assert_eq!(dispatched, 3);
        let reports: Vec<_> = engine.reports().collect();
        assert_eq!(reports[0], ("first", "A,B,C".to_string()));
        assert_eq!(reports[1], ("second", "A,B,C".to_string()));
    }

    #[tokio::test]
    async fn empty_source_yields_identity_reports() {
        let mut engine = ReplayEngine::new();
        engine.register(Recorder::new("only"));

        let dispatched = engine.run(stream::iter(Vec::new())).await.unwrap();

        assert_eq!(dispatched, 0);
        assert_eq!(engine.reports().next(), Some(("only", String::new())));
    }

    #[tokio::test]
    async fn projection_error_aborts_replay() {
        let mut engine = ReplayEngine::new();
        engine.register(FailsOn("B"));
        engine.register(Recorder::new("witness"));

        let events = vec![event("A"), event("B"), event("C")];
        let err = engine.run(stream::iter(events)).await.unwrap_err();

        assert!(matches!(err, ReplayError::OrderViolation { .. }));
        // The witness never saw B or C: dispatch stopped at the failure.
        let reports: Vec<_> = engine.reports().collect();
        assert_eq!(reports[1], ("witness", "A".to_string()));
    }

    #[tokio::test]
    async fn schema_violating_event_aborts_before_fan_out() {
        let mut engine = ReplayEngine::new();
        engine.register(Recorder::new("witness"));

        // No projection consumes GameWasFinished; validation still rejects
        // it for lacking game_id.
        let events = vec![
            event("A"),
            Ok(Event::new("GameWasFinished", Utc::now(), HashMap::new())),
            event("C"),
        ];
        let err = engine.run(stream::iter(events)).await.unwrap_err();

        assert!(matches!(err, ReplayError::SchemaViolation { .. }));
        assert_eq!(engine.reports().next(), Some(("witness", "A".to_string())));
    }

    #[tokio::test]
    async fn source_error_aborts_before_dispatching_that_item() {
        let mut engine = ReplayEngine::new();
        engine.register(Recorder::new("witness"));

        let events = vec![
            event("A"),
            Err(ReplayError::Configuration("truncated log".to_string())),
            event("C"),
        ];
        let err = engine.run(stream::iter(events)).await.unwrap_err();

        assert!(matches!(err, ReplayError::Configuration(_)));
        assert_eq!(engine.reports().next(), Some(("witness", "A".to_string())));
    }
}
