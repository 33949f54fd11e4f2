//! In-memory event sources for replay tests.
//!
//! These stand in for the on-disk log reader: finite, forward-only streams
//! yielding events (or an induced failure) in a fixed order.

use futures::Stream;
use futures::stream;
use quizlog_core::error::{ReplayError, Result};
use quizlog_core::event::Event;

/// A source yielding the given events in order, then ending.
pub fn event_stream(events: Vec<Event>) -> impl Stream<Item = Result<Event>> {
    stream::iter(events.into_iter().map(Ok))
}

/// A source yielding the given events in order, then the given error.
///
/// Useful for asserting that replay aborts fail-fast when the source
/// breaks mid-pass.
pub fn failing_stream(
    events: Vec<Event>,
    error: ReplayError,
) -> impl Stream<Item = Result<Event>> {
    stream::iter(
        events
            .into_iter()
            .map(Ok)
            .chain(std::iter::once(Err(error))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{game_started, ts};
    use futures::StreamExt;

    #[tokio::test]
    async fn failing_stream_yields_events_then_error() {
        let mut source = std::pin::pin!(failing_stream(
            vec![game_started("g-1", ts(0))],
            ReplayError::Configuration("broken".to_string()),
        ));

        assert!(source.next().await.unwrap().is_ok());
        assert!(matches!(
            source.next().await.unwrap(),
            Err(ReplayError::Configuration(_))
        ));
        assert!(source.next().await.is_none());
    }
}
