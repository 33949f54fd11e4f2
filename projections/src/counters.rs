//! Scalar counting projections.

use quizlog_core::Result;
use quizlog_core::event::{Event, types};
use quizlog_core::projection::Projection;

/// Counts every event in the log, unconditionally.
///
/// Renders the total as a decimal string. After any replay this equals the
/// number of events dispatched, making it the reference point for the
/// other counters.
#[derive(Debug, Default)]
pub struct EventCounter {
    total: u64,
}

impl EventCounter {
    /// Create a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// The current count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

impl Projection for EventCounter {
    fn name(&self) -> &str {
        "event-count"
    }

    fn consume(&mut self, _event: &Event) -> Result<()> {
        self.total += 1;
        Ok(())
    }

    fn render(&self) -> String {
        self.total.to_string()
    }
}

/// Counts `PlayerHasRegistered` events.
///
/// The type tag is matched case-insensitively; the log's producers have
/// not been consistent about casing.
#[derive(Debug, Default)]
pub struct RegistrationCounter {
    total: u64,
}

impl RegistrationCounter {
    /// Create a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { total: 0 }
    }

    /// The current count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

impl Projection for RegistrationCounter {
    fn name(&self) -> &str {
        "registration-count"
    }

    fn consume(&mut self, event: &Event) -> Result<()> {
        if event.is(types::PLAYER_HAS_REGISTERED) {
            self.total += 1;
        }
        Ok(())
    }

    fn render(&self) -> String {
        self.total.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test assertions panic on failure
mod tests {
    use super::*;
    use quizlog_testing::fixtures::{game_started, player_registered, ts};

    #[test]
    fn event_counter_counts_everything() {
        let mut counter = EventCounter::new();
        counter
            .consume(&player_registered("p-1", "Ada", "Lovelace", ts(0)))
            .unwrap();
        counter.consume(&game_started("g-1", ts(1))).unwrap();
        assert_eq!(counter.render(), "2");
    }

    #[test]
    fn registration_counter_ignores_other_events() {
        let mut counter = RegistrationCounter::new();
        counter
            .consume(&player_registered("p-1", "Ada", "Lovelace", ts(0)))
            .unwrap();
        counter.consume(&game_started("g-1", ts(1))).unwrap();
        assert_eq!(counter.render(), "1");
    }

    #[test]
    fn registration_counter_matches_case_insensitively() {
        use chrono::Utc;
        use quizlog_core::event::Event;
        use std::collections::HashMap;

        let mut counter = RegistrationCounter::new();
        let event = Event::new("PLAYERHASREGISTERED", Utc::now(), HashMap::new());
        counter.consume(&event).unwrap();
        assert_eq!(counter.total(), 1);
    }

    #[test]
    fn identity_render_is_zero() {
        assert_eq!(EventCounter::new().render(), "0");
        assert_eq!(RegistrationCounter::new().render(), "0");
    }
}
