//! Per-month registration histogram.

use chrono::Datelike;
use quizlog_core::Result;
use quizlog_core::event::{Event, types};
use quizlog_core::projection::Projection;
use std::collections::BTreeMap;

/// Buckets `PlayerHasRegistered` events by the month they occurred in.
///
/// Bucket keys are zero-padded `YYYY-MM` strings, so their lexicographic
/// order is chronological order and rendering is a plain in-order walk of
/// the map. The sum of all buckets always equals the registration count.
#[derive(Debug, Default)]
pub struct MonthlyRegistrationHistogram {
    buckets: BTreeMap<String, u64>,
}

impl MonthlyRegistrationHistogram {
    /// Create an empty histogram.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Total registrations across all months.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets.values().sum()
    }
}

fn month_key(event: &Event) -> String {
    let timestamp = event.timestamp();
    format!("{:04}-{:02}", timestamp.year(), timestamp.month())
}

impl Projection for MonthlyRegistrationHistogram {
    fn name(&self) -> &str {
        "registrations-per-month"
    }

    fn consume(&mut self, event: &Event) -> Result<()> {
        if event.is(types::PLAYER_HAS_REGISTERED) {
            *self.buckets.entry(month_key(event)).or_insert(0) += 1;
        }
        Ok(())
    }

    fn render(&self) -> String {
        self.buckets
            .iter()
            .map(|(month, count)| format!("{month} : {count}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test assertions panic on failure
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quizlog_testing::fixtures::{game_started, player_registered, ts};

    #[test]
    fn registrations_land_in_their_month_bucket() {
        let mut histogram = MonthlyRegistrationHistogram::new();
        let march = Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap();
        let april = Utc.with_ymd_and_hms(2021, 4, 2, 9, 30, 0).unwrap();

        for (id, at) in [("p-1", march), ("p-2", march), ("p-3", april)] {
            histogram
                .consume(&player_registered(id, "First", "Last", at))
                .unwrap();
        }

        assert_eq!(histogram.render(), "2021-03 : 2\n2021-04 : 1");
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn months_render_in_ascending_order_across_years() {
        let mut histogram = MonthlyRegistrationHistogram::new();
        let late = Utc.with_ymd_and_hms(2021, 12, 1, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();

        histogram
            .consume(&player_registered("p-1", "A", "B", late))
            .unwrap();
        histogram
            .consume(&player_registered("p-2", "C", "D", early))
            .unwrap();

        assert_eq!(histogram.render(), "2020-02 : 1\n2021-12 : 1");
    }

    #[test]
    fn non_registration_events_are_ignored() {
        let mut histogram = MonthlyRegistrationHistogram::new();
        histogram.consume(&game_started("g-1", ts(0))).unwrap();
        assert_eq!(histogram.render(), "");
        assert_eq!(histogram.total(), 0);
    }
}
