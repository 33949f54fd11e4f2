//! Event fixtures with a fixed, deterministic time base.
//!
//! Every builder produces a well-formed [`Event`] for one of the nine log
//! event types, with its required payload fields populated. Timestamps are
//! derived from a fixed epoch via [`ts`] so tests are reproducible.

use chrono::{DateTime, TimeZone, Utc};
use quizlog_core::event::{Event, types};
use std::collections::HashMap;

/// Fixed time base for fixtures: 2021-01-01T00:00:00Z.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
}

/// A timestamp `seconds` after the fixed [`base_time`].
#[must_use]
pub fn ts(seconds: i64) -> DateTime<Utc> {
    base_time() + chrono::Duration::seconds(seconds)
}

fn payload<const N: usize>(fields: [(&str, &str); N]) -> HashMap<String, String> {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A `PlayerHasRegistered` event.
#[must_use]
pub fn player_registered(
    player_id: &str,
    first_name: &str,
    last_name: &str,
    at: DateTime<Utc>,
) -> Event {
    Event::new(
        types::PLAYER_HAS_REGISTERED,
        at,
        payload([
            ("player_id", player_id),
            ("first_name", first_name),
            ("last_name", last_name),
        ]),
    )
}

/// A `PlayerJoinedGame` event.
#[must_use]
pub fn player_joined(player_id: &str, game_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        types::PLAYER_JOINED_GAME,
        at,
        payload([("player_id", player_id), ("game_id", game_id)]),
    )
}

/// A `QuizWasCreated` event.
#[must_use]
pub fn quiz_created(quiz_id: &str, quiz_title: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        types::QUIZ_WAS_CREATED,
        at,
        payload([("quiz_id", quiz_id), ("quiz_title", quiz_title)]),
    )
}

/// A `GameWasOpened` event.
#[must_use]
pub fn game_opened(game_id: &str, quiz_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        types::GAME_WAS_OPENED,
        at,
        payload([("game_id", game_id), ("quiz_id", quiz_id)]),
    )
}

/// A `GameWasStarted` event.
#[must_use]
pub fn game_started(game_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(types::GAME_WAS_STARTED, at, payload([("game_id", game_id)]))
}

/// A `GameWasCancelled` event.
#[must_use]
pub fn game_cancelled(game_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        types::GAME_WAS_CANCELLED,
        at,
        payload([("game_id", game_id)]),
    )
}

/// A `GameWasFinished` event.
#[must_use]
pub fn game_finished(game_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(types::GAME_WAS_FINISHED, at, payload([("game_id", game_id)]))
}

/// A `QuestionWasAsked` event.
#[must_use]
pub fn question_asked(question_id: &str, at: DateTime<Utc>) -> Event {
    Event::new(
        types::QUESTION_WAS_ASKED,
        at,
        payload([("question_id", question_id)]),
    )
}

/// An `AnswerWasGiven` event.
#[must_use]
pub fn answer_given(
    game_id: &str,
    player_id: &str,
    question_id: &str,
    at: DateTime<Utc>,
) -> Event {
    Event::new(
        types::ANSWER_WAS_GIVEN,
        at,
        payload([
            ("game_id", game_id),
            ("player_id", player_id),
            ("question_id", question_id),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_carry_their_required_fields() {
        let event = answer_given("g-1", "p-1", "q-1", ts(10));
        assert!(event.is(types::ANSWER_WAS_GIVEN));
        assert_eq!(event.game_id().unwrap().as_str(), "g-1");
        assert_eq!(event.player_id().unwrap().as_str(), "p-1");
        assert_eq!(event.question_id().unwrap().as_str(), "q-1");
        assert_eq!(event.timestamp(), base_time() + chrono::Duration::seconds(10));
    }
}
