//! Domain events and tagged identifier types.
//!
//! # Overview
//!
//! An [`Event`] is an immutable fact from the quiz-game platform's log:
//! a type tag, a timestamp, and a payload mapping field names to string
//! values whose schema depends on the type tag. Events are created once
//! per log record by the source adapter, handed to each projection by
//! shared reference, and dropped after fan-out — nothing ever mutates one.
//!
//! # Identifier Types
//!
//! Player, game, quiz and question ids are distinct newtypes rather than
//! interchangeable raw strings, so an id from one domain cannot be used
//! where another is expected. The typed accessors on [`Event`] wrap payload
//! fields into the right identifier at the boundary.
//!
//! # Example
//!
//! ```
//! use quizlog_core::event::{Event, types};
//! use chrono::Utc;
//! use std::collections::HashMap;
//!
//! let payload = HashMap::from([("game_id".to_string(), "g-1".to_string())]);
//! let event = Event::new(types::GAME_WAS_STARTED, Utc::now(), payload);
//!
//! assert!(event.is("gamewasstarted")); // type tags match case-insensitively
//! assert_eq!(event.game_id().unwrap().as_str(), "g-1");
//! ```

use crate::error::{ReplayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical type tags for the quiz-game event log.
///
/// Comparison against these tags is case-insensitive (see [`Event::is`]),
/// but these constants are the canonical spelling used when constructing
/// events and reporting errors.
pub mod types {
    /// A player registered on the platform.
    pub const PLAYER_HAS_REGISTERED: &str = "PlayerHasRegistered";
    /// A registered player joined a game.
    pub const PLAYER_JOINED_GAME: &str = "PlayerJoinedGame";
    /// A quiz was authored.
    pub const QUIZ_WAS_CREATED: &str = "QuizWasCreated";
    /// A game was opened for a quiz.
    pub const GAME_WAS_OPENED: &str = "GameWasOpened";
    /// An opened game started playing.
    pub const GAME_WAS_STARTED: &str = "GameWasStarted";
    /// An opened game was cancelled before finishing.
    pub const GAME_WAS_CANCELLED: &str = "GameWasCancelled";
    /// A started game ran to completion.
    pub const GAME_WAS_FINISHED: &str = "GameWasFinished";
    /// A question was asked in a game.
    pub const QUESTION_WAS_ASKED: &str = "QuestionWasAsked";
    /// A player answered a question in a game.
    pub const ANSWER_WAS_GIVEN: &str = "AnswerWasGiven";
}

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier! {
    /// Identifies a registered player.
    PlayerId
}

identifier! {
    /// Identifies a game opened for a quiz.
    GameId
}

identifier! {
    /// Identifies an authored quiz.
    QuizId
}

identifier! {
    /// Identifies an asked question. Question ids are unique across games.
    QuestionId
}

/// Required payload fields per event type, matched case-insensitively.
///
/// Unknown tags have no required fields: the log's schema only constrains
/// the types it defines.
fn required_fields(event_type: &str) -> &'static [&'static str] {
    let eq = |tag: &str| event_type.eq_ignore_ascii_case(tag);
    if eq(types::PLAYER_HAS_REGISTERED) {
        &["player_id", "first_name", "last_name"]
    } else if eq(types::PLAYER_JOINED_GAME) {
        &["player_id", "game_id"]
    } else if eq(types::QUIZ_WAS_CREATED) {
        &["quiz_id", "quiz_title"]
    } else if eq(types::GAME_WAS_OPENED) {
        &["game_id", "quiz_id"]
    } else if eq(types::GAME_WAS_STARTED)
        || eq(types::GAME_WAS_CANCELLED)
        || eq(types::GAME_WAS_FINISHED)
    {
        &["game_id"]
    } else if eq(types::QUESTION_WAS_ASKED) {
        &["question_id"]
    } else if eq(types::ANSWER_WAS_GIVEN) {
        &["game_id", "player_id", "question_id"]
    } else {
        &[]
    }
}

/// An immutable domain event from the quiz-game log.
///
/// Events are facts about things that happened in the past: they carry a
/// type tag, the instant they occurred, and a payload whose schema is
/// determined by the tag. Projections read events, never write them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    event_type: String,
    timestamp: DateTime<Utc>,
    payload: HashMap<String, String>,
}

impl Event {
    /// Create a new event.
    ///
    /// # Example
    ///
    /// ```
    /// use quizlog_core::event::{Event, types};
    /// use chrono::Utc;
    /// use std::collections::HashMap;
    ///
    /// let event = Event::new(
    ///     types::QUESTION_WAS_ASKED,
    ///     Utc::now(),
    ///     HashMap::from([("question_id".to_string(), "q-1".to_string())]),
    /// );
    /// assert_eq!(event.event_type(), "QuestionWasAsked");
    /// ```
    #[must_use]
    pub fn new(
        event_type: impl Into<String>,
        timestamp: DateTime<Utc>,
        payload: HashMap<String, String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp,
            payload,
        }
    }

    /// The event's type tag, as spelled in the log.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The instant the event occurred.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this event's type tag matches `type_name`, ignoring ASCII
    /// case.
    ///
    /// Case-insensitive comparison is part of the log's contract: producers
    /// have historically varied the casing of type tags.
    #[must_use]
    pub fn is(&self, type_name: &str) -> bool {
        self.event_type.eq_ignore_ascii_case(type_name)
    }

    /// A required payload field.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] if the field is absent,
    /// naming the event type and the missing field. Schema violations are
    /// fatal to the replay.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.payload
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ReplayError::SchemaViolation {
                event_type: self.event_type.clone(),
                field: name.to_string(),
            })
    }

    /// Check that the payload carries every field this event's type
    /// requires.
    ///
    /// A malformed event makes all derived state suspect, so the replay
    /// engine validates every event before fan-out — including types no
    /// projection reads, such as `GameWasCancelled` and `GameWasFinished`.
    /// Events with unknown type tags carry no schema and always pass.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] naming the first missing
    /// field.
    pub fn validate(&self) -> Result<()> {
        for field in required_fields(&self.event_type) {
            self.field(field)?;
        }
        Ok(())
    }

    /// The `player_id` payload field as a typed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] if the field is absent.
    pub fn player_id(&self) -> Result<PlayerId> {
        Ok(PlayerId::new(self.field("player_id")?))
    }

    /// The `game_id` payload field as a typed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] if the field is absent.
    pub fn game_id(&self) -> Result<GameId> {
        Ok(GameId::new(self.field("game_id")?))
    }

    /// The `quiz_id` payload field as a typed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] if the field is absent.
    pub fn quiz_id(&self) -> Result<QuizId> {
        Ok(QuizId::new(self.field("quiz_id")?))
    }

    /// The `question_id` payload field as a typed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::SchemaViolation`] if the field is absent.
    pub fn question_id(&self) -> Result<QuestionId> {
        Ok(QuestionId::new(self.field("question_id")?))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} ({} payload fields)",
            self.event_type,
            self.timestamp.to_rfc3339(),
            self.payload.len()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test assertions panic on failure
mod tests {
    use super::*;

    fn registration() -> Event {
        Event::new(
            types::PLAYER_HAS_REGISTERED,
            Utc::now(),
            HashMap::from([
                ("player_id".to_string(), "p-1".to_string()),
                ("first_name".to_string(), "Ada".to_string()),
                ("last_name".to_string(), "Lovelace".to_string()),
            ]),
        )
    }

    #[test]
    fn type_matching_is_case_insensitive() {
        let event = registration();
        assert!(event.is("PlayerHasRegistered"));
        assert!(event.is("playerhasregistered"));
        assert!(event.is("PLAYERHASREGISTERED"));
        assert!(!event.is("PlayerJoinedGame"));
    }

    #[test]
    fn field_access_returns_payload_values() {
        let event = registration();
        assert_eq!(event.field("first_name").unwrap(), "Ada");
        assert_eq!(event.player_id().unwrap(), PlayerId::new("p-1"));
    }

    #[test]
    fn missing_field_is_a_schema_violation() {
        let event = registration();
        let err = event.field("game_id").unwrap_err();
        match err {
            ReplayError::SchemaViolation { event_type, field } => {
                assert_eq!(event_type, "PlayerHasRegistered");
                assert_eq!(field, "game_id");
            },
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_a_complete_payload() {
        registration().validate().unwrap();
    }

    #[test]
    fn validate_rejects_types_with_missing_fields_even_unconsumed_ones() {
        // GameWasFinished is read by no projection, but its schema still
        // requires game_id.
        let event = Event::new(types::GAME_WAS_FINISHED, Utc::now(), HashMap::new());
        let err = event.validate().unwrap_err();
        match err {
            ReplayError::SchemaViolation { event_type, field } => {
                assert_eq!(event_type, "GameWasFinished");
                assert_eq!(field, "game_id");
            },
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn validate_matches_type_tags_case_insensitively() {
        let event = Event::new("gamewascancelled", Utc::now(), HashMap::new());
        assert!(event.validate().is_err());
    }

    #[test]
    fn validate_passes_unknown_event_types() {
        let event = Event::new("SomethingNew", Utc::now(), HashMap::new());
        event.validate().unwrap();
    }

    #[test]
    fn identifiers_are_distinct_types() {
        // Compile-time property; this just exercises construction and display.
        let player = PlayerId::new("p-1");
        let game = GameId::new("p-1");
        assert_eq!(player.as_str(), game.as_str());
        assert_eq!(player.to_string(), "p-1");
    }
}
