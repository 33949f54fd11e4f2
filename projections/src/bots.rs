//! Bot player detection via cross-event time correlation.
//!
//! # Heuristic
//!
//! A player is flagged as a bot when their total recorded answer latency,
//! summed over every question they answered across every game they joined,
//! is exactly zero: every answer was logged at the same instant its
//! question was asked, which is implausible for a human and signals an
//! automated client.
//!
//! # Known Limitation
//!
//! A player who registers but never joins a game or never answers sums to
//! zero by vacuity and is indistinguishable from a true bot under this
//! rule. That ambiguity is inherited from the platform's reporting rules
//! and is deliberately preserved here rather than patched (say, by
//! requiring at least one answer).

use chrono::{DateTime, Utc};
use quizlog_core::error::{ReplayError, Result};
use quizlog_core::event::{Event, GameId, PlayerId, QuestionId, types};
use quizlog_core::projection::Projection;
use std::collections::HashMap;

/// Per-player state: identity plus cumulative answer latency per game.
#[derive(Debug)]
struct Player {
    first_name: String,
    last_name: String,
    /// Cumulative answer latency in whole seconds, keyed by game.
    /// An entry is created (at zero) when the player joins the game.
    answer_seconds: HashMap<GameId, i64>,
}

impl Player {
    fn total_seconds(&self) -> i64 {
        self.answer_seconds.values().sum()
    }
}

/// Flags players whose summed answer latency across all games is zero.
///
/// Correlates four event types: registrations create players, joins open
/// a per-game latency accumulator, asked questions record their ask
/// instant, and answers add `answer time − ask time` to the answering
/// player's accumulator for the referenced game. Question ids are unique
/// across games, so ask instants are tracked globally; re-asking a
/// question overwrites its instant (latest ask wins).
///
/// Any event referencing a player, question or joined game that no
/// earlier event created is an
/// [`OrderViolation`](ReplayError::OrderViolation) and aborts the replay.
#[derive(Debug, Default)]
pub struct BotPlayerDetector {
    players: HashMap<PlayerId, Player>,
    /// Registration order; deduplicated, drives stable report order.
    registration_order: Vec<PlayerId>,
    ask_times: HashMap<QuestionId, DateTime<Utc>>,
}

impl BotPlayerDetector {
    /// Create a detector with no known players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of players currently summing to zero, in registration order.
    #[must_use]
    pub fn flagged_players(&self) -> Vec<&PlayerId> {
        self.registration_order
            .iter()
            .filter(|id| {
                self.players
                    .get(*id)
                    .is_some_and(|player| player.total_seconds() == 0)
            })
            .collect()
    }

    fn order_violation(event: &Event, detail: String) -> ReplayError {
        ReplayError::OrderViolation {
            event_type: event.event_type().to_string(),
            detail,
        }
    }

    fn player_registered(&mut self, event: &Event) -> Result<()> {
        let player_id = event.player_id()?;
        let first_name = event.field("first_name")?.to_string();
        let last_name = event.field("last_name")?.to_string();

        // First registration wins; the order list stays deduplicated so a
        // player can never be reported twice.
        if !self.players.contains_key(&player_id) {
            self.registration_order.push(player_id.clone());
            self.players.insert(
                player_id,
                Player {
                    first_name,
                    last_name,
                    answer_seconds: HashMap::new(),
                },
            );
        }
        Ok(())
    }

    fn player_joined(&mut self, event: &Event) -> Result<()> {
        let player_id = event.player_id()?;
        let game_id = event.game_id()?;
        let player = self.players.get_mut(&player_id).ok_or_else(|| {
            Self::order_violation(
                event,
                format!("player '{player_id}' joined game '{game_id}' before registering"),
            )
        })?;
        // Idempotent on rejoin: the accumulator survives.
        player.answer_seconds.entry(game_id).or_insert(0);
        Ok(())
    }

    fn question_asked(&mut self, event: &Event) -> Result<()> {
        self.ask_times.insert(event.question_id()?, event.timestamp());
        Ok(())
    }

    fn answer_given(&mut self, event: &Event) -> Result<()> {
        let question_id = event.question_id()?;
        let player_id = event.player_id()?;
        let game_id = event.game_id()?;

        let asked_at = *self.ask_times.get(&question_id).ok_or_else(|| {
            Self::order_violation(event, format!("question '{question_id}' was never asked"))
        })?;

        let elapsed = (event.timestamp() - asked_at).num_seconds();
        if elapsed < 0 {
            return Err(Self::order_violation(
                event,
                format!(
                    "answer to question '{question_id}' is timestamped {}s before its ask",
                    -elapsed
                ),
            ));
        }

        let player = self.players.get_mut(&player_id).ok_or_else(|| {
            Self::order_violation(
                event,
                format!("player '{player_id}' answered before registering"),
            )
        })?;
        let seconds = player.answer_seconds.get_mut(&game_id).ok_or_else(|| {
            Self::order_violation(
                event,
                format!("player '{player_id}' answered in game '{game_id}' without joining it"),
            )
        })?;
        *seconds += elapsed;
        Ok(())
    }
}

impl Projection for BotPlayerDetector {
    fn name(&self) -> &str {
        "bot-players"
    }

    fn consume(&mut self, event: &Event) -> Result<()> {
        if event.is(types::PLAYER_HAS_REGISTERED) {
            self.player_registered(event)
        } else if event.is(types::PLAYER_JOINED_GAME) {
            self.player_joined(event)
        } else if event.is(types::QUESTION_WAS_ASKED) {
            self.question_asked(event)
        } else if event.is(types::ANSWER_WAS_GIVEN) {
            self.answer_given(event)
        } else {
            Ok(())
        }
    }

    fn render(&self) -> String {
        self.registration_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|player| player.total_seconds() == 0)
            .map(|player| format!("{} {}", player.last_name, player.first_name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
