//! Quiz popularity ranking via a three-stage indirect join.
//!
//! A quiz's play count is never carried on a single event; it has to be
//! resolved across three event types:
//!
//! 1. `QuizWasCreated` names the quiz and its title.
//! 2. `GameWasOpened` ties a game id to a quiz id.
//! 3. `GameWasStarted` names only the game id; the quiz to credit is
//!    resolved through the stage-2 mapping.

use quizlog_core::Result;
use quizlog_core::event::{Event, GameId, QuizId, types};
use quizlog_core::projection::Projection;
use std::collections::HashMap;

/// How many quizzes the rendered ranking includes.
const TOP_N: usize = 10;

/// Ranks quizzes by how many of their games were started.
///
/// Renders the top ten quizzes by play count, descending, ties broken by
/// the order the quizzes were first created. A `GameWasStarted` whose game
/// or quiz cannot be resolved is ignored rather than fatal: games opened
/// for never-created quizzes exist in older logs and carry no ranking
/// signal.
#[derive(Debug, Default)]
pub struct QuizPopularityRanking {
    titles: HashMap<QuizId, String>,
    plays: HashMap<QuizId, u64>,
    games: HashMap<GameId, QuizId>,
    first_seen: Vec<QuizId>,
}

impl QuizPopularityRanking {
    /// Create an empty ranking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total started games credited to a known quiz.
    ///
    /// At most the number of `GameWasStarted` events consumed, with
    /// equality when every started game's quiz was created before its
    /// game was opened.
    #[must_use]
    pub fn total_plays(&self) -> u64 {
        self.plays.values().sum()
    }

    fn quiz_created(&mut self, event: &Event) -> Result<()> {
        let quiz_id = event.quiz_id()?;
        let title = event.field("quiz_title")?;
        if !self.titles.contains_key(&quiz_id) {
            self.first_seen.push(quiz_id.clone());
        }
        self.titles.insert(quiz_id.clone(), title.to_string());
        self.plays.entry(quiz_id).or_insert(0);
        Ok(())
    }

    fn game_opened(&mut self, event: &Event) -> Result<()> {
        self.games.insert(event.game_id()?, event.quiz_id()?);
        Ok(())
    }

    fn game_started(&mut self, event: &Event) -> Result<()> {
        let game_id = event.game_id()?;
        let Some(quiz_id) = self.games.get(&game_id) else {
            tracing::debug!(game = %game_id, "Started game was never opened, ignoring");
            return Ok(());
        };
        if let Some(count) = self.plays.get_mut(quiz_id) {
            *count += 1;
        } else {
            tracing::debug!(quiz = %quiz_id, "Started game's quiz was never created, ignoring");
        }
        Ok(())
    }
}

impl Projection for QuizPopularityRanking {
    fn name(&self) -> &str {
        "quiz-popularity"
    }

    fn consume(&mut self, event: &Event) -> Result<()> {
        if event.is(types::QUIZ_WAS_CREATED) {
            self.quiz_created(event)
        } else if event.is(types::GAME_WAS_OPENED) {
            self.game_opened(event)
        } else if event.is(types::GAME_WAS_STARTED) {
            self.game_started(event)
        } else {
            Ok(())
        }
    }

    fn render(&self) -> String {
        // Walking first_seen keeps ties in creation order under the stable
        // sort below.
        let mut ranked: Vec<(&QuizId, u64)> = self
            .first_seen
            .iter()
            .map(|quiz_id| (quiz_id, self.plays.get(quiz_id).copied().unwrap_or(0)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(TOP_N)
            .filter_map(|(quiz_id, count)| {
                self.titles
                    .get(quiz_id)
                    .map(|title| format!("{title} ({quiz_id}): {count}"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
