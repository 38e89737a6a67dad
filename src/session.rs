use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::api::words::WordItem;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    /// Mastery-counter delta reported to the remote progress store.
    pub fn progress_delta(self) -> i32 {
        match self {
            Outcome::Correct => 1,
            Outcome::Incorrect => -1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum GameKind {
    #[strum(serialize = "audio-call")]
    AudioCall,
    #[strum(serialize = "sprint")]
    Sprint,
}

/// Judged answers of one session, owned by the session value.
/// Invariant: `judged()` equals the number of questions answered so far
/// and never exceeds the session word count.
#[derive(Debug, Clone, Default)]
pub struct AnswerLog {
    pub correct: Vec<WordItem>,
    pub incorrect: Vec<WordItem>,
}

impl AnswerLog {
    pub fn record(&mut self, word: WordItem, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct.push(word),
            Outcome::Incorrect => self.incorrect.push(word),
        }
    }

    pub fn judged(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }
}

/// Result-screen payload, also what gets persisted to local history.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub played_at: DateTime<Local>,
    pub game: GameKind,
    pub group: u8,
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub score: u32,
    pub best_streak: u32,
}

impl GameSummary {
    pub fn from_log(game: GameKind, group: u8, log: &AnswerLog) -> Self {
        Self {
            played_at: Local::now(),
            game,
            group,
            total: log.judged(),
            correct: log.correct.len(),
            wrong: log.incorrect.len(),
            score: 0,
            best_streak: 0,
        }
    }
}
