use rand::seq::SliceRandom;

use crate::api::words::WordItem;
use crate::options::{sprint_pair, SprintPair};
use crate::session::{AnswerLog, GameKind, GameSummary, Outcome};
use crate::TICK_RATE_MS;

/// Countdown length in seconds.
pub const SPRINT_SECS: f64 = 60.0;
/// Second termination guard: answers judged in one session.
pub const ANSWER_CAP: usize = 60;
pub const POINTS_PER_CORRECT: u32 = 10;

/// The player's claim about the displayed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// Right arrow: "the shown translation matches".
    Match,
    /// Left arrow: "the shown translation does not match".
    NoMatch,
}

/// Sprint session: a countdown and an answer cap race as independent
/// termination guards, both re-checked after every tick and every
/// judged answer. Starting a new session replaces the whole value, so
/// no stale countdown survives a restart.
#[derive(Debug)]
pub struct SprintGame {
    pub group: u8,
    words: Vec<WordItem>,
    index: usize,
    pub current: Option<SprintPair>,
    seconds_remaining: f64,
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub log: AnswerLog,
    pub last_outcome: Option<Outcome>,
    finished: bool,
}

impl SprintGame {
    pub fn new(words: Vec<WordItem>, group: u8) -> Self {
        Self::with_secs(words, group, SPRINT_SECS)
    }

    pub fn with_secs(mut words: Vec<WordItem>, group: u8, secs: f64) -> Self {
        words.shuffle(&mut rand::thread_rng());
        let current = words.first().map(|w| sprint_pair(w, &words));
        let mut game = Self {
            group,
            words,
            index: 0,
            current,
            seconds_remaining: secs,
            score: 0,
            streak: 0,
            best_streak: 0,
            log: AnswerLog::default(),
            last_outcome: None,
            finished: false,
        };
        game.check_guards();
        game
    }

    pub fn seconds_remaining(&self) -> f64 {
        self.seconds_remaining.max(0.0)
    }

    pub fn answered(&self) -> usize {
        self.log.judged()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// One runner tick. The countdown is wall-clock only; judging
    /// answers neither speeds it up nor slows it down.
    pub fn on_tick(&mut self) {
        if self.finished {
            return;
        }
        self.seconds_remaining -= TICK_RATE_MS as f64 / 1000.0;
        self.check_guards();
    }

    /// Judge the player's claim against the current pair, advance to a
    /// fresh pair, then re-evaluate the termination guards.
    pub fn claim(&mut self, claim: Claim) -> Option<Outcome> {
        if self.finished {
            return None;
        }
        let pair = self.current.take()?;
        let correct = match claim {
            Claim::Match => pair.is_match,
            Claim::NoMatch => !pair.is_match,
        };
        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        match outcome {
            Outcome::Correct => {
                self.score += POINTS_PER_CORRECT;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
            Outcome::Incorrect => {
                self.streak = 0;
            }
        }

        self.log.record(pair.word, outcome);
        self.last_outcome = Some(outcome);
        self.index += 1;
        self.current = self.words.get(self.index).map(|w| sprint_pair(w, &self.words));
        self.check_guards();
        Some(outcome)
    }

    /// Both termination guards, plus running out of words, evaluated in
    /// one place after every state transition.
    fn check_guards(&mut self) {
        if self.seconds_remaining <= 0.0
            || self.log.judged() >= ANSWER_CAP
            || self.index >= self.words.len()
        {
            self.finished = true;
            self.current = None;
        }
    }

    pub fn summary(&self) -> GameSummary {
        let mut summary = GameSummary::from_log(GameKind::Sprint, self.group, &self.log);
        summary.score = self.score;
        summary.best_streak = self.best_streak;
        summary
    }
}
