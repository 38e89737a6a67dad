use rand::seq::SliceRandom;

use crate::api::words::WordItem;
use crate::options::{build_option_set, OptionEntry};
use crate::session::{AnswerLog, GameKind, GameSummary, Outcome};

/// Questions per audio-call session (one server page).
pub const QUESTION_COUNT: usize = 20;

/// Per-question phase of the audio-call machine.
///
/// `AwaitingAnswer` accepts a selection or a skip; `Answered` accepts
/// only an advance; `Finished` is terminal until play-again replaces the
/// whole session value.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingAnswer,
    /// `selected` is the chosen option slot; `None` means the question
    /// was skipped via Enter.
    Answered { selected: Option<usize> },
    Finished,
}

#[derive(Debug)]
pub struct AudioCallGame {
    pub group: u8,
    pub page: u8,
    words: Vec<WordItem>,
    active_index: usize,
    pub options: Vec<OptionEntry>,
    pub phase: Phase,
    pub log: AnswerLog,
}

impl AudioCallGame {
    pub fn new(mut words: Vec<WordItem>, group: u8, page: u8) -> Self {
        words.shuffle(&mut rand::thread_rng());
        words.truncate(QUESTION_COUNT);

        let (options, phase) = match words.first() {
            Some(first) => (build_option_set(first, &words), Phase::AwaitingAnswer),
            None => (Vec::new(), Phase::Finished),
        };

        Self {
            group,
            page,
            words,
            active_index: 0,
            options,
            phase,
            log: AnswerLog::default(),
        }
    }

    pub fn active_word(&self) -> Option<&WordItem> {
        self.words.get(self.active_index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    /// Option slot holding the true answer, for result highlighting.
    pub fn correct_slot(&self) -> Option<usize> {
        let active = self.active_word()?;
        self.options.iter().position(|opt| opt.id == active.id)
    }

    /// Judge the option at `slot` against the active word. Ignored
    /// outside `AwaitingAnswer` (disabled buttons once answered).
    pub fn choose(&mut self, slot: usize) -> Option<Outcome> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let option = self.options.get(slot)?;
        let active = self.words.get(self.active_index)?.clone();
        let outcome = if option.id == active.id {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.log.record(active, outcome);
        self.phase = Phase::Answered {
            selected: Some(slot),
        };
        Some(outcome)
    }

    /// Skip the current question: forced incorrect, answer revealed.
    /// A distinct transition from normal submission.
    pub fn skip(&mut self) -> Option<Outcome> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let active = self.words.get(self.active_index)?.clone();
        self.log.record(active, Outcome::Incorrect);
        self.phase = Phase::Answered { selected: None };
        Some(Outcome::Incorrect)
    }

    /// Move past an answered question, finishing the session on the
    /// last word. Ignored while a question is still open.
    pub fn advance(&mut self) {
        if !matches!(self.phase, Phase::Answered { .. }) {
            return;
        }
        if self.active_index + 1 == self.words.len() {
            self.phase = Phase::Finished;
        } else {
            self.active_index += 1;
            self.options = build_option_set(&self.words[self.active_index], &self.words);
            self.phase = Phase::AwaitingAnswer;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_log(GameKind::AudioCall, self.group, &self.log)
    }
}
