use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::words::WordItem;

/// Multiple-choice width of the audio-call game.
pub const OPTION_COUNT: usize = 5;

/// One selectable answer: the word id plus the displayed translation.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    pub id: String,
    pub word: String,
}

/// Build the option set for one audio-call question: the correct answer
/// exactly once, distinct random distractors from the pool, order
/// shuffled. Draws are bounded by walking a shuffled copy of the pool,
/// so a pool with fewer than `OPTION_COUNT` unique ids yields a shorter
/// set instead of looping.
pub fn build_option_set(active: &WordItem, pool: &[WordItem]) -> Vec<OptionEntry> {
    let mut rng = rand::thread_rng();
    let mut options = vec![OptionEntry {
        id: active.id.clone(),
        word: active.word_translate.clone(),
    }];

    let mut candidates: Vec<&WordItem> = pool.iter().collect();
    candidates.shuffle(&mut rng);

    for item in candidates {
        if options.len() == OPTION_COUNT {
            break;
        }
        if options.iter().any(|opt| opt.id == item.id) {
            continue;
        }
        options.push(OptionEntry {
            id: item.id.clone(),
            word: item.word_translate.clone(),
        });
    }

    options.shuffle(&mut rng);
    options
}

/// One sprint question: a word paired with a claimed translation that is
/// either the true one or a random distractor, on a fair coin.
#[derive(Debug, Clone)]
pub struct SprintPair {
    pub word: WordItem,
    pub shown_translate: String,
    pub is_match: bool,
}

pub fn sprint_pair(word: &WordItem, pool: &[WordItem]) -> SprintPair {
    let mut rng = rand::thread_rng();
    let shown = if pool.is_empty() || rng.gen_bool(0.5) {
        word.word_translate.clone()
    } else {
        let distractor = &pool[rng.gen_range(0..pool.len())];
        distractor.word_translate.clone()
    };
    // A drawn distractor can coincide with the true translation, in which
    // case the pair is a genuine match.
    let is_match = shown == word.word_translate;
    SprintPair {
        word: word.clone(),
        shown_translate: shown,
        is_match,
    }
}
