use std::collections::HashSet;

use crate::constraints::ConstraintSet;
use crate::error::EngineError;
use crate::word::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};
use crate::wordbank::WordList;

/// Every word in `words` that satisfies `constraints`, in word-list order.
pub fn filter_candidates(words: &WordList, constraints: &ConstraintSet) -> Vec<Word> {
    let candidates: Vec<Word> = words
        .into_iter()
        .filter(|word| constraints.allows(word))
        .copied()
        .collect();
    log::debug!("{} of {} words remain", candidates.len(), words.len());
    candidates
}

/// Heuristic knobs for [`rank_candidates`]. Tunable, not a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWeights {
    /// Multiplier for how many candidates contain each distinct letter.
    pub presence: u64,
    /// Multiplier for how many candidates hold the same letter at the same position.
    pub positional: u64,
    /// Percent of the score removed per repeated letter.
    pub repeat_penalty_pct: u64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            presence: 2,
            positional: 1,
            repeat_penalty_pct: 20,
        }
    }
}

/// Letter statistics over a set of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterFrequencies {
    /// `presence[l]`: words containing letter `l` at least once.
    pub presence: [usize; ALPHABET_SIZE],
    /// `positional[i][l]`: words with letter `l` at position `i`.
    pub positional: [[usize; ALPHABET_SIZE]; WORD_LENGTH],
}

pub fn build_freq_chart(words: &[Word]) -> LetterFrequencies {
    let mut freq = LetterFrequencies {
        presence: [0; ALPHABET_SIZE],
        positional: [[0; ALPHABET_SIZE]; WORD_LENGTH],
    };
    for word in words {
        for (i, &letter) in word.letters().iter().enumerate() {
            freq.positional[i][letter_index(letter)] += 1;
        }
        for (idx, &count) in word.letter_counts().iter().enumerate() {
            if count > 0 {
                freq.presence[idx] += 1;
            }
        }
    }
    freq
}

pub fn score_word(word: &Word, freq: &LetterFrequencies, weights: &RankWeights) -> u64 {
    let presence: u64 = word
        .letter_counts()
        .iter()
        .zip(freq.presence.iter())
        .filter(|&(&count, _)| count > 0)
        .map(|(_, &seen)| seen as u64)
        .sum();
    let positional: u64 = word
        .letters()
        .iter()
        .enumerate()
        .map(|(i, &letter)| freq.positional[i][letter_index(letter)] as u64)
        .sum();
    let raw = presence * weights.presence + positional * weights.positional;
    let penalty = (word.repeated_letters() as u64 * weights.repeat_penalty_pct).min(100);
    raw * (100 - penalty) / 100
}

/// Candidates sorted best first. Equal scores keep their incoming order.
pub fn score_candidates(candidates: &[Word], weights: &RankWeights) -> Vec<(Word, u64)> {
    let freq = build_freq_chart(candidates);
    let mut scored: Vec<(Word, u64)> = candidates
        .iter()
        .map(|&word| (word, score_word(&word, &freq, weights)))
        .collect();
    // sort_by is stable, so ties stay in word-list order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}

/// Picks up to `limit` suggestions from `candidates`.
///
/// Anagrams of an already chosen suggestion are passed over while other
/// words remain, then used to fill any leftover slots. A `limit` of zero
/// still yields one suggestion.
pub fn rank_candidates(
    candidates: &[Word],
    limit: usize,
    weights: &RankWeights,
) -> Result<Vec<Word>, EngineError> {
    match candidates {
        [] => return Err(EngineError::Exhausted),
        [only] => return Ok(vec![*only]),
        _ => {}
    }

    let limit = limit.max(1);
    let scored = score_candidates(candidates, weights);
    let mut picked: Vec<Word> = Vec::with_capacity(limit);
    let mut seen_letters = HashSet::new();
    let mut deferred = Vec::new();

    for &(word, _) in &scored {
        if picked.len() == limit {
            break;
        }
        if seen_letters.insert(word.sorted_letters()) {
            picked.push(word);
        } else {
            deferred.push(word);
        }
    }
    for word in deferred {
        if picked.len() == limit {
            break;
        }
        picked.push(word);
    }

    log::debug!(
        "Top suggestions: {}",
        picked.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    );
    Ok(picked)
}
