//! Per-round feedback: which guessed letters were correct, misplaced or absent.

use std::fmt;

use crate::error::EngineError;
use crate::word::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};

/// The game's judgment of a single guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterJudgment {
    /// Letter not in the word (or every occurrence already accounted for)
    Absent,
    /// Letter in the word, but not at this position
    Misplaced,
    /// Letter at exactly this position
    Correct,
}

impl LetterJudgment {
    /// Parse a feedback symbol: `w` (wrong), `m` (misplaced) or `c` (correct).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Absent),
            'm' => Some(Self::Misplaced),
            'c' => Some(Self::Correct),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Absent => 'w',
            Self::Misplaced => 'm',
            Self::Correct => 'c',
        }
    }

    /// True for judgments proving the letter occurs in the word.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Misplaced | Self::Correct)
    }
}

/// A guess and the five judgments the game returned for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundFeedback {
    guess: Word,
    judgments: [LetterJudgment; WORD_LENGTH],
}

impl RoundFeedback {
    pub fn new(guess: Word, judgments: [LetterJudgment; WORD_LENGTH]) -> Self {
        Self { guess, judgments }
    }

    /// Validates a raw guess and a raw `w`/`m`/`c` descriptor.
    ///
    /// The guess is checked first, so a bad guess is reported even when the
    /// descriptor is also malformed.
    pub fn parse(guess: &str, descriptor: &str) -> Result<Self, EngineError> {
        let guess = Word::parse(guess)?;
        Ok(Self::new(guess, parse_judgments(descriptor)?))
    }

    pub fn guess(&self) -> Word {
        self.guess
    }

    pub fn judgments(&self) -> &[LetterJudgment; WORD_LENGTH] {
        &self.judgments
    }

    /// Pairs of (position, letter, judgment).
    pub fn positions(&self) -> impl Iterator<Item = (usize, u8, LetterJudgment)> + '_ {
        self.guess
            .letters()
            .iter()
            .zip(self.judgments.iter())
            .enumerate()
            .map(|(i, (&letter, &judgment))| (i, letter, judgment))
    }

    pub fn is_win(&self) -> bool {
        self.judgments.iter().all(|&j| j == LetterJudgment::Correct)
    }

    pub fn descriptor(&self) -> String {
        self.judgments.iter().map(|j| j.to_char()).collect()
    }
}

impl fmt::Display for RoundFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.guess, self.descriptor())
    }
}

/// Parses exactly five `w`/`m`/`c` symbols, ignoring case and surrounding whitespace.
pub fn parse_judgments(descriptor: &str) -> Result<[LetterJudgment; WORD_LENGTH], EngineError> {
    let trimmed = descriptor.trim();
    let invalid = || EngineError::InvalidFeedback(trimmed.to_string());

    if trimmed.chars().count() != WORD_LENGTH {
        return Err(invalid());
    }
    let mut judgments = [LetterJudgment::Absent; WORD_LENGTH];
    for (slot, c) in judgments.iter_mut().zip(trimmed.chars()) {
        *slot = LetterJudgment::from_char(c).ok_or_else(invalid)?;
    }
    Ok(judgments)
}

/// The feedback the game itself gives for `guess` when the answer is `target`.
///
/// Exact matches are marked first; remaining guess letters are then marked
/// misplaced left to right while unmatched copies remain in the target.
pub fn grade(guess: Word, target: Word) -> RoundFeedback {
    let mut judgments = [LetterJudgment::Absent; WORD_LENGTH];
    let mut unmatched = [0u8; ALPHABET_SIZE];

    for i in 0..WORD_LENGTH {
        if guess.letter_at(i) == target.letter_at(i) {
            judgments[i] = LetterJudgment::Correct;
        } else {
            unmatched[letter_index(target.letter_at(i))] += 1;
        }
    }

    for i in 0..WORD_LENGTH {
        if judgments[i] == LetterJudgment::Correct {
            continue;
        }
        let idx = letter_index(guess.letter_at(i));
        if unmatched[idx] > 0 {
            judgments[i] = LetterJudgment::Misplaced;
            unmatched[idx] -= 1;
        }
    }

    RoundFeedback::new(guess, judgments)
}
