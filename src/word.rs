//! Five-letter words as fixed-size byte arrays.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

pub const WORD_LENGTH: usize = 5;
pub const ALPHABET_SIZE: usize = 26;

/// A validated, lowercase, five-letter ASCII word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Normalizes `raw` (trimmed, case-insensitive) into a word.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let trimmed = raw.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(EngineError::InvalidGuess(trimmed.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_lowercase();
        }
        Ok(Self(letters))
    }

    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn letter_at(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Occurrences of each letter, indexed by `letter_index`.
    pub fn letter_counts(&self) -> [u8; ALPHABET_SIZE] {
        let mut counts = [0u8; ALPHABET_SIZE];
        for &b in &self.0 {
            counts[letter_index(b)] += 1;
        }
        counts
    }

    pub fn count_of(&self, letter: u8) -> usize {
        self.0.iter().filter(|&&b| b == letter).count()
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    /// Number of letter slots taken by a letter already seen earlier in the word.
    pub fn repeated_letters(&self) -> usize {
        let distinct = self.letter_counts().iter().filter(|&&c| c > 0).count();
        WORD_LENGTH - distinct
    }

    /// Letters in sorted order; equal for anagrams.
    pub fn sorted_letters(&self) -> [u8; WORD_LENGTH] {
        let mut letters = self.0;
        letters.sort_unstable();
        letters
    }

    pub fn to_uppercase(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl FromStr for Word {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// Maps a lowercase ASCII letter to `0..26`.
pub fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

pub fn index_letter(index: usize) -> u8 {
    b'a' + index as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let word = Word::parse("  CrAnE ").unwrap();
        assert_eq!(word.to_string(), "crane");
        assert_eq!(word.to_uppercase(), "CRANE");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for raw in ["", "cran", "cranes", "cr4ne", "cr ne", "créme"] {
            assert!(
                matches!(Word::parse(raw), Err(EngineError::InvalidGuess(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_letter_counts_and_repeats() {
        let word: Word = "sassy".parse().unwrap();
        assert_eq!(word.count_of(b's'), 3);
        assert_eq!(word.letter_counts()[letter_index(b'a')], 1);
        assert_eq!(word.repeated_letters(), 2);
        assert!(word.contains(b'y'));
        assert!(!word.contains(b'e'));

        let crane: Word = "crane".parse().unwrap();
        assert_eq!(crane.repeated_letters(), 0);
    }

    #[test]
    fn test_sorted_letters_match_for_anagrams() {
        let a: Word = "tares".parse().unwrap();
        let b: Word = "stare".parse().unwrap();
        assert_eq!(a.sorted_letters(), b.sorted_letters());
        assert_ne!(a, b);
    }
}
