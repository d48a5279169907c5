//! Accumulated knowledge from every round of feedback.
//!
//! A `ConstraintSet` only ever tightens: folding in a round can add required,
//! forbidden or absent letters and raise minimum counts, never undo them.
//! Folding the same round twice is a no-op.

use std::fmt;

use crate::feedback::{LetterJudgment, RoundFeedback};
use crate::word::{ALPHABET_SIZE, WORD_LENGTH, Word, index_letter, letter_index};

/// A set of lowercase letters stored as a 26-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, letter: u8) {
        self.0 |= 1 << letter_index(letter);
    }

    pub fn contains(self, letter: u8) -> bool {
        self.0 & (1 << letter_index(letter)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Letters in alphabetical order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..ALPHABET_SIZE)
            .filter(move |&i| self.0 & (1 << i) != 0)
            .map(index_letter)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Letters judged correct at each position. More than one means the
    /// feedback contradicts itself and nothing can match.
    required: [LetterSet; WORD_LENGTH],
    /// Letters judged misplaced or absent at each position.
    forbidden: [LetterSet; WORD_LENGTH],
    /// Subset of `forbidden` that came from misplaced judgments, kept for display.
    misplaced: [LetterSet; WORD_LENGTH],
    min_counts: [u8; ALPHABET_SIZE],
    absent: LetterSet,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a new set with `feedback` folded in.
    #[must_use]
    pub fn fold(&self, feedback: &RoundFeedback) -> Self {
        let mut next = self.clone();
        next.apply(feedback);
        next
    }

    /// In-place variant of [`ConstraintSet::fold`].
    pub fn apply(&mut self, feedback: &RoundFeedback) {
        let guess = feedback.guess();
        let mut present_counts = [0u8; ALPHABET_SIZE];

        for (i, letter, judgment) in feedback.positions() {
            match judgment {
                LetterJudgment::Correct => {
                    self.required[i].insert(letter);
                    present_counts[letter_index(letter)] += 1;
                }
                LetterJudgment::Misplaced => {
                    self.forbidden[i].insert(letter);
                    self.misplaced[i].insert(letter);
                    present_counts[letter_index(letter)] += 1;
                }
                LetterJudgment::Absent => {
                    self.forbidden[i].insert(letter);
                }
            }
        }

        for (i, letter, judgment) in feedback.positions() {
            if judgment != LetterJudgment::Absent {
                continue;
            }
            // "sassy" with one 's' correct must not rule out 's' everywhere.
            let present_elsewhere = feedback
                .positions()
                .any(|(j, other, other_judgment)| j != i && other == letter && other_judgment.is_present());
            if !present_elsewhere {
                self.absent.insert(letter);
            }
        }

        for (min, count) in self.min_counts.iter_mut().zip(present_counts) {
            *min = (*min).max(count);
        }

        log::debug!(
            "Folded {} {} -> {} required, {} absent letters",
            guess,
            feedback.descriptor(),
            self.required.iter().filter(|set| !set.is_empty()).count(),
            self.absent.len()
        );
    }

    /// True if `word` satisfies every accumulated constraint.
    pub fn allows(&self, word: &Word) -> bool {
        let letters = word.letters();
        for i in 0..WORD_LENGTH {
            let letter = letters[i];
            if self.required[i].iter().any(|required| required != letter) {
                return false;
            }
            if self.forbidden[i].contains(letter) {
                return false;
            }
            if self.absent.contains(letter) {
                return false;
            }
        }
        let counts = word.letter_counts();
        counts
            .iter()
            .zip(self.min_counts.iter())
            .all(|(&have, &need)| have >= need)
    }

    /// The letter known to sit at `position`, if feedback pinned exactly one.
    pub fn required_at(&self, position: usize) -> Option<u8> {
        let set = self.required[position];
        if set.len() == 1 { set.iter().next() } else { None }
    }

    pub fn forbidden_at(&self, position: usize) -> LetterSet {
        self.forbidden[position]
    }

    pub fn min_count(&self, letter: u8) -> u8 {
        self.min_counts[letter_index(letter)]
    }

    pub fn is_absent(&self, letter: u8) -> bool {
        self.absent.contains(letter)
    }

    pub fn absent_letters(&self) -> LetterSet {
        self.absent
    }

    /// Letters known to occur somewhere, in alphabetical order.
    pub fn present_letters(&self) -> LetterSet {
        let mut set = LetterSet::EMPTY;
        for (i, &count) in self.min_counts.iter().enumerate() {
            if count > 0 {
                set.insert(index_letter(i));
            }
        }
        set
    }
}

fn letters_cell(set: LetterSet) -> String {
    set.iter().map(|b| b as char).collect()
}

/// Renders a small table: one row each for correct, misplaced and wrong
/// letters, one column per position.
impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:<6}{:<6}{:<6}{:<6}{:<6}", "", "1st", "2nd", "3rd", "4th", "5th")?;
        let wrong: [LetterSet; WORD_LENGTH] = std::array::from_fn(|i| {
            let mut set = LetterSet::EMPTY;
            for letter in self.forbidden[i].iter() {
                if !self.misplaced[i].contains(letter) {
                    set.insert(letter);
                }
            }
            set
        });
        let rows = [
            ("correct", &self.required),
            ("misplaced", &self.misplaced),
            ("wrong", &wrong),
        ];
        for (name, cells) in rows {
            write!(f, "{name:<10} ")?;
            for i in 0..WORD_LENGTH {
                write!(f, "{:<6}", letters_cell(cells[i]))?;
            }
            writeln!(f)?;
        }
        write!(f, "absent: {}", letters_cell(self.absent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(constraints: &ConstraintSet, guess: &str, descriptor: &str) -> ConstraintSet {
        constraints.fold(&RoundFeedback::parse(guess, descriptor).unwrap())
    }

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    #[test]
    fn test_empty_allows_everything() {
        let constraints = ConstraintSet::new();
        assert!(constraints.is_empty());
        assert!(constraints.allows(&word("crane")));
        assert!(constraints.allows(&word("sassy")));
    }

    #[test]
    fn test_correct_misplaced_absent() {
        let constraints = fold(&ConstraintSet::new(), "tares", "wcmww");
        assert_eq!(constraints.required_at(1), Some(b'a'));
        assert_eq!(constraints.required_at(0), None);
        assert!(constraints.forbidden_at(2).contains(b'r'));
        assert_eq!(constraints.min_count(b'r'), 1);
        assert_eq!(constraints.min_count(b'a'), 1);
        assert!(constraints.is_absent(b't'));
        assert!(constraints.is_absent(b'e'));
        assert!(constraints.is_absent(b's'));
        assert!(!constraints.is_absent(b'r'));
        assert_eq!(constraints.present_letters().iter().collect::<Vec<_>>(), b"ar".to_vec());
    }

    #[test]
    fn test_repeated_letter_absent_is_not_global() {
        let constraints = fold(&ConstraintSet::new(), "sassy", "ccwww");
        assert!(!constraints.is_absent(b's'));
        assert!(constraints.forbidden_at(2).contains(b's'));
        assert!(constraints.forbidden_at(3).contains(b's'));
        assert!(!constraints.forbidden_at(4).contains(b's'));
        assert!(constraints.is_absent(b'y'));
        assert_eq!(constraints.min_count(b's'), 1);
    }

    #[test]
    fn test_repeated_misplaced_counts() {
        let constraints = fold(&ConstraintSet::new(), "geese", "wmcww");
        assert_eq!(constraints.min_count(b'e'), 2);
        assert!(!constraints.is_absent(b'e'));
        assert!(constraints.allows(&word("creep")));
        assert!(!constraints.allows(&word("crepe")));
    }

    #[test]
    fn test_fold_is_idempotent() {
        let feedback = RoundFeedback::parse("sassy", "cmwww").unwrap();
        let once = ConstraintSet::new().fold(&feedback);
        let twice = once.fold(&feedback);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_min_counts_never_decrease() {
        let first = fold(&ConstraintSet::new(), "geese", "wmcww");
        let second = fold(&first, "enter", "mwwww");
        assert_eq!(second.min_count(b'e'), 2);
    }

    #[test]
    fn test_conflicting_correct_letters_allow_nothing() {
        let first = fold(&ConstraintSet::new(), "crane", "cwwww");
        let second = fold(&first, "brine", "cwwww");
        assert_eq!(second.required_at(0), None);
        assert!(!second.allows(&word("crust")));
        assert!(!second.allows(&word("bulky")));
    }

    #[test]
    fn test_display_lists_letters_by_position() {
        let constraints = fold(&ConstraintSet::new(), "tares", "wcmww");
        let table = constraints.to_string();
        assert!(table.contains("correct"));
        assert!(table.contains("misplaced"));
        assert!(table.ends_with("absent: est"));
    }
}
