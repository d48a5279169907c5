use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::word::Word;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const CONFIG_DIR_NAME: &str = "wordle-assistant";
const WORDBANK_FILE_NAME: &str = "wordbank.txt";

/// The immutable corpus of candidate words, in load order.
///
/// Built once at startup and lent to every session by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl WordList {
    /// Keeps the first occurrence of each word; lines that are not five
    /// letters are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        let mut skipped = 0usize;
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            match Word::parse(line) {
                Ok(word) => {
                    if list.index.insert(word) {
                        list.words.push(word);
                    }
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            log::debug!("Skipped {skipped} lines that are not five-letter words");
        }
        list
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

pub fn load_wordbank_from_str(data: &str) -> WordList {
    WordList::from_lines(data.lines())
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordList> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
    Ok(WordList::from_lines(lines))
}

pub fn embedded_wordbank() -> WordList {
    load_wordbank_from_str(EMBEDDED_WORDBANK)
}

/// `<config dir>/wordle-assistant/wordbank.txt`, when the platform has a config dir.
pub fn get_user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(WORDBANK_FILE_NAME))
}

/// Where the word list came from, for the startup banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordbankSource {
    File(PathBuf),
    UserConfig(PathBuf),
    Embedded,
}

/// Picks the word list: an explicit path, then the user's config file if it
/// exists, then the embedded list.
pub fn resolve_wordbank(explicit: Option<&Path>) -> io::Result<(WordList, WordbankSource)> {
    if let Some(path) = explicit {
        let words = load_wordbank_from_file(path)?;
        return Ok((words, WordbankSource::File(path.to_path_buf())));
    }
    if let Some(path) = get_user_wordbank_path()
        && path.is_file()
    {
        let words = load_wordbank_from_file(&path)?;
        return Ok((words, WordbankSource::UserConfig(path)));
    }
    Ok((embedded_wordbank(), WordbankSource::Embedded))
}
