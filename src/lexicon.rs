//! External lexical resources the rules consult: a [Lemmatizer] returning candidate lemmas for a surface form and a
//! [WordList] used as a spellcheck oracle.
//!
//! Both are traits so that any lemmatizer or dictionary can be plugged in. [LemmaTable] and [WordSet] are simple
//! in-memory implementations which can be read from plain text dumps.

use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
};

use crate::Error;

/// Looks up candidate lemmas of a word. A word may have more than one lemma, e.g. "saw" -> {"see", "saw"}.
pub trait Lemmatizer: Send + Sync {
    fn lemmas(&self, word: &str) -> HashSet<String>;
}

/// A list of valid words.
pub trait WordList: Send + Sync {
    fn contains(&self, word: &str) -> bool;
}

impl WordList for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

/// Lines of a dump, skipping blank lines and `#` comments.
fn content_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.lines().filter(|line| {
        line.as_ref()
            .map_or(true, |x| !x.trim().is_empty() && !x.starts_with('#'))
    })
}

/// A case-sensitive set of valid words.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordSet {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a word list with one word per line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut words = HashSet::new();

        for line in content_lines(reader) {
            words.insert(line?.trim().to_string());
        }

        Ok(WordSet { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for WordSet {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// A lookup table from lowercase words to their lemmas. Words not in the table are their own lemma.
#[derive(Debug, Clone, Default)]
pub struct LemmaTable {
    lemmas: HashMap<String, Vec<String>>,
}

impl LemmaTable {
    pub fn new<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut table = LemmaTable::default();

        for (word, lemma) in pairs {
            table.insert(word.as_ref(), lemma.into());
        }

        table
    }

    /// Reads a table with one `word<TAB>lemma` pair per line. A word can appear on multiple lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut table = LemmaTable::default();

        for line in content_lines(reader) {
            let line = line?;
            let parts: Vec<_> = line.split('\t').collect();

            match parts.as_slice() {
                [word, lemma, ..] => table.insert(word.trim(), lemma.trim().to_string()),
                _ => log::warn!("skipping malformed lemma line: {:?}", line),
            }
        }

        Ok(table)
    }

    fn insert(&mut self, word: &str, lemma: String) {
        let entry = self
            .lemmas
            .entry(word.to_lowercase())
            .or_insert_with(Vec::new);
        if !entry.contains(&lemma) {
            entry.push(lemma);
        }
    }
}

impl Lemmatizer for LemmaTable {
    fn lemmas(&self, word: &str) -> HashSet<String> {
        let lower = word.to_lowercase();

        match self.lemmas.get(&lower) {
            Some(lemmas) => lemmas.iter().cloned().collect(),
            None => {
                let mut lemmas = HashSet::new();
                lemmas.insert(lower);
                lemmas
            }
        }
    }
}
