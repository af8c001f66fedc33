use std::collections::HashSet;

use stop_words::get;

use crate::language::Language;

/// The fixed stopword set of a language, lowercased.
pub fn stop_words(language: Language) -> HashSet<String> {
    get(language.stop_words_language())
        .iter()
        .map(|w| w.to_lowercase())
        .collect()
}

#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl StopwordFilter {
    pub fn new(language: Language) -> Self {
        Self {
            stopwords: stop_words(language),
        }
    }

    /// No filtering at all
    pub fn empty() -> Self {
        Self {
            stopwords: HashSet::new(),
        }
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn add_stopwords(&mut self, words: &[&str]) {
        self.stopwords.extend(words.iter().map(|w| w.to_lowercase()));
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
