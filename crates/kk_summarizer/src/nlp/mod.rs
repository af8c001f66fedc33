//! Text processing shared by every scorer: sentence/word splitting and term normalization.

pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;

pub use stemmer::{stem, Stemmer};
pub use stopwords::{stop_words, StopwordFilter};
pub use tokenizer::{Sentence, Tokenizer};

use crate::language::Language;

/// Turns surface words into scoring terms: lowercase, drop stopwords, stem.
#[derive(Debug, Clone)]
pub struct TermNormalizer {
    stopwords: StopwordFilter,
    stemmer: Stemmer,
}

impl TermNormalizer {
    pub fn new(language: Language) -> Self {
        Self {
            stopwords: StopwordFilter::new(language),
            stemmer: Stemmer::new(language),
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// `None` when the word is a stopword or has no content.
    pub fn normalize(&self, word: &str) -> Option<String> {
        let lowered = word.trim().to_lowercase();
        if lowered.is_empty() || self.stopwords.is_stopword(&lowered) {
            return None;
        }
        Some(self.stemmer.stem(&lowered))
    }

    pub fn terms(&self, words: &[String]) -> Vec<String> {
        words.iter().filter_map(|w| self.normalize(w)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_stopwords_and_stems() {
        let normalizer = TermNormalizer::new(Language::English);
        assert_eq!(normalizer.normalize("The"), None);
        assert_eq!(normalizer.normalize("Farmers").as_deref(), Some("farmer"));
        assert_eq!(normalizer.normalize("irrigation").as_deref(), Some("irrig"));
        assert_eq!(normalizer.normalize("   "), None);
    }

    #[test]
    fn test_filtering_decision_is_stable() {
        let normalizer = TermNormalizer::new(Language::English);
        let words = ["crops", "and", "RAIN", "the", "monsoon", "of", "crops"];
        let first: Vec<bool> = words.iter().map(|w| normalizer.normalize(w).is_some()).collect();
        let reversed: Vec<bool> = words.iter().rev().map(|w| normalizer.normalize(w).is_some()).collect();
        let again: Vec<bool> = reversed.into_iter().rev().collect();
        assert_eq!(first, again);
        assert_eq!(first, vec![true, false, true, false, true, false, true]);
    }

    #[test]
    fn test_custom_stopwords() {
        let normalizer = TermNormalizer::new(Language::English)
            .with_stopwords(StopwordFilter::from_list(&["crop", "crops"]));
        assert_eq!(normalizer.normalize("crops"), None);
        assert_eq!(normalizer.normalize("the").as_deref(), Some("the"));
    }
}
