use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use kk_core::Result;

use crate::language::Language;
use crate::nlp::stopwords::StopwordFilter;

/// A sentence of the source document. `ordinal` is its zero-based position and
/// is what output order is rebuilt from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub ordinal: usize,
    pub text: String,
    pub words: Vec<String>,
}

/// Sentence splitter and word tokenizer for one language.
///
/// Unicode sentence bounds are re-joined after abbreviations and initials unless
/// the following word reads as a sentence start: a capitalized stopword such as
/// "The" or "It".
#[derive(Debug, Clone)]
pub struct Tokenizer {
    language: Language,
    starters: StopwordFilter,
}

impl Tokenizer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            starters: StopwordFilter::new(language),
        }
    }

    pub fn for_language(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Splits `text` into trimmed sentences in order of appearance.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();
        let mut fragments = text.split_sentence_bounds().peekable();

        while let Some(fragment) = fragments.next() {
            pending.push_str(fragment);
            if let Some(next) = fragments.peek() {
                if self.holds_together(&pending, next) {
                    continue;
                }
            }
            push_trimmed(&mut sentences, &pending);
            pending.clear();
        }
        push_trimmed(&mut sentences, &pending);

        sentences
    }

    /// Word tokens of a sentence; punctuation-only segments are dropped.
    pub fn words(&self, sentence: &str) -> Vec<String> {
        sentence.unicode_words().map(str::to_string).collect()
    }

    pub fn tokenize(&self, text: &str) -> Vec<Sentence> {
        self.split_sentences(text)
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| Sentence {
                ordinal,
                words: self.words(&text),
                text,
            })
            .collect()
    }

    /// Whether the period closing `fragment` belongs to an abbreviation or initial
    /// rather than ending the sentence, given the fragment that follows.
    fn holds_together(&self, fragment: &str, next: &str) -> bool {
        let Some(body) = fragment.trim_end().strip_suffix('.') else {
            return false;
        };
        let Some(last) = body.split_whitespace().last() else {
            return false;
        };
        let token = last
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        let Some(next_word) = next
            .split_whitespace()
            .next()
            .map(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
        else {
            return false;
        };

        if self.language.numbering_abbreviations().contains(&token.as_str()) {
            return next_word.starts_with(|c: char| c.is_ascii_digit());
        }

        let mut chars = token.chars();
        let is_initial = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
        if !is_initial && !self.language.abbreviations().contains(&token.as_str()) {
            return false;
        }

        !self.starts_sentence(next_word)
    }

    fn starts_sentence(&self, word: &str) -> bool {
        let word = word.trim_end_matches(|c: char| !c.is_alphanumeric());
        word.starts_with(char::is_uppercase)
            && word.chars().count() > 1
            && self.starters.is_stopword(word)
    }
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
