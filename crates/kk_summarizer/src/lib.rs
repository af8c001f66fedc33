//! Extractive summarization of news text.
//!
//! Text is split into sentences, every sentence is scored by a
//! [`SentenceScorer`] (LSA by default) and the best ones are returned in
//! their original order.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use kk_core::{Article, Result};

pub mod aggregator;
pub mod count;
pub mod language;
pub mod lsa;
pub mod nlp;
pub mod selector;

pub use count::SentenceCount;
pub use language::Language;
pub use lsa::{LsaConfig, LsaScorer, SentenceScorer};
pub use nlp::{Sentence, TermNormalizer, Tokenizer};

pub const DEFAULT_TEXT_SENTENCES: usize = 2;
pub const DEFAULT_ARTICLE_SENTENCES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: Language,
    /// Sentences kept when summarizing a single text
    pub text_sentences: usize,
    /// Sentences kept when summarizing a batch of articles
    pub article_sentences: usize,
    /// Cap callers apply to input text before summarizing
    pub max_input_chars: Option<usize>,
    pub lsa: LsaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            text_sentences: DEFAULT_TEXT_SENTENCES,
            article_sentences: DEFAULT_ARTICLE_SENTENCES,
            max_input_chars: Some(100_000),
            lsa: LsaConfig::default(),
        }
    }
}

/// Sentences picked for a summary, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub sentences: Vec<Sentence>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sentence) in self.sentences.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&sentence.text)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Summarizer {
    tokenizer: Tokenizer,
    scorer: Box<dyn SentenceScorer>,
    config: Config,
}

impl Summarizer {
    pub fn new(config: Config) -> Self {
        let normalizer = TermNormalizer::new(config.language);
        let scorer = LsaScorer::with_config(normalizer, config.lsa.clone());
        Self::with_scorer(config, Box::new(scorer))
    }

    pub fn with_scorer(config: Config, scorer: Box<dyn SentenceScorer>) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.language),
            scorer,
            config,
        }
    }

    /// Summarizer for a language given by name or code.
    pub fn for_language(tag: &str) -> Result<Self> {
        Ok(Self::new(Config {
            language: tag.parse()?,
            ..Config::default()
        }))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn summarize(&self, text: &str, count: SentenceCount) -> Result<Summary> {
        let sentences = self.tokenizer.tokenize(text);
        let wanted = count.resolve(sentences.len());
        if wanted == 0 {
            return Ok(Summary::default());
        }

        let scores = self.scorer.score(&sentences)?;
        debug!(
            "Scored {} sentences with {}, keeping {}",
            sentences.len(),
            self.scorer.name(),
            wanted
        );

        let sentences = selector::select(&sentences, &scores, wanted)
            .into_iter()
            .cloned()
            .collect();
        Ok(Summary { sentences })
    }

    pub fn summarize_text(&self, text: &str, sentence_count: usize) -> Result<String> {
        Ok(self.summarize(text, sentence_count.into())?.to_string())
    }

    /// Summarizes the concatenated text of all articles as one document.
    pub fn summarize_articles(&self, articles: &[Article], sentence_count: usize) -> Result<String> {
        let document = aggregator::aggregate(articles);
        debug!(
            "Aggregated {} articles into {} characters",
            articles.len(),
            document.len()
        );
        self.summarize_text(&document, sentence_count)
    }
}

/// Summarizes English text with the default settings.
pub fn summarize_text(text: &str, sentence_count: usize) -> Result<String> {
    Summarizer::new(Config::default()).summarize_text(text, sentence_count)
}

/// Summarizes a batch of English articles with the default settings.
pub fn summarize_articles(articles: &[Article], sentence_count: usize) -> Result<String> {
    Summarizer::new(Config::default()).summarize_articles(articles, sentence_count)
}

pub mod prelude {
    pub use super::{Config, Language, SentenceCount, Summarizer, Summary};
    pub use super::lsa::SentenceScorer;
    pub use kk_core::{Article, Error, Result};
}
