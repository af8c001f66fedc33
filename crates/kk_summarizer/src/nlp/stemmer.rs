use std::fmt;

use rust_stemmers::Stemmer as SnowballStemmer;

use crate::language::Language;

/// Snowball stemmer for one language. Holds no mutable state.
pub struct Stemmer {
    language: Language,
    inner: SnowballStemmer,
}

impl Stemmer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            inner: SnowballStemmer::create(language.stemmer_algorithm()),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Stems an already lowercased token.
    pub fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

impl Clone for Stemmer {
    fn clone(&self) -> Self {
        Self::new(self.language)
    }
}

impl fmt::Debug for Stemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stemmer")
            .field("language", &self.language)
            .finish()
    }
}

/// One-off stemming of a token in `language`.
pub fn stem(token: &str, language: Language) -> String {
    Stemmer::new(language).stem(&token.to_lowercase())
}
