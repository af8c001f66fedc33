//! Languages the summarizer has rule tables for.

use std::fmt;
use std::str::FromStr;

use kk_core::Error;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Spanish,
        Language::Italian,
        Language::Portuguese,
        Language::Dutch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Dutch => "dutch",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
        }
    }

    pub(crate) fn stop_words_language(&self) -> LANGUAGE {
        match self {
            Language::English => LANGUAGE::English,
            Language::German => LANGUAGE::German,
            Language::French => LANGUAGE::French,
            Language::Spanish => LANGUAGE::Spanish,
            Language::Italian => LANGUAGE::Italian,
            Language::Portuguese => LANGUAGE::Portuguese,
            Language::Dutch => LANGUAGE::Dutch,
        }
    }

    pub(crate) fn stemmer_algorithm(&self) -> Algorithm {
        match self {
            Language::English => Algorithm::English,
            Language::German => Algorithm::German,
            Language::French => Algorithm::French,
            Language::Spanish => Algorithm::Spanish,
            Language::Italian => Algorithm::Italian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Dutch => Algorithm::Dutch,
        }
    }

    /// Lowercase abbreviations (without the trailing period) that do not end a sentence.
    pub(crate) fn abbreviations(&self) -> &'static [&'static str] {
        match self {
            Language::English => &[
                "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e",
                "approx", "inc", "ltd", "co", "corp", "govt", "dept", "est", "fig",
                "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
                "u.s", "u.k", "rs", "hon", "gen", "col", "lt", "capt", "sgt",
            ],
            Language::German => &[
                "dr", "prof", "hr", "fr", "bzw", "ca", "usw", "z.b", "d.h", "u.a", "vgl",
                "evtl", "ggf", "inkl", "str", "jan", "feb", "okt", "dez", "mio", "mrd",
            ],
            Language::French => &[
                "m", "mm", "mme", "mlle", "dr", "pr", "st", "ste", "etc", "cf", "env", "p.ex",
                "av", "bd", "janv", "févr", "oct", "déc",
            ],
            Language::Spanish => &[
                "sr", "sra", "srta", "dr", "dra", "d", "dña", "ud", "uds", "etc", "p.ej", "aprox",
                "av", "pág", "ene", "feb", "oct", "dic",
            ],
            Language::Italian => &[
                "sig", "sigg", "sig.ra", "dott", "prof", "ing", "avv", "ecc", "es", "pag",
                "gen", "feb", "ott", "dic",
            ],
            Language::Portuguese => &[
                "sr", "sra", "srta", "dr", "dra", "prof", "etc", "ex", "pág", "av", "jan",
                "fev", "out", "dez",
            ],
            Language::Dutch => &[
                "dhr", "mevr", "dr", "prof", "ir", "mr", "ing", "bijv", "o.a", "d.w.z", "enz",
                "blz", "jan", "feb", "okt", "dec",
            ],
        }
    }

    /// Numbering abbreviations ("No. 5"); they only hold the sentence together before a digit.
    pub(crate) fn numbering_abbreviations(&self) -> &'static [&'static str] {
        match self {
            Language::English => &["no", "nos"],
            Language::German | Language::Dutch => &["nr"],
            Language::French => &["n°"],
            Language::Spanish | Language::Portuguese => &["núm", "nº"],
            Language::Italian => &["n"],
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.name() == tag || language.code() == tag)
            .ok_or_else(|| Error::Configuration(format!("unsupported language: {}", s.trim())))
    }
}

impl TryFrom<String> for Language {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.name().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!(" English ".parse::<Language>().unwrap(), Language::English);
        assert_eq!("de".parse::<Language>().unwrap(), Language::German);
        assert_eq!("Portuguese".parse::<Language>().unwrap(), Language::Portuguese);
    }

    #[test]
    fn test_unsupported_language_is_configuration_error() {
        let err = "klingon".parse::<Language>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Language::French).unwrap();
        assert_eq!(json, "\"french\"");
        let parsed: Language = serde_json::from_str("\"nl\"").unwrap();
        assert_eq!(parsed, Language::Dutch);
        assert!(serde_json::from_str::<Language>("\"klingon\"").is_err());
    }
}
