use std::fmt;
use std::str::FromStr;

use kk_core::Error;

/// How many sentences a summary should keep: a fixed number or a share of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SentenceCount {
    Absolute(usize),
    Percentage(f64),
}

impl SentenceCount {
    /// Number of sentences to keep from a document of `total` sentences.
    pub fn resolve(&self, total: usize) -> usize {
        match *self {
            SentenceCount::Absolute(count) => count.min(total),
            SentenceCount::Percentage(percent) => {
                ((total as f64 * percent / 100.0).floor() as usize).min(total)
            }
        }
    }
}

impl From<usize> for SentenceCount {
    fn from(count: usize) -> Self {
        SentenceCount::Absolute(count)
    }
}

impl FromStr for SentenceCount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(percent) = s.strip_suffix('%') {
            let percent: f64 = percent
                .trim()
                .parse()
                .map_err(|_| Error::Configuration(format!("invalid sentence percentage: {}", s)))?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(Error::Configuration(format!("sentence percentage out of range: {}", s)));
            }
            return Ok(SentenceCount::Percentage(percent));
        }
        s.parse()
            .map(SentenceCount::Absolute)
            .map_err(|_| Error::Configuration(format!("invalid sentence count: {}", s)))
    }
}

impl fmt::Display for SentenceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceCount::Absolute(count) => write!(f, "{}", count),
            SentenceCount::Percentage(percent) => write!(f, "{}%", percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("5".parse::<SentenceCount>().unwrap(), SentenceCount::Absolute(5));
        assert_eq!(" 20% ".parse::<SentenceCount>().unwrap(), SentenceCount::Percentage(20.0));
        assert!("abc".parse::<SentenceCount>().is_err());
        assert!("150%".parse::<SentenceCount>().is_err());
        assert!("-1".parse::<SentenceCount>().is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(SentenceCount::Absolute(5).resolve(3), 3);
        assert_eq!(SentenceCount::Absolute(0).resolve(3), 0);
        assert_eq!(SentenceCount::Percentage(20.0).resolve(12), 2);
        assert_eq!(SentenceCount::Percentage(100.0).resolve(7), 7);
    }

    #[test]
    fn test_display_round_trips_through_cli_syntax() {
        assert_eq!(SentenceCount::Absolute(2).to_string(), "2");
        assert_eq!(SentenceCount::Percentage(25.0).to_string(), "25%");
    }
}
