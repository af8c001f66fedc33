//! Latent semantic analysis sentence scoring.
//!
//! Sentences are columns of a term-by-sentence matrix of smoothed term
//! frequencies. After a singular value decomposition, a sentence's salience
//! is the length of its column in the reduced right-singular space, each
//! dimension weighted by its squared singular value.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::{DMatrix, SVD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use kk_core::Result;

use crate::language::Language;
use crate::nlp::{Sentence, TermNormalizer};

/// Assigns a salience score to every sentence, indexed by ordinal.
pub trait SentenceScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn score(&self, sentences: &[Sentence]) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LsaConfig {
    /// Lower bound on the number of singular dimensions kept
    pub min_dimensions: usize,
    /// Share of the singular values kept, in (0, 1]
    pub reduction_ratio: f64,
    /// Floor applied to every cell of a non-empty sentence column
    pub smoothing: f64,
}

impl Default for LsaConfig {
    fn default() -> Self {
        Self {
            min_dimensions: 3,
            reduction_ratio: 1.0,
            smoothing: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LsaScorer {
    normalizer: TermNormalizer,
    config: LsaConfig,
}

impl LsaScorer {
    pub fn new(language: Language) -> Self {
        Self::with_config(TermNormalizer::new(language), LsaConfig::default())
    }

    pub fn with_config(normalizer: TermNormalizer, config: LsaConfig) -> Self {
        Self { normalizer, config }
    }

    fn dimensions(&self, available: usize) -> usize {
        let by_ratio = (available as f64 * self.config.reduction_ratio).floor() as usize;
        by_ratio.max(self.config.min_dimensions).min(available)
    }
}

impl SentenceScorer for LsaScorer {
    fn name(&self) -> &str {
        "lsa"
    }

    fn score(&self, sentences: &[Sentence]) -> Result<Vec<f64>> {
        let terms: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| self.normalizer.terms(&s.words))
            .collect();

        let dictionary = build_dictionary(&terms);
        if dictionary.is_empty() {
            debug!("No terms left after normalization, all {} sentences score 0", sentences.len());
            return Ok(vec![0.0; sentences.len()]);
        }
        if dictionary.len() < sentences.len() {
            debug!(
                "Fewer terms ({}) than sentences ({}), the summary may be poor",
                dictionary.len(),
                sentences.len()
            );
        }

        let matrix = term_frequency_matrix(&terms, &dictionary, self.config.smoothing);
        let Some(svd) = SVD::try_new(matrix, false, true, f64::EPSILON, 0) else {
            warn!("SVD did not converge, falling back to document order");
            return Ok(vec![0.0; sentences.len()]);
        };
        let Some(v_t) = svd.v_t.as_ref() else {
            warn!("SVD returned no right singular vectors, falling back to document order");
            return Ok(vec![0.0; sentences.len()]);
        };

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));
        let kept = &order[..self.dimensions(order.len())];

        let ranks = terms
            .iter()
            .enumerate()
            .map(|(col, sentence_terms)| {
                if sentence_terms.is_empty() {
                    return 0.0;
                }
                kept.iter()
                    .map(|&row| {
                        let sigma = svd.singular_values[row];
                        let v = v_t[(row, col)];
                        sigma * sigma * v * v
                    })
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();

        Ok(ranks)
    }
}

/// Distinct terms mapped to matrix rows, in lexicographic order.
fn build_dictionary(terms: &[Vec<String>]) -> BTreeMap<&str, usize> {
    let mut dictionary: BTreeMap<&str, usize> = terms
        .iter()
        .flatten()
        .map(|term| (term.as_str(), 0))
        .collect();
    for (row, index) in dictionary.values_mut().enumerate() {
        *index = row;
    }
    dictionary
}

fn term_frequency_matrix(
    terms: &[Vec<String>],
    dictionary: &BTreeMap<&str, usize>,
    smoothing: f64,
) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(dictionary.len(), terms.len());
    for (col, sentence_terms) in terms.iter().enumerate() {
        for term in sentence_terms {
            if let Some(&row) = dictionary.get(term.as_str()) {
                matrix[(row, col)] += 1.0;
            }
        }
    }

    for mut column in matrix.column_iter_mut() {
        let max = column.max();
        if max > 0.0 {
            column.apply(|cell| *cell = smoothing + (1.0 - smoothing) * *cell / max);
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Tokenizer;

    fn sentences(text: &str) -> Vec<Sentence> {
        Tokenizer::new(Language::English).tokenize(text)
    }

    #[test]
    fn test_scores_one_per_sentence() {
        let scorer = LsaScorer::new(Language::English);
        let doc = sentences(
            "Rain helps crops grow. Drought damages crops severely. Farmers need better irrigation.",
        );
        let scores = scorer.score(&doc).unwrap();
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| s.is_finite() && *s > 0.0));
    }

    #[test]
    fn test_stopword_only_sentence_scores_zero() {
        let scorer = LsaScorer::new(Language::English);
        let doc = sentences("Monsoon rains boost kharif sowing. It is what it is. Wheat procurement rises.");
        let scores = scorer.score(&doc).unwrap();
        assert_eq!(scores[1], 0.0);
        assert!(scores[0] > 0.0);
        assert!(scores[2] > 0.0);
    }

    #[test]
    fn test_degenerate_document_scores_zero() {
        let scorer = LsaScorer::new(Language::English);
        let doc = sentences("It is. Was it? And so on.");
        let scores = scorer.score(&doc).unwrap();
        assert_eq!(scores, vec![0.0; doc.len()]);
    }

    #[test]
    fn test_central_sentence_ranks_higher() {
        let scorer = LsaScorer::new(Language::English);
        let doc = sentences(
            "Onion prices surged in Nashik markets. \
             Onion prices surged again as onion arrivals fell in Nashik markets. \
             Stadium renovated.",
        );
        let scores = scorer.score(&doc).unwrap();
        assert!(scores[1] > scores[2]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = LsaScorer::new(Language::English);
        let doc = sentences(
            "Sugarcane dues remain unpaid. Mills blame low sugar prices. Farmers want dues cleared before sowing.",
        );
        assert_eq!(scorer.score(&doc).unwrap(), scorer.score(&doc).unwrap());
    }

    #[test]
    fn test_smoothed_term_frequency() {
        let terms = vec![
            vec!["crop".to_string(), "crop".to_string(), "rain".to_string()],
            vec![],
        ];
        let dictionary = build_dictionary(&terms);
        let matrix = term_frequency_matrix(&terms, &dictionary, 0.4);
        assert_eq!(matrix.shape(), (2, 2));
        assert!((matrix[(dictionary["crop"], 0)] - 1.0).abs() < 1e-12);
        assert!((matrix[(dictionary["rain"], 0)] - 0.7).abs() < 1e-12);
        assert_eq!(matrix[(0, 1)], 0.0);
        assert_eq!(matrix[(1, 1)], 0.0);
    }

    #[test]
    fn test_dimensions_capped_by_rank() {
        let scorer = LsaScorer::new(Language::English);
        assert_eq!(scorer.dimensions(2), 2);
        assert_eq!(scorer.dimensions(10), 10);

        let halved = LsaScorer::with_config(
            TermNormalizer::new(Language::English),
            LsaConfig { reduction_ratio: 0.5, ..LsaConfig::default() },
        );
        assert_eq!(halved.dimensions(10), 5);
        assert_eq!(halved.dimensions(4), 3);
    }
}
