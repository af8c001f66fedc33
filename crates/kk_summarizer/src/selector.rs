//! Picks the best-scoring sentences and puts them back in reading order.

use crate::nlp::Sentence;

/// Positions of the `count` highest scores, ascending.
///
/// Ties go to the earlier sentence. A missing or NaN score counts as the lowest.
pub fn select_ordinals(scores: &[f64], total: usize, count: usize) -> Vec<usize> {
    let score_of = |ordinal: usize| {
        scores
            .get(ordinal)
            .copied()
            .filter(|s| !s.is_nan())
            .unwrap_or(f64::NEG_INFINITY)
    };

    let mut ranked: Vec<usize> = (0..total).collect();
    ranked.sort_by(|&a, &b| score_of(b).total_cmp(&score_of(a)).then(a.cmp(&b)));
    ranked.truncate(count.min(total));
    ranked.sort_unstable();
    ranked
}

/// Top `count` sentences by score, in original document order.
pub fn select<'a>(sentences: &'a [Sentence], scores: &[f64], count: usize) -> Vec<&'a Sentence> {
    select_ordinals(scores, sentences.len(), count)
        .into_iter()
        .map(|ordinal| &sentences[ordinal])
        .collect()
}
