//! Latent semantic analysis sentence ranking.
//!
//! Builds a term x sentence matrix of smoothed term frequencies, takes its
//! singular value decomposition, and scores each sentence by the length of
//! its vector in the strongest latent topics.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use nalgebra::DMatrix;

/// Topics kept even when the reduction ratio would keep fewer.
const MIN_DIMENSIONS: usize = 3;

/// Share of singular values kept as topics.
const REDUCTION_RATIO: f64 = 1.0;

/// Weight every term gets in a sentence that has any terms at all.
const SMOOTHING: f64 = 0.4;

/// SVD iteration cap.
const MAX_SVD_ITERATIONS: usize = 10_000;

/// Score sentences given as word lists.
///
/// Stop words are excluded from the vocabulary. Returns `None` when no
/// sentence contains a single content word.
pub(crate) fn rank_sentences(sentences: &[Vec<String>], stop_words: &HashSet<String>) -> Option<Vec<f64>> {
    let dictionary = build_dictionary(sentences, stop_words);
    if dictionary.is_empty() {
        return None;
    }

    let matrix = term_frequencies(sentences, &dictionary);
    Some(compute_ranks(matrix))
}

/// Map each content word to a matrix row, in sorted order.
fn build_dictionary<'a>(
    sentences: &'a [Vec<String>],
    stop_words: &HashSet<String>,
) -> BTreeMap<&'a str, usize> {
    let mut words: Vec<&str> = sentences
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|w| !stop_words.contains(*w))
        .collect();
    words.sort_unstable();
    words.dedup();

    words.into_iter().enumerate().map(|(row, w)| (w, row)).collect()
}

fn term_frequencies(sentences: &[Vec<String>], dictionary: &BTreeMap<&str, usize>) -> DMatrix<f64> {
    let mut matrix = DMatrix::<f64>::zeros(dictionary.len(), sentences.len());

    for (col, sentence) in sentences.iter().enumerate() {
        for word in sentence {
            if let Some(&row) = dictionary.get(word.as_str()) {
                matrix[(row, col)] += 1.0;
            }
        }
    }

    for mut column in matrix.column_iter_mut() {
        let max = column.max();
        if max > 0.0 {
            for value in column.iter_mut() {
                *value = SMOOTHING + (1.0 - SMOOTHING) * (*value / max);
            }
        }
    }

    matrix
}

fn compute_ranks(matrix: DMatrix<f64>) -> Vec<f64> {
    let fallback = column_norms(&matrix);

    let Some(svd) = matrix.try_svd(false, true, f64::EPSILON, MAX_SVD_ITERATIONS) else {
        tracing::debug!("SVD did not converge, ranking by term weight");
        return fallback;
    };
    let Some(v_t) = svd.v_t else {
        return fallback;
    };
    let sigma = svd.singular_values;

    let mut topics: Vec<usize> = (0..sigma.len()).collect();
    topics.sort_by(|&a, &b| sigma[b].partial_cmp(&sigma[a]).unwrap_or(Ordering::Equal));
    let dimensions = MIN_DIMENSIONS.max((sigma.len() as f64 * REDUCTION_RATIO) as usize);
    topics.truncate(dimensions);

    (0..v_t.ncols())
        .map(|sentence| {
            topics
                .iter()
                .map(|&k| sigma[k].powi(2) * v_t[(k, sentence)].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

fn column_norms(matrix: &DMatrix<f64>) -> Vec<f64> {
    matrix.column_iter().map(|c| c.norm()).collect()
}

/// Indices of the `count` best-ranked items, in input order.
///
/// Ties keep the earlier item.
pub(crate) fn best_in_order(ranks: &[f64], count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..ranks.len()).collect();
    indices.sort_by(|&a, &b| ranks[b].partial_cmp(&ranks[a]).unwrap_or(Ordering::Equal));
    indices.truncate(count);
    indices.sort_unstable();
    indices
}
