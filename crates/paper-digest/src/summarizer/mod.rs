//! Extractive abstract summarization.
//!
//! Sentences are ranked with latent semantic analysis over their content
//! words (English stop words removed), and the best ones are returned in
//! the order they appear in the abstract. The output is a pure function of
//! the input text.

mod lsa;
mod tokenize;

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{LANGUAGE, get};

pub use tokenize::{split_sentences, words};

use crate::config::api;

/// Returned instead of a summary when a paper has no abstract.
pub const NO_SUMMARY: &str = "No Summary Available as this paper is blocked via API calls. \
                              Please read it in full from the URL provided above.";

static ENGLISH_STOP_WORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| get(LANGUAGE::English).iter().map(|w| w.to_string()).collect());

/// LSA summarizer producing a fixed number of sentences.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    sentence_count: usize,
}

impl Summarizer {
    /// Create a summarizer that keeps `sentence_count` sentences (at least one).
    #[must_use]
    pub fn new(sentence_count: usize) -> Self {
        Self { sentence_count: sentence_count.max(1) }
    }

    /// Number of sentences kept.
    #[must_use]
    pub const fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Summarize an abstract.
    ///
    /// Absent or blank text yields [`NO_SUMMARY`]. Text with fewer sentences
    /// than requested is returned whole.
    #[must_use]
    pub fn summarize(&self, text: Option<&str>) -> String {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return NO_SUMMARY.to_string();
        };

        self.select_sentences(text).join(" ")
    }

    /// The best sentences of `text`, in reading order.
    #[must_use]
    pub fn select_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let sentences = split_sentences(text);
        if sentences.len() <= self.sentence_count {
            return sentences;
        }

        let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| words(s)).collect();
        let Some(ranks) = lsa::rank_sentences(&tokenized, &ENGLISH_STOP_WORDS) else {
            tracing::debug!(sentences = sentences.len(), "No content words, keeping leading sentences");
            return sentences.into_iter().take(self.sentence_count).collect();
        };

        lsa::best_in_order(&ranks, self.sentence_count)
            .into_iter()
            .map(|i| sentences[i])
            .collect()
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(api::SUMMARY_SENTENCES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABSTRACT: &str = "Large language models have transformed natural language processing. \
        We study how language models answer questions about scientific papers. \
        The weather was pleasant during the experiments. \
        Our evaluation shows language models answer paper questions accurately. \
        Lunch was served at noon.";

    #[test]
    fn test_absent_abstract_uses_fallback() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize(None), NO_SUMMARY);
        assert_eq!(summarizer.summarize(Some("")), NO_SUMMARY);
        assert_eq!(summarizer.summarize(Some(" \n\t ")), NO_SUMMARY);
    }

    #[test]
    fn test_short_abstract_returned_whole() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize(Some("Transformers.")), "Transformers.");
        assert_eq!(
            summarizer.summarize(Some("First point here. Second point here.")),
            "First point here. Second point here."
        );
    }

    #[test]
    fn test_summary_has_three_sentences_in_reading_order() {
        let summarizer = Summarizer::default();
        let picked = summarizer.select_sentences(ABSTRACT);
        assert_eq!(picked.len(), 3);

        let positions: Vec<usize> = picked.iter().map(|s| ABSTRACT.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "not in reading order: {picked:?}");
    }

    #[test]
    fn test_lowercase_sentence_start_still_ranked() {
        let summarizer = Summarizer::default();
        let text = "We study gene regulation in yeast. mRNA levels rise under heat stress. \
                    Cells adapt quickly to change. We release all data.";
        assert_eq!(summarizer.select_sentences(text).len(), 3);
        assert_ne!(summarizer.summarize(Some(text)), text);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let summarizer = Summarizer::default();
        let first = summarizer.summarize(Some(ABSTRACT));
        let second = summarizer.summarize(Some(ABSTRACT));
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_stop_words_keeps_leading_sentences() {
        let summarizer = Summarizer::default();
        let text = "It is. It was. It will be. It has been.";
        assert_eq!(summarizer.summarize(Some(text)), "It is. It was. It will be.");
    }

    #[test]
    fn test_single_word_and_non_english() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize(Some("Abstract")), "Abstract");
        let text = "这是第一句。这是第二句。";
        assert_eq!(summarizer.summarize(Some(text)), text);
    }

    #[test]
    fn test_sentence_count_at_least_one() {
        assert_eq!(Summarizer::new(0).sentence_count(), 1);
        assert_eq!(Summarizer::new(5).sentence_count(), 5);
    }
}
