//! Validated search request.

use crate::config::api;
use crate::error::ValidationError;

/// A topic search for a bounded number of papers.
///
/// Doubles as the result cache key: two queries are the same search when
/// their trimmed topic and count match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    topic: String,
    count: u8,
}

impl SearchQuery {
    /// Validate raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTopic`] for a blank topic and
    /// [`ValidationError::CountOutOfRange`] unless `1 <= count <= 10`.
    pub fn new(topic: &str, count: i64) -> Result<Self, ValidationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }

        let count = u8::try_from(count)
            .ok()
            .filter(|c| (api::MIN_RESULTS..=api::MAX_RESULTS).contains(c))
            .ok_or(ValidationError::CountOutOfRange { count })?;

        Ok(Self { topic: topic.to_string(), count })
    }

    /// Free-text topic, trimmed.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Maximum number of papers to return.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }
}
