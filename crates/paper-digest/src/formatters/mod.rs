//! Output formatters for Markdown and JSON.

mod card;
mod json;
mod markdown;

use serde::{Deserialize, Serialize};

pub use self::json::*;
pub use card::{DetailRow, PLACEHOLDER, PaperCard, cards};
pub use markdown::*;

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

impl ResponseFormat {
    /// Render cards in this format.
    #[must_use]
    pub fn render(self, cards: &[PaperCard]) -> String {
        match self {
            Self::Markdown => format_cards_markdown(cards),
            Self::Json => serde_json::to_string_pretty(&cards_to_json(cards))
                .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
        }
    }
}
