//! Markdown output formatting.

use super::card::PaperCard;

/// Format a list of cards as Markdown.
#[must_use]
pub fn format_cards_markdown(cards: &[PaperCard]) -> String {
    if cards.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", cards.len());

    for (i, card) in cards.iter().enumerate() {
        output.push_str(&format_card_markdown(card, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single card as Markdown.
#[must_use]
pub fn format_card_markdown(card: &PaperCard, index: usize) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("## Paper {}: {}\n\n", index, card.title));
    output.push_str(&format!("[{}]({})\n\n", card.title, card.link()));

    if let Some(warning) = &card.warning {
        output.push_str(&format!("> **Warning**: {warning}\n\n"));
    }

    output.push_str(&format!("**Authors:** {}\n\n", card.authors));
    output.push_str(&format!("**Summary:** {}\n\n", card.summary));

    // Detail table
    output.push_str("| Field | Data |\n|---|---|\n");
    for row in &card.details {
        output.push_str(&format!("| {} | {} |\n", row.field, escape_cell(&row.value)));
    }

    output
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
