//! JSON output formatting.

use serde_json::{Value, json};

use super::card::PaperCard;

/// Compact JSON object for one card.
///
/// The detail table becomes an object keyed by row label, in display order.
#[must_use]
pub fn card_to_json(card: &PaperCard) -> Value {
    let details: serde_json::Map<String, Value> =
        card.details.iter().map(|row| (row.field.to_string(), json!(row.value))).collect();

    let mut obj = json!({
        "id": card.paper_id,
        "title": card.title,
        "url": card.url,
        "authors": card.authors,
        "summary": card.summary,
        "details": details,
    });

    if let Some(warning) = &card.warning {
        obj["warning"] = json!(warning);
    }

    obj
}

/// JSON document for a result set.
#[must_use]
pub fn cards_to_json(cards: &[PaperCard]) -> Value {
    json!({
        "total": cards.len(),
        "papers": cards.iter().map(card_to_json).collect::<Vec<_>>(),
    })
}
