/// Deck persistence helpers for chrome.storage.local

use crate::card::Flashcard;
use serde_json::Value;

/// chrome.storage.local key holding the flat card array
pub const STORAGE_KEY: &str = "synthex_flashcards";

/// Download name used by the export action
pub const EXPORT_FILENAME: &str = "synthex_flashcards.json";

/// Freshly generated cards go in front of the stored ones. Duplicates are
/// kept as-is.
pub fn merge_decks(new_cards: Vec<Flashcard>, existing: Vec<Flashcard>) -> Vec<Flashcard> {
    let mut merged = new_cards;
    merged.extend(existing);
    merged
}

/// Parse imported file text. Only a top-level JSON array is accepted;
/// elements pass through the usual alias normalization.
pub fn parse_import(text: &str) -> Result<Vec<Flashcard>, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("Invalid JSON: {e}"))?;

    match value {
        Value::Array(items) => Ok(items.iter().map(Flashcard::from_value).collect()),
        _ => Err("Expected a JSON array of cards".to_string()),
    }
}
