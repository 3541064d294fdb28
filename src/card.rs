/// Flashcard record and field normalization for loosely-shaped model output
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accepted key spellings for the term field, in priority order
pub const TERM_ALIASES: &[&str] = &["term", "Term", "title"];

/// Accepted key spellings for the definition field, in priority order
pub const DEFINITION_ALIASES: &[&str] = &["definition", "def", "meaning", "desc", "definition_text"];

/// A single study card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
}

impl Flashcard {
    /// Build a card from an arbitrary JSON value, resolving key aliases.
    ///
    /// Models spell the fields inconsistently ("Term", "def", "meaning", ...).
    /// The first alias holding a non-empty string wins; anything else leaves
    /// the field blank. Non-object values produce a blank card.
    pub fn from_value(value: &Value) -> Flashcard {
        Flashcard {
            term: first_alias(value, TERM_ALIASES),
            definition: first_alias(value, DEFINITION_ALIASES),
        }
    }
}

fn first_alias(value: &Value, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|key| value.get(key))
        .filter_map(Value::as_str)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_keys() {
        let card = Flashcard::from_value(&json!({"term": "Osmosis", "definition": "Water movement"}));

        assert_eq!(card.term, "Osmosis");
        assert_eq!(card.definition, "Water movement");
    }

    #[test]
    fn test_alias_priority_order() {
        let card = Flashcard::from_value(&json!({
            "title": "Fallback",
            "Term": "Preferred",
            "desc": "Short",
            "def": "Chosen",
        }));

        assert_eq!(card.term, "Preferred");
        assert_eq!(card.definition, "Chosen");
    }

    #[test]
    fn test_empty_string_alias_is_skipped() {
        let card = Flashcard::from_value(&json!({"term": "", "title": "Backup", "definition": "D"}));

        assert_eq!(card.term, "Backup");
    }

    #[test]
    fn test_non_string_alias_is_skipped() {
        let card = Flashcard::from_value(&json!({"term": 42, "title": "Num", "definition": null}));

        assert_eq!(card.term, "Num");
        assert_eq!(card.definition, "");
    }

    #[test]
    fn test_non_object_value_gives_blank_card() {
        let card = Flashcard::from_value(&json!("just a string"));

        assert_eq!(card.term, "");
        assert_eq!(card.definition, "");
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let card: Flashcard = serde_json::from_str(r#"{"term": "Solo"}"#).unwrap();

        assert_eq!(card.term, "Solo");
        assert_eq!(card.definition, "");
    }

    #[test]
    fn test_serialization_round_trip() {
        let card = Flashcard {
            term: "Diffusion".to_string(),
            definition: "Spread of particles".to_string(),
        };

        let json = serde_json::to_string(&card).unwrap();
        let back: Flashcard = serde_json::from_str(&json).unwrap();

        assert_eq!(back, card);
    }
}
