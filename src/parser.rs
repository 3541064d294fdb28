/// Model output → flashcards: strict JSON parse, embedded-block extraction,
/// a single re-prompt, then a paragraph heuristic as the last resort

use crate::card::Flashcard;
use crate::shapes;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::future::Future;

/// Outermost `[{...}]` block inside surrounding prose
static EMBEDDED_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*\}\s*\]").unwrap());

/// Blank-line paragraph separator
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());

/// Parse raw model text into at most `target` cards without re-prompting.
pub fn parse_records(raw: &str, target: usize) -> Vec<Flashcard> {
    match parse_card_values(raw) {
        Some(values) => normalize_records(&values, target),
        None => paragraph_records(raw, target),
    }
}

/// Full cascade. When the structured tiers fail on `raw`, `reprompt` is
/// invoked exactly once and every tier (paragraph heuristic included) runs
/// again over the retried text only.
pub async fn parse_records_with_retry<F, Fut>(
    raw: &str,
    target: usize,
    reprompt: F,
) -> Vec<Flashcard>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = String>,
{
    if let Some(values) = parse_card_values(raw) {
        return normalize_records(&values, target);
    }

    log::warn!("structured parse failed, re-prompting once");
    let retried = reprompt().await;
    parse_records(&retried, target)
}

/// Strict whole-text parse, then embedded-block extraction. Only a
/// non-empty JSON array counts as success.
fn parse_card_values(raw: &str) -> Option<Vec<Value>> {
    if let Some(values) = parse_json_array(raw) {
        return Some(values);
    }
    let block = EMBEDDED_ARRAY.find(raw)?;
    parse_json_array(block.as_str())
}

fn parse_json_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(values)) if !values.is_empty() => Some(values),
        _ => None,
    }
}

fn normalize_records(values: &[Value], target: usize) -> Vec<Flashcard> {
    values.iter().take(target).map(Flashcard::from_value).collect()
}

/// Blank-line-separated groups: first line (ordinal stripped) is the term,
/// the remaining lines joined by spaces are the definition.
fn paragraph_records(raw: &str, target: usize) -> Vec<Flashcard> {
    PARAGRAPH_BREAK
        .split(raw)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .take(target)
        .filter_map(|group| {
            let mut lines = group.lines().map(str::trim).filter(|line| !line.is_empty());
            let term = shapes::strip_ordinal(lines.next()?);
            let definition = lines.collect::<Vec<_>>().join(" ");
            Some(Flashcard { term, definition })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn card(term: &str, definition: &str) -> Flashcard {
        Flashcard {
            term: term.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_strict_json_array_parses_directly() {
        let raw = r#"[{"term":"Osmosis","definition":"Water movement"},
                      {"term":"Diffusion","definition":"Spread of particles"}]"#;

        let cards = parse_records(raw, 10);

        assert_eq!(
            cards,
            vec![
                card("Osmosis", "Water movement"),
                card("Diffusion", "Spread of particles"),
            ]
        );
    }

    #[test]
    fn test_results_truncate_to_target() {
        let items: Vec<String> = (1..=14)
            .map(|n| format!(r#"{{"term":"T{n}","definition":"D{n}"}}"#))
            .collect();
        let raw = format!("[{}]", items.join(","));

        let cards = parse_records(&raw, 10);

        assert_eq!(cards.len(), 10);
        assert_eq!(cards[9], card("T10", "D10"));
    }

    #[test]
    fn test_embedded_array_extracted_from_prose() {
        let raw = "Here is your list:\n[{\"term\":\"A\",\"definition\":\"B\"}]\nThanks!";

        let cards = parse_records(raw, 10);

        assert_eq!(cards, vec![card("A", "B")]);
    }

    #[test]
    fn test_aliases_normalized_whatever_the_tier() {
        let raw = r#"[{"Term":"X","def":"Y"}, {"title":"Z", "meaning":"W"}]"#;

        let cards = parse_records(raw, 10);

        assert_eq!(cards, vec![card("X", "Y"), card("Z", "W")]);
    }

    #[test]
    fn test_non_object_elements_become_blank_cards() {
        let cards = parse_records(r#"[17, {"term":"Real","definition":"Card"}]"#, 10);

        assert_eq!(cards, vec![card("", ""), card("Real", "Card")]);
    }

    #[test]
    fn test_paragraph_fallback_splits_on_blank_lines() {
        let raw = "1. Osmosis\nMovement of water.\n\n2. Diffusion\nSpread of particles.";

        let cards = parse_records(raw, 10);

        assert_eq!(
            cards,
            vec![
                card("Osmosis", "Movement of water."),
                card("Diffusion", "Spread of particles."),
            ]
        );
    }

    #[test]
    fn test_single_line_group_has_empty_definition() {
        let cards = parse_records("3) Mitosis", 10);

        assert_eq!(cards, vec![card("Mitosis", "")]);
    }

    #[test]
    fn test_blank_input_gives_no_cards() {
        assert!(parse_records("", 10).is_empty());
        assert!(parse_records("  \n \n  ", 10).is_empty());
    }

    #[test]
    fn test_retry_not_invoked_when_extraction_succeeds() {
        let called = Cell::new(false);
        let raw = "Here is your list:\n[{\"term\":\"A\",\"definition\":\"B\"}]\nThanks!";

        let cards = block_on(parse_records_with_retry(raw, 10, || {
            called.set(true);
            async { String::new() }
        }));

        assert!(!called.get());
        assert_eq!(cards, vec![card("A", "B")]);
    }

    #[test]
    fn test_empty_array_is_not_a_success() {
        let called = Cell::new(false);

        let cards = block_on(parse_records_with_retry("[]", 10, || {
            called.set(true);
            async { r#"[{"term":"Second","definition":"Try"}]"#.to_string() }
        }));

        assert!(called.get());
        assert_eq!(cards, vec![card("Second", "Try")]);
    }

    #[test]
    fn test_retried_text_goes_through_every_tier() {
        let cards = block_on(parse_records_with_retry("nothing structured", 10, || async {
            "1. Osmosis\nMovement of water.\n\n2. Diffusion\nSpread of particles.".to_string()
        }));

        assert_eq!(
            cards,
            vec![
                card("Osmosis", "Movement of water."),
                card("Diffusion", "Spread of particles."),
            ]
        );
    }

    #[test]
    fn test_failed_retry_still_yields_whatever_the_heuristic_finds() {
        let cards = block_on(parse_records_with_retry("first text", 10, || async {
            "Error: model unavailable".to_string()
        }));

        assert_eq!(cards, vec![card("Error: model unavailable", "")]);
    }
}
