/// Text shaping for the summary, reply, and subject-line surfaces

use once_cell::sync::Lazy;
use regex::Regex;

/// Page text beyond this many characters is dropped before prompting
pub const PAGE_TEXT_LIMIT: usize = 12_000;

/// Runs of non-terminator characters plus an optional `.`/`!`/`?`
static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]?").unwrap());

/// `---` ruler lines or `Variant N:` / `Variant N-` headers
static REPLY_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n\s*---\s*\n|\n\s*variant\s*\d+\s*[:-]").unwrap());

/// Leading list ordinals like `1. `, `2) `, `3 `
static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[).\s]*").unwrap());

/// Shape model text into bullet points.
///
/// Multi-line text keeps up to 10 non-empty trimmed lines. Single-line text
/// is split into at most 8 sentences instead, falling back to the whole
/// trimmed text when nothing matches.
pub fn summary_points(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() != 1 {
        return lines.into_iter().take(10).map(str::to_string).collect();
    }

    let sentences: Vec<String> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .take(8)
        .collect();

    if sentences.is_empty() {
        return vec![text.trim().to_string()];
    }
    sentences
}

/// Split reply text into variants on `---` rulers or `Variant N` headers.
/// Text with no separators is a single variant.
pub fn reply_variants(text: &str) -> Vec<String> {
    let parts: Vec<String> = REPLY_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        return vec![text.trim().to_string()];
    }
    parts
}

/// One suggestion per non-empty line, capped at 10, ordinals stripped.
pub fn subject_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(10)
        .map(strip_ordinal)
        .collect()
}

/// Remove a leading list ordinal (`1. `, `2) `, `3 `) from a line.
pub fn strip_ordinal(line: &str) -> String {
    ORDINAL.replace(line, "").into_owned()
}

/// Cut text to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((boundary, _)) => &text[..boundary],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_multi_line_bullets() {
        let text = "- Point one\n\n- Point two\n   \n- Point three";

        let points = summary_points(text);

        assert_eq!(points, vec!["- Point one", "- Point two", "- Point three"]);
    }

    #[test]
    fn test_summary_caps_at_ten_lines() {
        let text = (1..=14).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");

        let points = summary_points(&text);

        assert_eq!(points.len(), 10);
        assert_eq!(points[9], "line 10");
    }

    #[test]
    fn test_summary_single_line_splits_into_sentences() {
        let points = summary_points("First insight. Second insight! Third?");

        assert_eq!(points, vec!["First insight.", "Second insight!", "Third?"]);
    }

    #[test]
    fn test_summary_sentences_cap_at_eight() {
        let text = "One. Two. Three. Four. Five. Six. Seven. Eight. Nine. Ten.";

        let points = summary_points(text);

        assert_eq!(points.len(), 8);
        assert_eq!(points[7], "Eight.");
    }

    #[test]
    fn test_summary_single_word_passes_through() {
        assert_eq!(summary_points("notable"), vec!["notable"]);
    }

    #[test]
    fn test_summary_empty_text_gives_no_points() {
        assert!(summary_points("").is_empty());
        assert!(summary_points("  \n \n").is_empty());
    }

    #[test]
    fn test_replies_split_on_ruler() {
        let text = "Dear Alice,\nThanks for the update.\n---\nHi Alice,\nSounds good.";

        let variants = reply_variants(text);

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0], "Dear Alice,\nThanks for the update.");
        assert_eq!(variants[1], "Hi Alice,\nSounds good.");
    }

    #[test]
    fn test_replies_split_on_variant_headers() {
        let text = "Variant 1: Hello team\nfirst body\nVARIANT 2- Hi there\nsecond body";

        let variants = reply_variants(text);

        assert_eq!(variants.len(), 2);
        assert!(variants[0].starts_with("Variant 1: Hello team"));
        assert!(variants[1].starts_with("Hi there"));
    }

    #[test]
    fn test_replies_without_separator_stay_whole() {
        let variants = reply_variants("  Just one reply.  ");

        assert_eq!(variants, vec!["Just one reply."]);
    }

    #[test]
    fn test_subject_lines_strip_ordinals_and_cap() {
        let text = (1..=12).map(|n| format!("{n}. Subject {n}")).collect::<Vec<_>>().join("\n");

        let subjects = subject_lines(&text);

        assert_eq!(subjects.len(), 10);
        assert_eq!(subjects[0], "Subject 1");
        assert_eq!(subjects[9], "Subject 10");
    }

    #[test]
    fn test_strip_ordinal_forms() {
        assert_eq!(strip_ordinal("1. Osmosis"), "Osmosis");
        assert_eq!(strip_ordinal("2) Diffusion"), "Diffusion");
        assert_eq!(strip_ordinal("3 Mitosis"), "Mitosis");
        assert_eq!(strip_ordinal("Plain line"), "Plain line");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 10), "");
    }
}
