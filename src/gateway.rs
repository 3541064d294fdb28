/// Gemini generateContent client, called from the background service worker

use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;

/// Model used when the popup does not pick one
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

impl GenerateRequest {
    fn single_turn(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Send one prompt and resolve to plain text. Every failure comes back as
/// an `"Error: ..."` string instead of an error type, so callers always
/// hold text they can show or parse.
pub async fn generate(prompt: &str, model: &str, api_key: &str) -> String {
    match request_completion(prompt, model, api_key).await {
        Ok(text) => text,
        Err(message) => format!("Error: {message}"),
    }
}

async fn request_completion(prompt: &str, model: &str, api_key: &str) -> Result<String, String> {
    let url = format!("{GENERATE_URL}/{model}:generateContent?key={api_key}");
    let body = serde_json::to_string(&GenerateRequest::single_turn(prompt))
        .map_err(|e| format!("Serialization error: {e}"))?;

    log::debug!("requesting {model} completion ({} prompt bytes)", prompt.len());

    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| format!("Request error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    // No status check: error envelopes flow through extraction like any
    // other body.
    let envelope: Value = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    Ok(extract_text(&envelope))
}

/// Candidate text first, then a flat `output_text`, then the raw envelope.
fn extract_text(envelope: &Value) -> String {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .or_else(|| envelope.get("output_text").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| envelope.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&GenerateRequest::single_turn("explain osmosis")).unwrap();

        assert_eq!(
            body,
            r#"{"contents":[{"parts":[{"text":"explain osmosis"}]}]}"#
        );
    }

    #[test]
    fn test_extracts_candidate_text() {
        let envelope = json!({
            "candidates": [
                {"content": {"parts": [{"text": "Osmosis is..."}]}}
            ]
        });

        assert_eq!(extract_text(&envelope), "Osmosis is...");
    }

    #[test]
    fn test_falls_back_to_output_text() {
        let envelope = json!({"output_text": "flat answer"});

        assert_eq!(extract_text(&envelope), "flat answer");
    }

    #[test]
    fn test_unknown_envelope_is_returned_verbatim() {
        let envelope = json!({"error": {"code": 429, "message": "quota"}});

        assert_eq!(
            extract_text(&envelope),
            r#"{"error":{"code":429,"message":"quota"}}"#
        );
    }

    #[test]
    fn test_non_string_candidate_falls_through() {
        let envelope = json!({
            "candidates": [{"content": {"parts": [{"text": 5}]}}],
            "output_text": "still here"
        });

        assert_eq!(extract_text(&envelope), "still here");
    }
}
