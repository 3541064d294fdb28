/// Typed wrappers over the popup's JS plumbing (chrome.* stays in popup.js)

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use crate::card::Flashcard;
use crate::storage::STORAGE_KEY;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn requestGeneration(prompt: &str, model: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn extractPageText() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn detectMailText() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getRecentHistory(max_results: u32, start_time: f64) -> Result<JsValue, JsValue>;

    fn exportToFile(data: &str, filename: &str);
}

/// One prompt through the worker channel. Always resolves to text; channel
/// failures come back as an "Error: ..." string like any model failure.
pub async fn run_ai(prompt: &str, model: &str) -> String {
    match requestGeneration(prompt, model).await {
        Ok(output) => output.as_string().unwrap_or_default(),
        Err(e) => format!("Error: {:?}", e),
    }
}

pub async fn load_flashcards() -> Result<Vec<Flashcard>, String> {
    let stored = getStorage(STORAGE_KEY)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    if stored.is_null() || stored.is_undefined() {
        Ok(Vec::new())
    } else {
        serde_wasm_bindgen::from_value(stored)
            .map_err(|e| format!("Failed to parse storage: {:?}", e))
    }
}

pub async fn save_flashcards(cards: &[Flashcard]) -> Result<(), String> {
    let cards_js = serde_wasm_bindgen::to_value(cards)
        .map_err(|e| format!("Failed to serialize storage: {:?}", e))?;

    setStorage(STORAGE_KEY, cards_js)
        .await
        .map_err(|e| format!("Failed to save storage: {:?}", e))
}

/// Visible text of the active tab, untruncated. Callers cap the length.
pub async fn page_text() -> Result<String, String> {
    let text = extractPageText()
        .await
        .map_err(|e| format!("Failed to read page: {:?}", e))?;

    Ok(text.as_string().unwrap_or_default())
}

/// Mail text from the active tab, when the page looks like a mail client.
pub async fn mail_text() -> Result<Option<String>, String> {
    let detected = detectMailText()
        .await
        .map_err(|e| format!("Failed to inspect page: {:?}", e))?;

    if detected.is_null() || detected.is_undefined() {
        return Ok(None);
    }
    Ok(detected.as_string().filter(|text| !text.is_empty()))
}

/// Recently visited URLs, newest first.
pub async fn recent_history_urls(max_results: u32, start_time: f64) -> Result<Vec<String>, String> {
    let urls = getRecentHistory(max_results, start_time)
        .await
        .map_err(|e| format!("Failed to read history: {:?}", e))?;

    serde_wasm_bindgen::from_value(urls)
        .map_err(|e| format!("Failed to parse history: {:?}", e))
}

pub fn export_file(data: &str, filename: &str) {
    exportToFile(data, filename);
}

pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
    let promise = window.navigator().clipboard().write_text(text);

    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("Clipboard write failed: {:?}", e))
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    Ok(text.as_string().unwrap_or_default())
}
