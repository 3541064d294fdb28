/// Synthex - Chrome extension popup for flashcards, summaries, and replies
/// Built with Rust + WASM + Yew

mod card;
mod deck;
mod gateway;
mod parser;
mod shapes;
mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Called by the service worker, which holds the API key
#[wasm_bindgen]
pub async fn run_ai(prompt: String, model: String, api_key: String) -> String {
    gateway::generate(&prompt, &model, &api_key).await
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
