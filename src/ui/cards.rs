/// Flashcards pane: generation pipeline, deck navigation, import/export

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use patternfly_yew::prelude::*;
use crate::card::Flashcard;
use crate::deck::{CardView, Deck};
use crate::gateway::DEFAULT_MODEL;
use crate::parser;
use crate::shapes::{PAGE_TEXT_LIMIT, truncate_chars};
use crate::storage;
use crate::ui::bridge;

/// Cards requested from the model per generation
const DECK_SIZE: usize = 10;

#[derive(Clone, Copy, PartialEq)]
enum GenerateSource {
    Topic,
    Page,
}

fn primary_prompt(topic: &str) -> String {
    format!(
        "OUTPUT MUST BE valid JSON array ONLY. Create {DECK_SIZE} concise study flashcards \
         about this topic. Each item must be an object with keys \"term\" and \"definition\". \
         Example: [{{\"term\":\"X\",\"definition\":\"...\"}}]. Topic: {topic}"
    )
}

fn retry_prompt(topic: &str) -> String {
    format!(
        "PLEASE RETURN ONLY a valid JSON array. No extra text. Create {DECK_SIZE} flashcards \
         for: {topic}. Keys: 'term' and 'definition'."
    )
}

#[derive(Properties, PartialEq)]
pub struct CardsTabProps {
    pub on_status: Callback<String>,
}

#[function_component(CardsTab)]
pub fn cards_tab(props: &CardsTabProps) -> Html {
    let deck = use_state(Deck::new);
    let topic = use_state(String::new);
    let file_input = use_node_ref();

    // Load the stored deck on mount; an unreadable store counts as empty
    {
        let deck = deck.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let cards = bridge::load_flashcards().await.unwrap_or_default();
                deck.set(Deck::from_cards(cards));
            });
            || ()
        });
    }

    let on_topic_input = {
        let topic = topic.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                topic.set(input.value());
            }
        })
    };

    // Generate from the topic box
    let on_generate = {
        let deck = deck.clone();
        let topic = topic.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let subject = topic.trim().to_string();
            if subject.is_empty() {
                on_status.emit("Enter a topic or notes".to_string());
                return;
            }

            let deck = deck.clone();
            let on_status = on_status.clone();
            spawn_local(async move {
                generate_into_deck(subject, GenerateSource::Topic, deck, on_status).await;
            });
        })
    };

    // Generate from the visible text of the active tab
    let on_generate_from_page = {
        let deck = deck.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let deck = deck.clone();
            let on_status = on_status.clone();

            on_status.emit("Extracting text from page...".to_string());

            spawn_local(async move {
                let text = match bridge::page_text().await {
                    Ok(text) => text,
                    Err(e) => {
                        log::error!("page extraction failed: {}", e);
                        on_status.emit("Extraction failed".to_string());
                        return;
                    }
                };

                let capped = truncate_chars(&text, PAGE_TEXT_LIMIT).to_string();
                if capped.is_empty() {
                    on_status.emit("No readable text found".to_string());
                    return;
                }

                generate_into_deck(capped, GenerateSource::Page, deck, on_status).await;
            });
        })
    };

    let on_prev = {
        let deck = deck.clone();
        Callback::from(move |_| {
            let mut updated = (*deck).clone();
            updated.prev();
            deck.set(updated);
        })
    };

    let on_next = {
        let deck = deck.clone();
        Callback::from(move |_| {
            let mut updated = (*deck).clone();
            updated.next();
            deck.set(updated);
        })
    };

    let on_flip = {
        let deck = deck.clone();
        Callback::from(move |_: MouseEvent| {
            let mut updated = (*deck).clone();
            updated.flip();
            deck.set(updated);
        })
    };

    let on_shuffle = {
        let deck = deck.clone();
        Callback::from(move |_| {
            let mut updated = (*deck).clone();
            updated.shuffle(&mut rand::thread_rng());
            deck.set(updated);
        })
    };

    // Export whatever is persisted, not the (possibly shuffled) view
    let on_export = {
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let on_status = on_status.clone();
            spawn_local(async move {
                let cards = match bridge::load_flashcards().await {
                    Ok(cards) => cards,
                    Err(e) => {
                        on_status.emit(format!("Export failed: {}", e));
                        return;
                    }
                };

                match serde_json::to_string_pretty(&cards) {
                    Ok(json) => bridge::export_file(&json, storage::EXPORT_FILENAME),
                    Err(e) => {
                        log::error!("export serialization failed: {:?}", e);
                    }
                }
            });
        })
    };

    let on_import_click = {
        let file_input = file_input.clone();
        Callback::from(move |_| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_import_file = {
        let deck = deck.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    let deck = deck.clone();
                    let on_status = on_status.clone();

                    spawn_local(async move {
                        match import_deck(&file).await {
                            Ok(cards) => {
                                deck.set(Deck::from_cards(cards));
                                on_status.emit("Imported".to_string());
                            }
                            Err(e) => {
                                log::warn!("import rejected: {}", e);
                                on_status.emit("Import failed".to_string());
                            }
                        }
                    });
                }
            }
        })
    };

    let on_clear = {
        let deck = deck.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            if !bridge::confirm("Clear ALL flashcards?") {
                return;
            }

            let deck = deck.clone();
            let on_status = on_status.clone();
            spawn_local(async move {
                if let Err(e) = bridge::save_flashcards(&[]).await {
                    on_status.emit(format!("Failed to save: {}", e));
                    return;
                }

                let mut cleared = (*deck).clone();
                cleared.clear();
                deck.set(cleared);
                on_status.emit("Cleared all flashcards".to_string());
            });
        })
    };

    html! {
        <div class="flex-column-gap">
            <textarea
                class="topic-input"
                placeholder="Enter a topic or paste study notes..."
                value={(*topic).clone()}
                oninput={on_topic_input}
            />

            <div class="button-row">
                <Button onclick={on_generate} variant={ButtonVariant::Primary} block={true}>
                    {"✨ Generate Flashcards"}
                </Button>
                <Button onclick={on_generate_from_page} variant={ButtonVariant::Secondary} block={true}>
                    {"🌐 From This Page"}
                </Button>
            </div>

            <div class="card-area">
                {card_face(&deck, on_flip.clone())}
            </div>

            <div class="button-row">
                <Button onclick={on_prev} variant={ButtonVariant::Secondary}>
                    {"◀ Prev"}
                </Button>
                <Button onclick={on_flip} variant={ButtonVariant::Secondary}>
                    {"🔁 Flip"}
                </Button>
                <Button onclick={on_next} variant={ButtonVariant::Secondary}>
                    {"Next ▶"}
                </Button>
                <Button onclick={on_shuffle} variant={ButtonVariant::Secondary}>
                    {"🔀 Shuffle"}
                </Button>
            </div>

            <p class="progress-label">{deck.progress_label()}</p>

            <div class="button-row">
                <Button onclick={on_export} variant={ButtonVariant::Secondary}>
                    {"📥 Export"}
                </Button>
                <Button onclick={on_import_click} variant={ButtonVariant::Secondary}>
                    {"📤 Import"}
                </Button>
                <Button onclick={on_clear} variant={ButtonVariant::Danger}>
                    {"🗑️ Clear All"}
                </Button>
            </div>

            <input
                ref={file_input.clone()}
                type="file"
                accept="application/json,.json"
                class="hidden-input"
                onchange={on_import_file}
            />
        </div>
    }
}

fn card_face(deck: &Deck, on_flip: Callback<MouseEvent>) -> Html {
    match deck.view() {
        CardView::Empty => html! {
            <div class="meta">{"No flashcards yet."}</div>
        },
        CardView::Face { card, flipped } => {
            let wrapper_class = if flipped { "card-wrapper flipped" } else { "card-wrapper" };

            html! {
                <div class={wrapper_class} onclick={on_flip}>
                    <div class="card front panel-glass">
                        <div class="card-term">{&card.term}</div>
                    </div>
                    <div class="card back panel-glass">
                        <div class="card-def">
                            {if card.definition.is_empty() { "(no definition)" } else { card.definition.as_str() }}
                        </div>
                    </div>
                </div>
            }
        }
    }
}

// Helper functions

async fn generate_into_deck(
    subject: String,
    source: GenerateSource,
    deck: UseStateHandle<Deck>,
    on_status: Callback<String>,
) {
    on_status.emit("Generating flashcards...".to_string());

    let output = bridge::run_ai(&primary_prompt(&subject), DEFAULT_MODEL).await;
    let retry = retry_prompt(&subject);
    let fresh = parser::parse_records_with_retry(&output, DECK_SIZE, move || async move {
        bridge::run_ai(&retry, DEFAULT_MODEL).await
    })
    .await;

    if fresh.is_empty() {
        on_status.emit("No cards produced".to_string());
        return;
    }
    let generated = fresh.len();

    let existing = match bridge::load_flashcards().await {
        Ok(cards) => cards,
        Err(e) => {
            on_status.emit(format!("Failed to load deck: {}", e));
            return;
        }
    };

    let merged = storage::merge_decks(fresh, existing);
    if let Err(e) = bridge::save_flashcards(&merged).await {
        on_status.emit(format!("Failed to save: {}", e));
        return;
    }

    deck.set(Deck::from_cards(merged));
    on_status.emit(match source {
        GenerateSource::Topic => format!("✨ Generated {} flashcards", generated),
        GenerateSource::Page => "🧠 Flashcards generated from page".to_string(),
    });
}

async fn import_deck(file: &web_sys::File) -> Result<Vec<Flashcard>, String> {
    let text = bridge::read_file_text(file).await?;
    let cards = storage::parse_import(&text)?;
    bridge::save_flashcards(&cards).await?;
    Ok(cards)
}
