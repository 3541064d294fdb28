/// Popup UI shell: tab strip, status line, and the Mail/Web/Focus panes

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use patternfly_yew::prelude::*;
use rand::seq::SliceRandom;
use crate::gateway::DEFAULT_MODEL;
use crate::shapes::{self, PAGE_TEXT_LIMIT};
use crate::ui::bridge;
use crate::ui::cards::CardsTab;

const QUOTES: [&str; 10] = [
    "Discipline is choosing between what you want now and what you want most.",
    "The way to get started is to quit talking and begin doing.",
    "Your focus determines your reality.",
    "Small progress each day adds up to big results.",
    "Success is the sum of small efforts, repeated day in and day out.",
    "Do something today that your future self will thank you for.",
    "Dream big. Start small. Act now.",
    "Don’t watch the clock; do what it does. Keep going.",
    "Focus on being productive instead of busy.",
    "Push yourself, because no one else is going to do it for you.",
];

/// History window feeding the affirmation prompt
const HISTORY_MAX_RESULTS: u32 = 6;
const HISTORY_WINDOW_MS: f64 = 86_400_000.0;

const AFFIRMATION_FALLBACK: &str = "Stay strong and keep moving forward.";

#[derive(Clone, PartialEq)]
enum ActiveTab {
    Mail,
    Web,
    Focus,
    Cards,
}

#[function_component(App)]
pub fn app() -> Html {
    let active_tab = use_state(|| ActiveTab::Mail);
    let dark = use_state(|| false);
    let status = use_state(|| "ready".to_string());

    let set_status = {
        let status = status.clone();
        Callback::from(move |message: String| status.set(message))
    };

    let on_dark_toggle = {
        let dark = dark.clone();
        Callback::from(move |_| dark.set(!*dark))
    };

    // Tab click handlers
    let on_tab_click = {
        let active_tab = active_tab.clone();
        move |tab: ActiveTab| {
            let active_tab = active_tab.clone();
            Callback::from(move |_| {
                active_tab.set(tab.clone());
            })
        }
    };

    html! {
        <div class={if *dark { "popup dark" } else { "popup" }}>
            <div class="header-row">
                <h1 class="popup-title">{"Synthex"}</h1>
                <Button onclick={on_dark_toggle} variant={ButtonVariant::Plain}>
                    {"🌗"}
                </Button>
            </div>

            // Tab navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={if *active_tab == ActiveTab::Mail { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_tab_click(ActiveTab::Mail)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Mail"}</span>
                        </button>
                    </li>
                    <li class={if *active_tab == ActiveTab::Web { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_tab_click(ActiveTab::Web)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Web"}</span>
                        </button>
                    </li>
                    <li class={if *active_tab == ActiveTab::Focus { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_tab_click(ActiveTab::Focus)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Focus"}</span>
                        </button>
                    </li>
                    <li class={if *active_tab == ActiveTab::Cards { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_tab_click(ActiveTab::Cards)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Cards"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            <p class="status-line">{format!("Status: {}", *status)}</p>

            // Panes stay mounted while hidden, so a late response still lands
            // in the pane that issued it
            <div class={pane_class(&active_tab, ActiveTab::Mail)}>
                <MailTab on_status={set_status.clone()} />
            </div>
            <div class={pane_class(&active_tab, ActiveTab::Web)}>
                <WebTab on_status={set_status.clone()} />
            </div>
            <div class={pane_class(&active_tab, ActiveTab::Focus)}>
                <FocusTab on_status={set_status.clone()} />
            </div>
            <div class={pane_class(&active_tab, ActiveTab::Cards)}>
                <CardsTab on_status={set_status.clone()} />
            </div>

            <p class="footer-popup">
                {"Synthex v0.5.0"}
            </p>
        </div>
    }
}

fn pane_class(active: &ActiveTab, pane: ActiveTab) -> &'static str {
    if *active == pane {
        "tab-pane"
    } else {
        "tab-pane hidden"
    }
}

#[derive(Properties, PartialEq)]
struct PaneProps {
    on_status: Callback<String>,
}

// Mail pane

#[derive(Clone, PartialEq)]
enum MailResult {
    None,
    Summary(Vec<String>),
    Replies(Vec<String>),
    Subjects(Vec<String>),
}

#[function_component(MailTab)]
fn mail_tab(props: &PaneProps) -> Html {
    let email_text = use_state(String::new);
    let result = use_state(|| MailResult::None);

    let on_email_input = {
        let email_text = email_text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                email_text.set(input.value());
            }
        })
    };

    // Pull mail text out of the active tab
    let on_detect = {
        let email_text = email_text.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let email_text = email_text.clone();
            let on_status = on_status.clone();

            on_status.emit("detecting...".to_string());

            spawn_local(async move {
                match bridge::mail_text().await {
                    Ok(Some(text)) => {
                        email_text.set(text);
                        on_status.emit("detected".to_string());
                    }
                    Ok(None) => {
                        on_status.emit("no mail detected".to_string());
                    }
                    Err(e) => {
                        log::error!("mail detection failed: {}", e);
                        on_status.emit("detect error".to_string());
                    }
                }
            });
        })
    };

    let on_summarize = {
        let email_text = email_text.clone();
        let result = result.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let txt = email_text.trim().to_string();
            if txt.is_empty() {
                on_status.emit("no text".to_string());
                return;
            }

            let result = result.clone();
            let on_status = on_status.clone();
            on_status.emit("summarizing...".to_string());

            spawn_local(async move {
                let prompt = format!(
                    "Summarize this email into concise bullet points and 3 insights:\n\n{}",
                    txt
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;
                result.set(MailResult::Summary(shapes::summary_points(&out)));
                on_status.emit("done".to_string());
            });
        })
    };

    let on_replies = {
        let email_text = email_text.clone();
        let result = result.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let txt = email_text.trim().to_string();
            if txt.is_empty() {
                on_status.emit("no text".to_string());
                return;
            }

            let result = result.clone();
            let on_status = on_status.clone();
            on_status.emit("generating replies...".to_string());

            spawn_local(async move {
                let prompt = format!(
                    "Write 2 professional reply variants separated by '---':\n\n{}",
                    txt
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;
                result.set(MailResult::Replies(shapes::reply_variants(&out)));
                on_status.emit("done".to_string());
            });
        })
    };

    let on_subjects = {
        let email_text = email_text.clone();
        let result = result.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let txt = email_text.trim().to_string();
            if txt.is_empty() {
                on_status.emit("no text".to_string());
                return;
            }

            let result = result.clone();
            let on_status = on_status.clone();
            on_status.emit("suggesting subjects...".to_string());

            spawn_local(async move {
                let prompt = format!(
                    "Suggest 6 short subject lines, one per line, for the email below:\n\n{}",
                    txt
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;
                result.set(MailResult::Subjects(shapes::subject_lines(&out)));
                on_status.emit("done".to_string());
            });
        })
    };

    // Copy the shaped result, or the raw email text when there is none
    let on_copy = {
        let email_text = email_text.clone();
        let result = result.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let mut value = mail_result_text(&result);
            if value.is_empty() {
                value = (*email_text).clone();
            }
            if value.is_empty() {
                return;
            }

            let on_status = on_status.clone();
            spawn_local(async move {
                match bridge::copy_text(&value).await {
                    Ok(()) => on_status.emit("copied".to_string()),
                    Err(e) => {
                        log::error!("copy failed: {}", e);
                        on_status.emit("copy failed".to_string());
                    }
                }
            });
        })
    };

    let on_clear = {
        let email_text = email_text.clone();
        let result = result.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            email_text.set(String::new());
            result.set(MailResult::None);
            on_status.emit("cleared".to_string());
        })
    };

    html! {
        <div class="flex-column-gap">
            <textarea
                class="mail-input"
                placeholder="Paste an email here, or detect one from the page..."
                value={(*email_text).clone()}
                oninput={on_email_input}
            />

            <div class="button-row">
                <Button onclick={on_detect} variant={ButtonVariant::Secondary}>
                    {"✉️ Detect"}
                </Button>
                <Button onclick={on_summarize} variant={ButtonVariant::Primary}>
                    {"🧾 Summarize"}
                </Button>
                <Button onclick={on_replies} variant={ButtonVariant::Secondary}>
                    {"💬 Replies"}
                </Button>
                <Button onclick={on_subjects} variant={ButtonVariant::Secondary}>
                    {"📧 Subjects"}
                </Button>
            </div>

            <div class="mail-result">
                {mail_result_view(&result)}
            </div>

            <div class="button-row">
                <Button onclick={on_copy} variant={ButtonVariant::Secondary}>
                    {"📋 Copy"}
                </Button>
                <Button onclick={on_clear} variant={ButtonVariant::Secondary}>
                    {"Clear"}
                </Button>
            </div>
        </div>
    }
}

fn mail_result_text(result: &MailResult) -> String {
    match result {
        MailResult::None => String::new(),
        MailResult::Summary(points) => points.join("\n"),
        MailResult::Replies(variants) => variants.join("\n\n---\n\n"),
        MailResult::Subjects(lines) => lines.join("\n"),
    }
}

fn mail_result_view(result: &MailResult) -> Html {
    match result {
        MailResult::None => html! {},
        MailResult::Summary(points) => html! {
            <>
                <h3>{"🧾 Summary"}</h3>
                <ul>
                    {for points.iter().map(|point| html! { <li>{point.clone()}</li> })}
                </ul>
            </>
        },
        MailResult::Replies(variants) => html! {
            <>
                {for variants.iter().enumerate().map(|(i, variant)| {
                    let text = variant.clone();
                    let on_copy_variant = Callback::from(move |_: MouseEvent| {
                        let text = text.clone();
                        spawn_local(async move {
                            let _ = bridge::copy_text(&text).await;
                        });
                    });

                    html! {
                        <div class="panel-glass reply-card">
                            <h4>{format!("💬 Reply {}", i + 1)}</h4>
                            <pre>{variant.clone()}</pre>
                            <Button onclick={on_copy_variant} variant={ButtonVariant::Link} size={ButtonSize::Small}>
                                {"Copy"}
                            </Button>
                        </div>
                    }
                })}
            </>
        },
        MailResult::Subjects(lines) => html! {
            <>
                <h3>{"📧 Suggested Subjects"}</h3>
                <ol>
                    {for lines.iter().map(|line| html! { <li>{line.clone()}</li> })}
                </ol>
            </>
        },
    }
}

// Web pane

#[derive(Clone, PartialEq)]
enum WebSummary {
    None,
    Notice(String),
    Points(Vec<String>),
}

#[derive(Clone, PartialEq)]
struct ChatMessage {
    from_user: bool,
    text: String,
}

#[function_component(WebTab)]
fn web_tab(props: &PaneProps) -> Html {
    let summary = use_state(|| WebSummary::None);
    let chat = use_state(Vec::<ChatMessage>::new);
    let question = use_state(String::new);

    let on_question_input = {
        let question = question.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                question.set(input.value());
            }
        })
    };

    // Summarize the visible text of the active tab
    let on_summarize_page = {
        let summary = summary.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let summary = summary.clone();
            let on_status = on_status.clone();

            summary.set(WebSummary::None);
            on_status.emit("summarizing page...".to_string());

            spawn_local(async move {
                let text = match bridge::page_text().await {
                    Ok(text) => text,
                    Err(e) => {
                        summary.set(WebSummary::Notice(format!("Error: {}", e)));
                        on_status.emit("error".to_string());
                        return;
                    }
                };

                let capped = shapes::truncate_chars(&text, PAGE_TEXT_LIMIT).to_string();
                if capped.is_empty() {
                    summary.set(WebSummary::Notice("No readable text found.".to_string()));
                    on_status.emit("No readable text found".to_string());
                    return;
                }

                let prompt = format!(
                    "Summarize this webpage into clear bullet points and 3 concise insights:\n\n{}",
                    capped
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;
                summary.set(WebSummary::Points(shapes::summary_points(&out)));
                on_status.emit("done".to_string());
            });
        })
    };

    // Follow-up question grounded in the current summary
    let on_send = {
        let summary = summary.clone();
        let chat = chat.clone();
        let question = question.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let q = question.trim().to_string();
            if q.is_empty() {
                return;
            }
            question.set(String::new());

            let prev = summary_text(&summary);
            if prev.is_empty() {
                on_status.emit("Summarize page first".to_string());
                return;
            }

            let mut messages = (*chat).clone();
            messages.push(ChatMessage {
                from_user: true,
                text: q.clone(),
            });
            chat.set(messages.clone());

            on_status.emit("thinking...".to_string());

            let chat = chat.clone();
            let on_status = on_status.clone();
            spawn_local(async move {
                let prompt = format!(
                    "Based on the following summary/content, answer the user's question clearly.\n\nContent:\n{}\n\nQuestion: {}",
                    prev, q
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;

                messages.push(ChatMessage {
                    from_user: false,
                    text: out.trim().to_string(),
                });
                chat.set(messages);
                on_status.emit("done".to_string());
            });
        })
    };

    html! {
        <div class="flex-column-gap">
            <Button onclick={on_summarize_page} variant={ButtonVariant::Primary} block={true}>
                {"🌍 Summarize This Page"}
            </Button>

            <div class="web-result">
                {summary_view(&summary)}
            </div>

            if !chat.is_empty() {
                <div class="chat-box">
                    {for chat.iter().map(|message| {
                        let class = if message.from_user { "chat-msg user" } else { "chat-msg bot" };
                        html! { <div class={class}>{message.text.clone()}</div> }
                    })}
                </div>
            }

            <div class="button-row">
                <input
                    type="text"
                    class="web-input"
                    placeholder="Ask about this page..."
                    value={(*question).clone()}
                    oninput={on_question_input}
                />
                <Button onclick={on_send} variant={ButtonVariant::Secondary}>
                    {"Send"}
                </Button>
            </div>
        </div>
    }
}

fn summary_text(summary: &WebSummary) -> String {
    match summary {
        WebSummary::None => String::new(),
        WebSummary::Notice(text) => text.clone(),
        WebSummary::Points(points) => points.join("\n"),
    }
}

fn summary_view(summary: &WebSummary) -> Html {
    match summary {
        WebSummary::None => html! {},
        WebSummary::Notice(text) => html! {
            <p class="meta">{text.clone()}</p>
        },
        WebSummary::Points(points) => html! {
            <>
                <h3>{"🧾 Summary"}</h3>
                <ul>
                    {for points.iter().map(|point| html! { <li>{point.clone()}</li> })}
                </ul>
            </>
        },
    }
}

// Focus pane

#[function_component(FocusTab)]
fn focus_tab(props: &PaneProps) -> Html {
    let quote = use_state(random_quote);
    let affirmation = use_state(String::new);

    let on_new_quote = {
        let quote = quote.clone();
        Callback::from(move |_| quote.set(random_quote()))
    };

    // Affirmation seeded with recently visited hostnames
    let on_new_affirmation = {
        let affirmation = affirmation.clone();
        let on_status = props.on_status.clone();

        Callback::from(move |_| {
            let affirmation = affirmation.clone();
            let on_status = on_status.clone();

            on_status.emit("generating affirmation...".to_string());

            spawn_local(async move {
                let start_time = js_sys::Date::now() - HISTORY_WINDOW_MS;
                let urls = match bridge::recent_history_urls(HISTORY_MAX_RESULTS, start_time).await
                {
                    Ok(urls) => urls,
                    Err(e) => {
                        log::error!("history lookup failed: {}", e);
                        affirmation.set(AFFIRMATION_FALLBACK.to_string());
                        on_status.emit(String::new());
                        return;
                    }
                };

                let sites: Vec<String> = urls
                    .iter()
                    .map(|u| {
                        url::Url::parse(u)
                            .ok()
                            .and_then(|parsed| parsed.host_str().map(str::to_string))
                            .unwrap_or_default()
                    })
                    .collect();

                let prompt = format!(
                    "Based on browsing summary: {}\nGenerate a 1-sentence motivational affirmation.",
                    sites.join(", ")
                );
                let out = bridge::run_ai(&prompt, DEFAULT_MODEL).await;
                affirmation.set(out);
                on_status.emit(String::new());
            });
        })
    };

    html! {
        <div class="flex-column-gap">
            <div class="panel-glass quote-box">
                <p class="quote">{(*quote).clone()}</p>
            </div>
            <Button onclick={on_new_quote} variant={ButtonVariant::Secondary}>
                {"✨ New Quote"}
            </Button>

            if !affirmation.is_empty() {
                <div class="panel-glass affirmation-box">
                    <p class="affirmation">{(*affirmation).clone()}</p>
                </div>
            }
            <Button onclick={on_new_affirmation} variant={ButtonVariant::Secondary}>
                {"🌟 New Affirmation"}
            </Button>
        </div>
    }
}

fn random_quote() -> String {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
        .to_string()
}
