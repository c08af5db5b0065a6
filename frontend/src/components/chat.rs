use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use todo_chat_widget::{KeyAction, Message, WidgetView, key_action};

use crate::components::launcher::ChatIcon;
use crate::state::WidgetState;

/// Example prompts offered on an empty conversation.
const SUGGESTIONS: [&str; 3] = [
    "Add task 'buy groceries'",
    "Show my tasks",
    "Mark task 1 as complete",
];

/// The open chat panel: header, message history, input.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let messages = Memo::new(move |_| state.session.with(|s| s.messages().to_vec()));
    let is_loading = Memo::new(move |_| state.session.with(|s| s.is_loading()));
    let widget_view = Memo::new(move |_| state.session.with(|s| s.view()));
    let pane = NodeRef::<html::Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        messages.track();
        is_loading.track();
        if let Some(el) = pane.get() {
            Timeout::new(0, move || el.set_scroll_top(el.scroll_height())).forget();
        }
    });

    view! {
        <div class="chat-panel">
            <div class="chat-header">
                <div class="chat-title">
                    <div class="chat-avatar">
                        <ChatIcon size="20" />
                    </div>
                    <div>
                        <h3>"AI Todo Assistant"</h3>
                        <p>"Always here to help"</p>
                    </div>
                </div>
                <button
                    class="close-btn"
                    aria-label="Close chat"
                    on:click=move |_| state.close()
                >
                    "×"
                </button>
            </div>

            <div class="messages-container" node_ref=pane>
                {move || {
                    if widget_view.get() == WidgetView::OpenEmpty {
                        view! { <EmptyState /> }.into_any()
                    } else {
                        view! {
                            <For
                                each=move || messages.get()
                                key=|m| m.id.clone()
                                let:msg
                            >
                                <MessageBubble message=msg />
                            </For>
                        }.into_any()
                    }
                }}
                <Show when=move || is_loading.get()>
                    <TypingIndicator />
                </Show>
            </div>

            <ChatInput is_loading=is_loading />
        </div>
    }
}

/// Greeting, example prompts and the resume button.
#[component]
fn EmptyState() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let can_resume = move || state.session.with(|s| s.can_resume());

    view! {
        <div class="empty-state">
            <div class="empty-icon">
                <ChatIcon size="32" />
            </div>
            <h3>"Hello! I'm your AI Assistant"</h3>
            <p>"Manage your tasks using natural language"</p>
            <div class="suggestions">
                {SUGGESTIONS
                    .into_iter()
                    .map(|prompt| {
                        view! {
                            <button
                                class="suggestion"
                                on:click=move |_| state.set_input(prompt.to_string())
                            >
                                {prompt}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <Show when=can_resume>
                <button class="resume-btn" on:click=move |_| state.resume_latest()>
                    "Continue last conversation"
                </button>
            </Show>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = if message.is_user() {
        "message user"
    } else {
        "message assistant"
    };
    let time = message.time_label();

    view! {
        <div class=css_class>
            <div class="bubble">
                <div class="content">{message.content}</div>
                <div class="timestamp">{time}</div>
            </div>
        </div>
    }
}

/// Assistant-side bubble shown while a request is in flight.
#[component]
fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="message assistant">
            <div class="bubble typing">
                <span class="dot"></span>
                <span class="dot"></span>
                <span class="dot"></span>
            </div>
        </div>
    }
}

/// Message input with send button.
#[component]
fn ChatInput(is_loading: Memo<bool>) -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let input = move || state.session.with(|s| s.input().to_string());

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if key_action(&ev.key(), ev.shift_key()) == KeyAction::Submit {
            ev.prevent_default();
            state.submit();
        }
    };

    view! {
        <div class="input-area">
            <div class="input-row">
                <textarea
                    rows="1"
                    placeholder="Ask me to manage your tasks..."
                    aria-label="Type your message"
                    prop:value=input
                    on:input=move |ev| state.set_input(event_target_value(&ev))
                    on:keydown=on_keydown
                    disabled=move || is_loading.get()
                />
                <button
                    class="send-btn"
                    aria-label="Send message"
                    on:click=move |_| state.submit()
                    disabled=move || !state.session.with(|s| s.can_submit())
                >
                    {move || if is_loading.get() { "Sending…" } else { "Send" }}
                </button>
            </div>
            <p class="input-hint">"Natural language task management"</p>
        </div>
    }
}
