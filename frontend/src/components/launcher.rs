use leptos::prelude::*;

use crate::state::WidgetState;

/// Speech-bubble icon shared by the launcher and the panel.
#[component]
pub fn ChatIcon(#[prop(default = "24")] size: &'static str) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width=size
            height=size
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
        >
            <path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z" />
        </svg>
    }
}

/// Round button pinned to the bottom-right corner while the panel is closed.
#[component]
pub fn Launcher() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    view! {
        <button
            class="chat-launcher"
            aria-label="Open AI Chatbot"
            on:click=move |_| state.open()
        >
            <ChatIcon />
            <span class="sr-only">"Open AI Chatbot"</span>
        </button>
    }
}
