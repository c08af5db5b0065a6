use leptos::ev;
use leptos::prelude::*;

use todo_chat_widget::TokenStore;

use crate::api::{TOKEN_KEY, client_config};
use crate::components::chat::ChatPanel;
use crate::components::launcher::Launcher;
use crate::state::WidgetState;
use crate::storage::LocalStorageTokens;

/// Mounts the widget only while a sign-in token is present.
///
/// Re-checks on `storage` events so signing out in another tab tears the
/// widget down.
#[component]
pub fn ChatbotGate() -> impl IntoView {
    let tokens = LocalStorageTokens::new(TOKEN_KEY);
    let (signed_in, set_signed_in) = signal(tokens.has_token());

    let handle = window_event_listener(ev::storage, move |_| {
        set_signed_in.set(tokens.has_token());
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || signed_in.get()>
            <ChatWidget />
        </Show>
    }
}

/// Floating launcher plus the chat panel; owns one chat session.
#[component]
fn ChatWidget() -> impl IntoView {
    let state = WidgetState::provide(client_config());
    let is_open = Memo::new(move |_| state.session.with(|s| s.is_open()));

    view! {
        {move || {
            if is_open.get() {
                view! { <ChatPanel /> }.into_any()
            } else {
                view! { <Launcher /> }.into_any()
            }
        }}
    }
}
