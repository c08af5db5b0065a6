use leptos::prelude::*;
use leptos::task::spawn_local;

use todo_chat_widget::{ChatSession, ClientConfig};

use crate::api::{BrowserClient, browser_client};

/// Per-widget state, provided via Leptos context.
///
/// Lives exactly as long as the mounted widget; unmounting drops the
/// session and with it the conversation id.
#[derive(Clone, Copy)]
pub struct WidgetState {
    pub session: RwSignal<ChatSession>,
    client: StoredValue<BrowserClient>,
}

impl WidgetState {
    /// Create a new `WidgetState` and provide it in the current Leptos context.
    pub fn provide(config: ClientConfig) -> Self {
        let state = Self {
            session: RwSignal::new(ChatSession::new()),
            client: StoredValue::new(browser_client(config)),
        };
        provide_context(state);
        state
    }

    pub fn open(&self) {
        self.session.update(|s| s.open());
    }

    pub fn close(&self) {
        self.session.update(|s| s.close());
    }

    pub fn set_input(&self, text: String) {
        self.session.update(|s| s.set_input(text));
    }

    /// Send whatever is in the input box. Ignored while a request is in flight.
    pub fn submit(&self) {
        if !self.session.with_untracked(|s| s.can_submit()) {
            return;
        }
        let text = self.session.with_untracked(|s| s.input().to_string());
        let Some(outgoing) = self.session.try_update(|s| s.begin_submit(&text)).flatten() else {
            return;
        };

        let session = self.session;
        let client = self.client.get_value();
        spawn_local(async move {
            let outcome = client
                .send_message(&outgoing.text, outgoing.conversation_id.as_deref())
                .await;
            session.update(|s| s.finish_submit(outcome));
        });
    }

    /// Load the user's most recent conversation into the still-empty widget.
    pub fn resume_latest(&self) {
        if !self.session.try_update(|s| s.begin_resume()).unwrap_or(false) {
            return;
        }

        let session = self.session;
        let client = self.client.get_value();
        spawn_local(async move {
            let outcome = client.latest_conversation().await;
            session.update(|s| s.finish_resume(outcome));
        });
    }
}
