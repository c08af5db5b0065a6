use tracing::error;

use crate::errors::ClientError;
use crate::identity::IdentityProvider;
use crate::models::{ChatResponse, ConversationDetail, Message, MessageRole};
use crate::service::chat_client::ChatClient;
use crate::service::transport::Transport;

/// Appended after the assistant reply when the backend reports tool calls.
pub const TOOLS_USED_TEXT: &str = "I've processed your request using tools.";

/// Shown in place of a reply when a request fails for any reason.
pub const ERROR_TEXT: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// What the widget should draw. `is_loading` is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetView {
    Closed,
    OpenEmpty,
    OpenWithHistory,
}

/// A message accepted by [`ChatSession::begin_submit`], ready to hand to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub conversation_id: Option<String>,
}

/// Transient state of one mounted chat widget.
///
/// The conversation id is adopted from the first successful reply and kept for
/// the life of the session; dropping the session is the only way to clear it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    is_open: bool,
    messages: Vec<Message>,
    input: String,
    is_loading: bool,
    conversation_id: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Visibility ───────────────────────────────────────────────────────────

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn view(&self) -> WidgetView {
        match (self.is_open, self.messages.is_empty()) {
            (false, _) => WidgetView::Closed,
            (true, true) => WidgetView::OpenEmpty,
            (true, false) => WidgetView::OpenWithHistory,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Whether a submit of the current input would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty()
    }

    // ── Submit ───────────────────────────────────────────────────────────────

    /// Accepts `text` for sending unless it is blank or a request is in flight.
    ///
    /// On acceptance the user message is appended immediately, the input is
    /// cleared and the session enters the loading state. The caller must follow
    /// up with [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self, text: &str) -> Option<OutgoingMessage> {
        if text.trim().is_empty() || self.is_loading {
            return None;
        }

        self.messages.push(Message::user(text));
        self.input.clear();
        self.is_loading = true;

        Some(OutgoingMessage {
            text: text.to_string(),
            conversation_id: self.conversation_id.clone(),
        })
    }

    /// Applies the outcome of the request started by [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, outcome: Result<ChatResponse, ClientError>) {
        match outcome {
            Ok(response) => {
                if self.conversation_id.is_none() && !response.conversation_id.is_empty() {
                    self.conversation_id = Some(response.conversation_id.clone());
                }
                let used_tools = response.used_tools();
                self.messages.push(Message::assistant(response.response));
                if used_tools {
                    self.messages
                        .push(Message::new("tool", MessageRole::Assistant, TOOLS_USED_TEXT));
                }
            }
            Err(e) => {
                error!("Error sending message: {e}");
                self.push_error();
            }
        }
        self.is_loading = false;
    }

    /// Runs one full submit round trip against `client`.
    /// Returns `false` if the text was rejected without issuing a request.
    pub async fn submit<T, P>(&mut self, text: &str, client: &ChatClient<T, P>) -> bool
    where
        T: Transport,
        P: IdentityProvider,
    {
        let Some(outgoing) = self.begin_submit(text) else {
            return false;
        };
        let outcome = client
            .send_message(&outgoing.text, outgoing.conversation_id.as_deref())
            .await;
        self.finish_submit(outcome);
        true
    }

    // ── Resume ───────────────────────────────────────────────────────────────

    /// A past conversation may only be loaded into a session that has none yet.
    pub fn can_resume(&self) -> bool {
        !self.is_loading && self.conversation_id.is_none() && self.messages.is_empty()
    }

    /// Enters the loading state for a resume. `false` if resuming is not allowed.
    pub fn begin_resume(&mut self) -> bool {
        if !self.can_resume() {
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Adopts the fetched conversation, if any. `Ok(None)` means there was nothing to resume.
    pub fn finish_resume(&mut self, outcome: Result<Option<ConversationDetail>, ClientError>) {
        match outcome {
            Ok(Some(detail)) => {
                if self.conversation_id.is_none() && self.messages.is_empty() {
                    self.conversation_id = Some(detail.conversation.id);
                    self.messages.extend(detail.messages.into_iter().map(Message::from));
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Error loading conversation: {e}");
                self.push_error();
            }
        }
        self.is_loading = false;
    }

    /// Loads the user's most recently updated conversation into an empty session.
    pub async fn resume_latest<T, P>(&mut self, client: &ChatClient<T, P>) -> bool
    where
        T: Transport,
        P: IdentityProvider,
    {
        if !self.begin_resume() {
            return false;
        }
        let outcome = client.latest_conversation().await;
        self.finish_resume(outcome);
        true
    }

    fn push_error(&mut self) {
        self.messages
            .push(Message::new("error", MessageRole::Assistant, ERROR_TEXT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::service::testing::ScriptedTransport;
    use serde_json::json;

    struct SignedIn;

    impl IdentityProvider for SignedIn {
        fn resolve_identity(&self) -> Option<Identity> {
            Some(Identity { user_id: "u1".into(), token: "tok".into() })
        }
    }

    struct SignedOut;

    impl IdentityProvider for SignedOut {
        fn resolve_identity(&self) -> Option<Identity> {
            None
        }
    }

    fn reply(text: &str, conversation_id: &str) -> ChatResponse {
        ChatResponse {
            response: text.into(),
            conversation_id: conversation_id.into(),
            tool_calls: None,
        }
    }

    fn contents(session: &ChatSession) -> Vec<(MessageRole, &str)> {
        session.messages().iter().map(|m| (m.role, m.content.as_str())).collect()
    }

    #[test]
    fn view_tracks_visibility_and_history() {
        let mut session = ChatSession::new();
        assert_eq!(session.view(), WidgetView::Closed);
        session.open();
        assert_eq!(session.view(), WidgetView::OpenEmpty);

        session.begin_submit("hi");
        session.finish_submit(Ok(reply("hello", "c1")));
        assert_eq!(session.view(), WidgetView::OpenWithHistory);

        session.toggle();
        assert_eq!(session.view(), WidgetView::Closed);
        assert_eq!(session.messages().len(), 2);
        session.toggle();
        session.close();
        assert!(!session.is_open());
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut session = ChatSession::new();
        session.set_input("   ");
        for text in ["", "   ", "\n\t"] {
            assert_eq!(session.begin_submit(text), None);
        }
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.input(), "   ");
        assert!(!session.can_submit());
    }

    #[test]
    fn begin_submit_appends_optimistically_and_clears_input() {
        let mut session = ChatSession::new();
        session.set_input("buy milk ");
        assert!(session.can_submit());

        let out = session.begin_submit("buy milk ").unwrap();
        assert_eq!(out, OutgoingMessage { text: "buy milk ".into(), conversation_id: None });
        assert_eq!(contents(&session), vec![(MessageRole::User, "buy milk ")]);
        assert_eq!(session.input(), "");
        assert!(session.is_loading());
    }

    #[test]
    fn submit_while_loading_is_dropped() {
        let mut session = ChatSession::new();
        session.begin_submit("first").unwrap();
        session.set_input("second");
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit("second"), None);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.input(), "second");
    }

    #[test]
    fn success_adopts_conversation_and_appends_reply() {
        let mut session = ChatSession::new();
        session.begin_submit("buy milk").unwrap();
        session.finish_submit(Ok(reply("Added.", "c1")));

        assert_eq!(
            contents(&session),
            vec![(MessageRole::User, "buy milk"), (MessageRole::Assistant, "Added.")]
        );
        assert_eq!(session.conversation_id(), Some("c1"));
        assert!(!session.is_loading());
    }

    #[test]
    fn conversation_id_is_never_replaced() {
        let mut session = ChatSession::new();
        session.begin_submit("one").unwrap();
        session.finish_submit(Ok(reply("a", "c1")));

        let out = session.begin_submit("two").unwrap();
        assert_eq!(out.conversation_id.as_deref(), Some("c1"));
        session.finish_submit(Ok(reply("b", "c2")));
        assert_eq!(session.conversation_id(), Some("c1"));
    }

    #[test]
    fn tool_calls_add_one_notice() {
        let mut session = ChatSession::new();
        session.begin_submit("add two tasks").unwrap();
        let response: ChatResponse = serde_json::from_value(json!({
            "response": "Done.",
            "conversation_id": "c1",
            "tool_calls": [
                {"name": "add_task", "arguments": {"title": "a"}},
                {"name": "add_task", "arguments": {"title": "b"}}
            ]
        }))
        .unwrap();
        session.finish_submit(Ok(response));

        assert_eq!(
            contents(&session),
            vec![
                (MessageRole::User, "add two tasks"),
                (MessageRole::Assistant, "Done."),
                (MessageRole::Assistant, TOOLS_USED_TEXT),
            ]
        );
        assert!(session.messages()[2].id.starts_with("tool-"));
    }

    #[test]
    fn empty_tool_list_adds_no_notice() {
        let mut session = ChatSession::new();
        session.begin_submit("hi").unwrap();
        session.finish_submit(Ok(ChatResponse { tool_calls: Some(vec![]), ..reply("hey", "c1") }));
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn failure_appends_generic_error_and_keeps_no_conversation() {
        let mut session = ChatSession::new();
        session.begin_submit("buy milk").unwrap();
        session.finish_submit(Err(ClientError::server(502, "upstream detail")));

        assert_eq!(
            contents(&session),
            vec![(MessageRole::User, "buy milk"), (MessageRole::Assistant, ERROR_TEXT)]
        );
        assert!(!session.is_loading());
        assert_eq!(session.conversation_id(), None);
        assert!(!session.messages()[1].content.contains("upstream"));
    }

    #[tokio::test]
    async fn submit_round_trip_through_client() {
        let client = ChatClient::new(
            ScriptedTransport::default()
                .reply(json!({"response": "Added.", "conversation_id": "c1"})),
            SignedIn,
        );
        let mut session = ChatSession::new();

        assert!(session.submit("buy milk", &client).await);
        assert_eq!(session.conversation_id(), Some("c1"));
        assert_eq!(session.messages().len(), 2);

        assert!(!session.submit("  ", &client).await);
    }

    #[tokio::test]
    async fn signed_out_submit_shows_error_without_request() {
        let client = ChatClient::new(ScriptedTransport::default(), SignedOut);
        let mut session = ChatSession::new();

        assert!(session.submit("buy milk", &client).await);
        assert_eq!(
            contents(&session),
            vec![(MessageRole::User, "buy milk"), (MessageRole::Assistant, ERROR_TEXT)]
        );
        assert!(!session.is_loading());
    }

    #[test]
    fn resume_only_into_empty_session() {
        let mut session = ChatSession::new();
        assert!(session.can_resume());
        session.begin_submit("hi").unwrap();
        assert!(!session.can_resume());
        session.finish_submit(Ok(reply("hello", "c1")));
        assert!(!session.begin_resume());
    }

    #[tokio::test]
    async fn resume_latest_adopts_history() {
        let client = ChatClient::new(
            ScriptedTransport::default()
                .reply(json!({
                    "conversations": [
                        {"id": "c9", "user_id": "u1", "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"}
                    ],
                    "count": 1
                }))
                .reply(json!({
                    "conversation": {"id": "c9", "user_id": "u1", "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"},
                    "messages": [
                        {"id": "m1", "role": "user", "content": "show my tasks", "created_at": "2024-01-01T00:00:00"},
                        {"id": "m2", "role": "assistant", "content": "You have 2 tasks.", "created_at": "2024-01-01T00:00:02"}
                    ],
                    "message_count": 2
                })),
            SignedIn,
        );
        let mut session = ChatSession::new();

        assert!(session.resume_latest(&client).await);
        assert_eq!(session.conversation_id(), Some("c9"));
        assert_eq!(
            contents(&session),
            vec![
                (MessageRole::User, "show my tasks"),
                (MessageRole::Assistant, "You have 2 tasks."),
            ]
        );
        assert!(!session.is_loading());
        assert!(!session.resume_latest(&client).await);
    }

    #[test]
    fn resume_with_nothing_to_load_leaves_session_empty() {
        let mut session = ChatSession::new();
        assert!(session.begin_resume());
        assert!(session.is_loading());
        session.finish_resume(Ok(None));
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
        assert!(session.can_resume());
    }

    #[test]
    fn resume_failure_appends_error() {
        let mut session = ChatSession::new();
        session.begin_resume();
        session.finish_resume(Err(ClientError::Network("offline".into())));
        assert_eq!(contents(&session), vec![(MessageRole::Assistant, ERROR_TEXT)]);
        assert_eq!(session.conversation_id(), None);
    }
}
