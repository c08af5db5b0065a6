use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Messages ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MessageRole {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// A message shown in the widget. Never mutated once pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Builds a message stamped now. `kind` prefixes the id (`user`, `bot`, `tool`, `error`).
    pub fn new(kind: &str, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: format!("{kind}-{}", uuid::Uuid::new_v4()),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("bot", MessageRole::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Local wall-clock time as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

// ── Chat envelopes ───────────────────────────────────────────────────────────

/// Body of `POST /api/{user_id}/chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// A tool invocation reported by the backend. Acknowledged, never interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatResponse {
    pub fn used_tools(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }
}

// ── Conversations ────────────────────────────────────────────────────────────

/// Server-side conversation record; timestamps stay as the server formatted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Response of `GET /api/{user_id}/conversations`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationList {
    pub conversations: Vec<Conversation>,
    pub count: usize,
}

impl ConversationList {
    /// The conversation with the greatest `updated_at`. The server emits ISO-8601,
    /// so lexical order is chronological order.
    pub fn most_recent(&self) -> Option<&Conversation> {
        self.conversations.iter().max_by(|a, b| a.updated_at.cmp(&b.updated_at))
    }
}

/// A stored message as returned by the conversation detail endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: String,
}

impl From<HistoryMessage> for Message {
    fn from(m: HistoryMessage) -> Self {
        let timestamp = parse_server_timestamp(&m.created_at).unwrap_or_else(Utc::now);
        Message { id: m.id, role: m.role, content: m.content, timestamp }
    }
}

/// Response of `GET /api/{user_id}/conversations/{conversation_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub messages: Vec<HistoryMessage>,
    pub message_count: usize,
}

/// Accepts RFC 3339 as well as the naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` form, read as UTC.
fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
