//! Headless core of the todo assistant chat widget: the API client, token
//! identity, and the widget session state that the Leptos frontend renders.

pub mod config;
pub mod errors;
pub mod identity;
pub mod models;
pub mod service;
pub mod widget;

pub use config::ClientConfig;
pub use errors::ClientError;
pub use identity::{Identity, IdentityProvider, JwtIdentity, MemoryTokenStore, TokenStore};
pub use models::{
    ChatRequest, ChatResponse, Conversation, ConversationDetail, ConversationList, HistoryMessage,
    Message, MessageRole, ToolCall,
};
pub use service::chat_client::ChatClient;
pub use service::transport::{ApiRequest, Method, Transport};
pub use widget::chat_session::{ChatSession, OutgoingMessage, WidgetView, ERROR_TEXT, TOOLS_USED_TEXT};
pub use widget::keyboard::{key_action, KeyAction};
