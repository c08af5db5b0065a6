pub mod chat_session;
pub mod keyboard;
