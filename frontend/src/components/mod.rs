pub mod chat;
pub mod gate;
pub mod launcher;
