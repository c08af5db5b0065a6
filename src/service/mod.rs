pub mod chat_client;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
