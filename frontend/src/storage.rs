use todo_chat_widget::TokenStore;

/// Reads the sign-in token from `window.localStorage`.
///
/// Storage is looked up on every read so a token written by the login page
/// (or removed on sign-out) is seen without remounting.
#[derive(Clone, Debug)]
pub struct LocalStorageTokens {
    key: String,
}

impl LocalStorageTokens {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for LocalStorageTokens {
    fn load_token(&self) -> Option<String> {
        let storage = match web_sys::window()?.local_storage() {
            Ok(storage) => storage?,
            Err(e) => {
                log::warn!("localStorage unavailable: {e:?}");
                return None;
            }
        };
        storage.get_item(&self.key).ok().flatten()
    }
}
