mod jwt;

use tracing::warn;

pub use jwt::{decode_subject, JwtError};

/// Somewhere a sign-in flow left a bearer token.
pub trait TokenStore {
    fn load_token(&self) -> Option<String>;

    /// True if any non-empty token is stored, decodable or not.
    fn has_token(&self) -> bool {
        self.load_token().is_some_and(|t| !t.is_empty())
    }
}

/// Who the requests are made for, and the credential that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub token: String,
}

/// Resolves the current user. Handed to the client at construction.
pub trait IdentityProvider {
    /// `None` when there is no token or it cannot be decoded. Never errors.
    fn resolve_identity(&self) -> Option<Identity>;
}

/// Identity taken from the `sub` claim of a JWT held in a [`TokenStore`].
#[derive(Debug, Clone)]
pub struct JwtIdentity<S> {
    store: S,
}

impl<S: TokenStore> JwtIdentity<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn has_token(&self) -> bool {
        self.store.has_token()
    }
}

impl<S: TokenStore> IdentityProvider for JwtIdentity<S> {
    fn resolve_identity(&self) -> Option<Identity> {
        let token = self.store.load_token().filter(|t| !t.is_empty())?;
        match decode_subject(&token) {
            Ok(user_id) => Some(Identity { user_id, token }),
            Err(e) => {
                warn!("Error decoding JWT token: {e}");
                None
            }
        }
    }
}

/// Fixed in-process token, for hosts without browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load_token(&self) -> Option<String> {
        self.token.clone()
    }
}
