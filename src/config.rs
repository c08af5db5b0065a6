/// Default backend the widget talks to (the todo API's development address).
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Browser storage key under which the sign-in flow leaves the JWT.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Where the client sends requests and where the token lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_key(mut self, token_key: impl Into<String>) -> Self {
        self.token_key = token_key.into();
        self
    }

    /// Joins `path` (which starts with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.api_base, "http://localhost:8000");
        assert_eq!(cfg.token_key, "auth_token");
    }

    #[test]
    fn api_base_trailing_slash_is_dropped() {
        let cfg = ClientConfig::default().with_api_base("https://todo.example.com/");
        assert_eq!(cfg.url("/api/u1/chat"), "https://todo.example.com/api/u1/chat");
    }

    #[test]
    fn empty_base_yields_same_origin_paths() {
        let cfg = ClientConfig::default().with_api_base("");
        assert_eq!(cfg.url("/api/u1/conversations"), "/api/u1/conversations");
    }
}
