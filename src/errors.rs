use thiserror::Error;

/// Failure of a single chat client call.
/// Every variant carries enough context for a log line; none of it is shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Identity errors ──────────────────────────────────────────────────────
    #[error("User not authenticated. Cannot {operation}.")]
    NotAuthenticated { operation: &'static str },

    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status}")]
    Server { status: u16, body: String },

    // ── Payload errors ───────────────────────────────────────────────────────
    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Parse error: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn not_authenticated(operation: &'static str) -> Self {
        ClientError::NotAuthenticated { operation }
    }

    pub fn server(status: u16, body: impl Into<String>) -> Self {
        ClientError::Server { status, body: body.into() }
    }

    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated { .. })
    }

    pub fn is_server(&self) -> bool {
        matches!(self, ClientError::Server { .. })
    }

    /// Status code of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
