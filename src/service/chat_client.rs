use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::errors::ClientError;
use crate::identity::{Identity, IdentityProvider};
use crate::models::{ChatRequest, ChatResponse, ConversationDetail, ConversationList};
use crate::service::transport::{ApiRequest, Transport};

/// Shapes user-scoped requests to the chat API.
///
/// Holds no state of its own: identity is resolved afresh on every call, so a
/// sign-out between calls takes effect immediately.
#[derive(Debug, Clone)]
pub struct ChatClient<T, P> {
    transport: T,
    identity: P,
}

impl<T: Transport, P: IdentityProvider> ChatClient<T, P> {
    pub fn new(transport: T, identity: P) -> Self {
        Self { transport, identity }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn identity_provider(&self) -> &P {
        &self.identity
    }

    /// `None` if the user is not signed in. Decoding failures are logged by the provider.
    pub fn resolve_identity(&self) -> Option<Identity> {
        self.identity.resolve_identity()
    }

    fn require_identity(&self, operation: &'static str) -> Result<Identity, ClientError> {
        self.resolve_identity()
            .ok_or(ClientError::not_authenticated(operation))
    }

    /// POST `/api/{user_id}/chat`
    pub async fn send_message(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatResponse, ClientError> {
        let identity = self.require_identity("access chat")?;
        let body = ChatRequest {
            message: message.to_string(),
            conversation_id: conversation_id.map(|s| s.to_string()),
        };
        let body = serde_json::to_value(&body).map_err(|e| ClientError::Serialize(e.to_string()))?;
        let request = ApiRequest::post(user_path(&identity, "/chat"), identity.token, body);

        self.call(request).await.inspect_err(|e| {
            error!("Error sending message: {e}");
        })
    }

    /// GET `/api/{user_id}/conversations`
    pub async fn list_conversations(&self) -> Result<ConversationList, ClientError> {
        let identity = self.require_identity("access conversations")?;
        let request = ApiRequest::get(user_path(&identity, "/conversations"), identity.token);

        self.call(request).await.inspect_err(|e| {
            error!("Error fetching conversations: {e}");
        })
    }

    /// GET `/api/{user_id}/conversations/{conversation_id}`
    pub async fn get_conversation_detail(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationDetail, ClientError> {
        let identity = self.require_identity("access conversation details")?;
        let suffix = format!("/conversations/{}", urlencoding::encode(conversation_id));
        let request = ApiRequest::get(user_path(&identity, &suffix), identity.token);

        self.call(request).await.inspect_err(|e| {
            error!("Error fetching conversation details: {e}");
        })
    }

    /// Detail of the most recently updated conversation, or `None` if the user has none.
    pub async fn latest_conversation(&self) -> Result<Option<ConversationDetail>, ClientError> {
        let list = self.list_conversations().await?;
        match list.most_recent() {
            Some(conversation) => self.get_conversation_detail(&conversation.id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        debug!("{} {}", request.method.as_str(), request.path);
        let value = self.transport.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn user_path(identity: &Identity, suffix: &str) -> String {
    format!("/api/{}{suffix}", urlencoding::encode(&identity.user_id))
}
