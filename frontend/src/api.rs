use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use todo_chat_widget::{
    ApiRequest, ChatClient, ClientConfig, ClientError, JwtIdentity, Method, Transport,
};

use crate::storage::LocalStorageTokens;

/// Base URL of the todo API server.
const API_BASE: &str = "http://localhost:8000";

/// localStorage key the login page writes the JWT to.
pub const TOKEN_KEY: &str = "auth_token";

pub type BrowserClient = ChatClient<GlooTransport, JwtIdentity<LocalStorageTokens>>;

pub fn client_config() -> ClientConfig {
    ClientConfig::default()
        .with_api_base(API_BASE)
        .with_token_key(TOKEN_KEY)
}

/// Builds the chat client used by the widget.
pub fn browser_client(config: ClientConfig) -> BrowserClient {
    let tokens = LocalStorageTokens::new(config.token_key.clone());
    ChatClient::new(GlooTransport::new(config), JwtIdentity::new(tokens))
}

/// `fetch`-backed transport.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    config: ClientConfig,
}

impl GlooTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.config.url(&request.path);
        let authorization = request.authorization();

        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        }
        .header("Authorization", &authorization);

        let sent = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ClientError::Serialize(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::server(resp.status(), body));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
