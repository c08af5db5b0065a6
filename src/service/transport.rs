use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One fully shaped API call. `path` is relative to the configured API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>, bearer: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), bearer: bearer.into(), body: None }
    }

    pub fn post(path: impl Into<String>, bearer: impl Into<String>, body: Value) -> Self {
        Self { method: Method::Post, path: path.into(), bearer: bearer.into(), body: Some(body) }
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer)
    }
}

/// Carries an [`ApiRequest`] to the backend and returns the JSON body of a
/// successful response. Non-2xx statuses map to [`ClientError::Server`].
///
/// Futures are not `Send`: the browser implementation runs on the JS event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError>;
}
