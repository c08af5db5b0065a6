use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;
use crate::service::transport::{ApiRequest, Transport};

/// Records every request and answers from a queue of canned replies.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Value, ClientError>>>,
    pub requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn reply(self, body: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(body));
        self
    }

    pub fn fail(self, err: ClientError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted reply".into())))
    }
}
