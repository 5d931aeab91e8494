//! HTTP chat backend

use super::{ChatBackend, ChatReply, ChatRequest, ClientError};
use crate::config::ChatConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Posts `{"message": ...}` to a fixed endpoint and expects `{"response": ...}`
pub struct HttpChatBackend {
    client: Client,
    endpoint: String,
}

impl HttpChatBackend {
    /// Build a backend. `timeout` is handed to the transport as-is; `None`
    /// leaves reqwest's default (no overall deadline).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ClientError> {
        Self::new(config.endpoint.clone(), config.timeout)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::malformed(format!("Invalid reply body: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
