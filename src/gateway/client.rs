use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one user message and resolves to the backend's reply text.
    async fn send(&self, message: &str) -> GatewayResult<String>;

    /// Probes the backend's liveness endpoint.
    async fn health(&self) -> GatewayResult<()>;
}

pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        reqwest::Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid API URL {base_url:?}: {e}")))?;

        // No timeout: a hung backend keeps the request outstanding.
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> GatewayResult<String> {
        let url = self.endpoint("chat");
        debug!("POST {} ({} chars)", url, message.chars().count());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Chat backend answered {} for {}", status, url);
            return Err(GatewayError::status(status));
        }

        let body = response.bytes().await.map_err(GatewayError::transport)?;
        let reply: ChatResponse = serde_json::from_slice(&body).map_err(GatewayError::decode)?;

        debug!("Received reply ({} chars)", reply.response.chars().count());
        Ok(reply.response)
    }

    async fn health(&self) -> GatewayResult<()> {
        let url = self.endpoint("health");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::status(status));
        }
        Ok(())
    }
}
