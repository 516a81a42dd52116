use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{EngineClient, EngineError};
use crate::types::{DefaultConfig, ModelDescriptor, RunReply, RunRequest};

#[derive(Debug, Clone)]
pub struct HttpEngineClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpEngineClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agentdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, EngineError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            return Err(EngineError::Status {
                status: status.as_u16(),
                error,
            });
        }

        serde_json::from_slice(&body).map_err(|e| EngineError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EngineClient for HttpEngineClient {
    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, EngineError> {
        let response = self.client.get(self.endpoint("/api/models")).send().await?;
        Self::read_json(response).await
    }

    async fn fetch_default_config(&self) -> Result<DefaultConfig, EngineError> {
        let response = self
            .client
            .get(self.endpoint("/api/default-config"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn run(&self, request: RunRequest) -> Result<RunReply, EngineError> {
        log::debug!(
            "POST {} with {} agent(s)",
            self.endpoint("/api/run"),
            request.agents.len()
        );

        let response = self
            .client
            .post(self.endpoint("/api/run"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
