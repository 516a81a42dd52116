use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{EngineClient, EngineError};
use crate::types::{DefaultConfig, ModelDescriptor, RunReply, RunRequest};

/// Scripted engine for tests and offline use. Counts every call it receives.
pub struct MockEngine {
    models: Result<Vec<ModelDescriptor>, EngineError>,
    default_config: Result<DefaultConfig, EngineError>,
    run_reply: Result<RunReply, EngineError>,
    run_delay: Option<Duration>,
    stall_models: bool,
    stall_default_config: bool,
    model_calls: AtomicUsize,
    config_calls: AtomicUsize,
    run_calls: AtomicUsize,
    last_request: Mutex<Option<RunRequest>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            models: Ok(Vec::new()),
            default_config: Ok(DefaultConfig::default()),
            run_reply: Ok(RunReply::completed(None, None)),
            run_delay: None,
            stall_models: false,
            stall_default_config: false,
            model_calls: AtomicUsize::new(0),
            config_calls: AtomicUsize::new(0),
            run_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_models(mut self, models: Result<Vec<ModelDescriptor>, EngineError>) -> Self {
        self.models = models;
        self
    }

    pub fn with_default_config(mut self, config: Result<DefaultConfig, EngineError>) -> Self {
        self.default_config = config;
        self
    }

    pub fn with_run_reply(mut self, reply: Result<RunReply, EngineError>) -> Self {
        self.run_reply = reply;
        self
    }

    pub fn with_run_delay(mut self, delay: Duration) -> Self {
        self.run_delay = Some(delay);
        self
    }

    /// `fetch_models` never replies.
    pub fn with_stalled_models(mut self) -> Self {
        self.stall_models = true;
        self
    }

    /// `fetch_default_config` never replies.
    pub fn with_stalled_default_config(mut self) -> Self {
        self.stall_default_config = true;
        self
    }

    pub fn model_calls(&self) -> usize {
        self.model_calls.load(Ordering::SeqCst)
    }

    pub fn config_calls(&self) -> usize {
        self.config_calls.load(Ordering::SeqCst)
    }

    pub fn run_calls(&self) -> usize {
        self.run_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RunRequest> {
        self.last_request.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineClient for MockEngine {
    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, EngineError> {
        self.model_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_models {
            std::future::pending::<()>().await;
        }
        self.models.clone()
    }

    async fn fetch_default_config(&self) -> Result<DefaultConfig, EngineError> {
        self.config_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_default_config {
            std::future::pending::<()>().await;
        }
        self.default_config.clone()
    }

    async fn run(&self, request: RunRequest) -> Result<RunReply, EngineError> {
        self.run_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request);
        }

        if let Some(delay) = self.run_delay {
            tokio::time::sleep(delay).await;
        }

        self.run_reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentKind, AgentSpec};

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let engine = MockEngine::new();

        engine.fetch_models().await.unwrap();
        engine.fetch_default_config().await.unwrap();
        engine.fetch_default_config().await.unwrap();

        assert_eq!(engine.model_calls(), 1);
        assert_eq!(engine.config_calls(), 2);
        assert_eq!(engine.run_calls(), 0);
    }

    #[tokio::test]
    async fn test_mock_stalled_fetch_never_replies() {
        let engine = MockEngine::new().with_stalled_models();

        let stalled = tokio::time::timeout(Duration::from_millis(50), engine.fetch_models()).await;

        assert!(stalled.is_err());
        assert_eq!(engine.model_calls(), 1);
        assert!(engine.fetch_default_config().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_records_last_request() {
        let engine = MockEngine::new().with_run_reply(Err(EngineError::Transport(String::new())));
        let request = RunRequest {
            api_key: "k".to_string(),
            model_id: "m".to_string(),
            prompt: "hello".to_string(),
            agents: vec![AgentSpec::new("A", AgentKind::CodeAgent, "d")],
        };

        let result = engine.run(request.clone()).await;

        assert!(result.is_err());
        assert_eq!(engine.last_request(), Some(request));
    }
}
