pub mod error;
pub mod http;
pub mod mock;

pub use error::{EngineError, RUN_FAILURE_FALLBACK};
pub use http::HttpEngineClient;
pub use mock::MockEngine;

use async_trait::async_trait;

use crate::types::{DefaultConfig, ModelDescriptor, RunReply, RunRequest};

/// The remote execution engine. Only these three operations are used; what
/// the engine does with the agents is opaque to this crate.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// `GET /api/models`
    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, EngineError>;

    /// `GET /api/default-config`
    async fn fetch_default_config(&self) -> Result<DefaultConfig, EngineError>;

    /// `POST /api/run`. Non-2xx replies come back as [`EngineError::Status`].
    async fn run(&self, request: RunRequest) -> Result<RunReply, EngineError>;
}
