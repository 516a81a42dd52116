pub mod controller;
pub mod transcript;

pub use controller::{
    RunController, FAILURE_NOTICE, LOGS_PLACEHOLDER, RESULT_PLACEHOLDER, START_BANNER,
    SUCCESS_BANNER, SUCCESS_NOTICE, UNKNOWN_ENGINE_ERROR,
};
pub use transcript::Transcript;

use std::time::Duration;

use crate::engine::{EngineClient, EngineError};
use crate::types::{RunReply, RunRequest};

/// Sends one run to the engine, optionally bounded by `timeout`.
///
/// Without a timeout the call waits for as long as the engine takes.
pub async fn dispatch(
    engine: &dyn EngineClient,
    request: RunRequest,
    timeout: Option<Duration>,
) -> Result<RunReply, EngineError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, engine.run(request)).await {
            Ok(reply) => reply,
            Err(_) => Err(EngineError::Timeout(limit)),
        },
        None => engine.run(request).await,
    }
}
