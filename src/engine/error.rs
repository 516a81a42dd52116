use std::time::Duration;
use thiserror::Error;

/// Message shown when a failed run carries no usable detail at all.
pub const RUN_FAILURE_FALLBACK: &str = "Failed to run agents";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Non-2xx reply. `error` is the engine's own message when the body had one.
    #[error("Request failed with status code {status}")]
    Status { status: u16, error: Option<String> },
    #[error("{0}")]
    Transport(String),
    #[error("Malformed engine response: {0}")]
    Decode(String),
    #[error("Run timed out after {0:?}")]
    Timeout(Duration),
}

impl EngineError {
    /// Message surfaced to the user: the engine body first, then the generic
    /// transport description, then [`RUN_FAILURE_FALLBACK`].
    pub fn user_message(&self) -> String {
        if let EngineError::Status {
            error: Some(message),
            ..
        } = self
        {
            if !message.trim().is_empty() {
                return message.clone();
            }
        }

        let generic = self.to_string();
        if generic.trim().is_empty() {
            RUN_FAILURE_FALLBACK.to_string()
        } else {
            generic
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EngineError::Decode(err.to_string())
        } else {
            EngineError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_body_wins() {
        let err = EngineError::Status {
            status: 500,
            error: Some("Error: invalid api key".to_string()),
        };
        assert_eq!(err.user_message(), "Error: invalid api key");
    }

    #[test]
    fn test_blank_body_falls_back_to_status_text() {
        let err = EngineError::Status {
            status: 502,
            error: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), "Request failed with status code 502");
    }

    #[test]
    fn test_transport_message() {
        let err = EngineError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_empty_transport_uses_fallback() {
        let err = EngineError::Transport(String::new());
        assert_eq!(err.user_message(), RUN_FAILURE_FALLBACK);
    }

    #[test]
    fn test_timeout_message() {
        let err = EngineError::Timeout(Duration::from_secs(90));
        assert_eq!(err.user_message(), "Run timed out after 90s");
    }
}
