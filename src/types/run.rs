use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::AgentSpec;

/// Body of `POST /api/run`, assembled right before submission and never stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub api_key: String,
    pub model_id: String,
    pub prompt: String,
    pub agents: Vec<AgentSpec>,
}

impl fmt::Debug for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunRequest")
            .field("api_key", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("prompt", &self.prompt)
            .field("agents", &self.agents)
            .finish()
    }
}

/// Successful (2xx) reply of `POST /api/run`, discriminated by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunReply {
    Completed {
        #[serde(default)]
        execution_logs: Option<String>,
        #[serde(default)]
        result: Option<Value>,
    },
    Error {
        #[serde(default)]
        error: Option<String>,
    },
}

impl RunReply {
    pub fn completed(execution_logs: Option<&str>, result: Option<&str>) -> Self {
        RunReply::Completed {
            execution_logs: execution_logs.map(str::to_string),
            result: result.map(|r| Value::String(r.to_string())),
        }
    }

    pub fn error(message: Option<&str>) -> Self {
        RunReply::Error {
            error: message.map(str::to_string),
        }
    }
}

/// The single outcome a run ends with. A new run discards the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Completed { logs: String, result: String },
    Failed { message: String },
}

/// Renders the engine's `result` field as display text.
///
/// Falsy values (`null`, `false`, `0`, `""`) count as absent. Other strings
/// are taken verbatim and anything else is shown as compact JSON.
pub fn render_result(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentKind;

    #[test]
    fn test_request_uses_engine_field_names() {
        let request = RunRequest {
            api_key: "k".to_string(),
            model_id: "cerebras/llama3.1-8b".to_string(),
            prompt: "hello".to_string(),
            agents: vec![AgentSpec::new("A", AgentKind::ToolCallingAgent, "d")],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["apiKey"], "k");
        assert_eq!(json["modelId"], "cerebras/llama3.1-8b");
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["agents"][0]["type"], "ToolCallingAgent");
    }

    #[test]
    fn test_request_debug_hides_key() {
        let request = RunRequest {
            api_key: "sk-secret".to_string(),
            model_id: "m".to_string(),
            prompt: "p".to_string(),
            agents: vec![],
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("sk-secret"));
    }

    #[test]
    fn test_reply_completed_with_fields() {
        let reply: RunReply = serde_json::from_str(
            r#"{"status": "completed", "execution_logs": "L", "result": "R", "message": "ok"}"#,
        )
        .unwrap();

        assert_eq!(reply, RunReply::completed(Some("L"), Some("R")));
    }

    #[test]
    fn test_reply_completed_without_fields() {
        let reply: RunReply = serde_json::from_str(r#"{"status": "completed"}"#).unwrap();
        assert_eq!(reply, RunReply::completed(None, None));
    }

    #[test]
    fn test_reply_error() {
        let reply: RunReply =
            serde_json::from_str(r#"{"status": "error", "error": "bad key"}"#).unwrap();
        assert_eq!(reply, RunReply::error(Some("bad key")));
    }

    #[test]
    fn test_reply_unknown_status_is_malformed() {
        let result: Result<RunReply, _> = serde_json::from_str(r#"{"status": "queued"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_result() {
        assert_eq!(render_result(None), None);
        assert_eq!(render_result(Some(&Value::Null)), None);
        assert_eq!(render_result(Some(&serde_json::json!(false))), None);
        assert_eq!(render_result(Some(&serde_json::json!(0))), None);
        assert_eq!(render_result(Some(&serde_json::json!(0.0))), None);
        assert_eq!(render_result(Some(&serde_json::json!(""))), None);
        assert_eq!(render_result(Some(&serde_json::json!(true))), Some("true".to_string()));
        assert_eq!(render_result(Some(&serde_json::json!(7))), Some("7".to_string()));
        assert_eq!(
            render_result(Some(&Value::String("done".to_string()))),
            Some("done".to_string())
        );
        assert_eq!(
            render_result(Some(&serde_json::json!({"km": 2}))),
            Some(r#"{"km":2}"#.to_string())
        );
    }
}
