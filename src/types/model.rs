use serde::{Deserialize, Serialize};

use super::AgentSpec;

/// Catalog entry served by `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub params: String,
    pub speed: String,
}

impl ModelDescriptor {
    pub fn caption(&self) -> String {
        format!("{} • {}", self.params, self.speed)
    }
}

/// Payload of `GET /api/default-config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultConfig {
    pub agents: Vec<AgentSpec>,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentKind;

    #[test]
    fn test_caption() {
        let model = ModelDescriptor {
            id: "cerebras/llama3.1-8b".to_string(),
            name: "Llama 3.1 8B".to_string(),
            params: "8 billion".to_string(),
            speed: "~2200 tokens/s".to_string(),
        };
        assert_eq!(model.caption(), "8 billion • ~2200 tokens/s");
    }

    #[test]
    fn test_default_config_parse() {
        let config: DefaultConfig = serde_json::from_str(
            r#"{
                "agents": [
                    {"name": "web_agent", "type": "ToolCallingAgent", "description": "web"},
                    {"name": "calc_agent", "type": "CodeAgent", "description": "calc"}
                ],
                "prompt": "Plan a weekend"
            }"#,
        )
        .unwrap();

        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].kind, AgentKind::CodeAgent);
        assert_eq!(config.prompt, "Plan a weekend");
    }
}
