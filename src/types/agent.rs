use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    #[default]
    ToolCallingAgent,
    CodeAgent,
}

impl AgentKind {
    /// Wire name understood by the execution engine.
    pub fn as_str(&self) -> &str {
        match self {
            AgentKind::ToolCallingAgent => "ToolCallingAgent",
            AgentKind::CodeAgent => "CodeAgent",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AgentKind::ToolCallingAgent => "Tool Calling Agent",
            AgentKind::CodeAgent => "Code Agent",
        }
    }

    /// Accepts the wire name, the label, or the short forms `tool` and `code`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "toolcallingagent" | "tool calling agent" | "tool" => Some(AgentKind::ToolCallingAgent),
            "codeagent" | "code agent" | "code" => Some(AgentKind::CodeAgent),
            _ => None,
        }
    }
}

/// An agent definition forwarded verbatim to the engine.
///
/// Agents are identified by their position in the registry, so two specs may
/// share a name. No field is validated on this side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    pub description: String,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, kind: AgentKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
        }
    }

    /// Template used when the dialog creates a new agent.
    pub fn blank() -> Self {
        Self::default()
    }
}
