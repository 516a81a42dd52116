pub mod agent;
pub mod model;
pub mod run;

pub use agent::{AgentKind, AgentSpec};
pub use model::{DefaultConfig, ModelDescriptor};
pub use run::{RunOutcome, RunReply, RunRequest};

/// Lifecycle of the single run owned by the run controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,      // Nothing submitted yet
    Running,   // Request in flight, Execute disabled
    Completed, // Engine replied with a result
    Failed,    // Engine or transport reported an error
}

impl RunState {
    pub fn as_str(&self) -> &str {
        match self {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
            RunState::Completed => "Completed",
            RunState::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}
