use thiserror::Error;

/// Local checks performed before a run reaches the engine, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Please set your Cerebras API key")]
    MissingCredential,
    #[error("Please enter a prompt")]
    EmptyPrompt,
    #[error("Please add at least one agent")]
    NoAgents,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error("A run is already in progress")]
    AlreadyRunning,
    #[error("No run is in progress")]
    NotRunning,
}
