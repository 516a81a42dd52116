use std::time::Duration;

use super::{dispatch, Transcript};
use crate::engine::{EngineClient, EngineError};
use crate::error::{PreconditionError, RunError};
use crate::types::run::render_result;
use crate::types::{AgentSpec, RunOutcome, RunReply, RunRequest, RunState};

pub const START_BANNER: &str = "🚀 Starting multi-agent execution...";
pub const SUCCESS_BANNER: &str = "✅ Execution completed successfully!";
pub const LOGS_PLACEHOLDER: &str = "No execution logs available";
pub const RESULT_PLACEHOLDER: &str = "No result available";
pub const UNKNOWN_ENGINE_ERROR: &str = "Unknown error occurred";
pub const SUCCESS_NOTICE: &str = "Agent execution completed!";
pub const FAILURE_NOTICE: &str = "Agent execution failed!";

/// State machine for the single run the client can have at a time.
///
/// `Idle -> Running -> Completed | Failed`, and a new run may start from any
/// state except `Running`. The `Running` state is the only guard against
/// concurrent submissions.
#[derive(Debug, Clone, Default)]
pub struct RunController {
    state: RunState,
    transcript: Transcript,
    outcome: Option<RunOutcome>,
    error: Option<String>,
}

impl RunController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks preconditions, enters `Running` and returns the request to send.
    ///
    /// A failed precondition sets the inline error and leaves everything else,
    /// state included, as it was. Nothing is written to the transcript.
    pub fn begin(
        &mut self,
        api_key: &str,
        model_id: &str,
        prompt: &str,
        agents: &[AgentSpec],
    ) -> Result<RunRequest, RunError> {
        if self.state == RunState::Running {
            return Err(RunError::AlreadyRunning);
        }

        if let Err(err) = check_preconditions(api_key, prompt, agents) {
            log::debug!("Run rejected before submission: {}", err);
            self.error = Some(err.to_string());
            return Err(err.into());
        }

        self.transcript.reset();
        self.outcome = None;
        self.error = None;
        self.state = RunState::Running;
        self.transcript.push_line(START_BANNER);

        log::info!(
            "Starting run with model {} and {} agent(s)",
            model_id,
            agents.len()
        );

        Ok(RunRequest {
            api_key: api_key.to_string(),
            model_id: model_id.to_string(),
            prompt: prompt.to_string(),
            agents: agents.to_vec(),
        })
    }

    /// Records the engine's answer (or the failure to get one) for the run in flight.
    pub fn finish(&mut self, reply: Result<RunReply, EngineError>) -> Result<&RunOutcome, RunError> {
        if self.state != RunState::Running {
            return Err(RunError::NotRunning);
        }

        let outcome = match reply {
            Ok(RunReply::Completed {
                execution_logs,
                result,
            }) => {
                let logs = execution_logs
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| LOGS_PLACEHOLDER.to_string());
                let result = render_result(result.as_ref())
                    .unwrap_or_else(|| RESULT_PLACEHOLDER.to_string());

                self.transcript.push_line(SUCCESS_BANNER);
                self.state = RunState::Completed;
                log::info!("Run completed");
                RunOutcome::Completed { logs, result }
            }
            // Engine-reported errors are not echoed to the transcript; only the
            // transport path below appends a failure line.
            Ok(RunReply::Error { error }) => {
                let message = error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ENGINE_ERROR.to_string());

                self.error = Some(message.clone());
                self.state = RunState::Failed;
                log::warn!("Engine reported a run error: {}", message);
                RunOutcome::Failed { message }
            }
            Err(err) => {
                let message = err.user_message();

                self.transcript.push_line(&format!("❌ Error: {}", message));
                self.error = Some(message.clone());
                self.state = RunState::Failed;
                log::warn!("Run failed: {}", message);
                RunOutcome::Failed { message }
            }
        };

        let outcome: &RunOutcome = self.outcome.insert(outcome);
        Ok(outcome)
    }

    /// Runs `begin`, the engine call and `finish` back to back.
    pub async fn submit(
        &mut self,
        engine: &dyn EngineClient,
        api_key: &str,
        model_id: &str,
        prompt: &str,
        agents: &[AgentSpec],
        timeout: Option<Duration>,
    ) -> Result<&RunOutcome, RunError> {
        let request = self.begin(api_key, model_id, prompt, agents)?;
        let reply = dispatch(engine, request, timeout).await;
        self.finish(reply)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Inline error: a rejected precondition or the failure message of the last run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn execution_logs(&self) -> Option<&str> {
        match &self.outcome {
            Some(RunOutcome::Completed { logs, .. }) => Some(logs.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&str> {
        match &self.outcome {
            Some(RunOutcome::Completed { result, .. }) => Some(result.as_str()),
            _ => None,
        }
    }
}

fn check_preconditions(
    api_key: &str,
    prompt: &str,
    agents: &[AgentSpec],
) -> Result<(), PreconditionError> {
    if api_key.is_empty() {
        return Err(PreconditionError::MissingCredential);
    }
    if prompt.is_empty() {
        return Err(PreconditionError::EmptyPrompt);
    }
    if agents.is_empty() {
        return Err(PreconditionError::NoAgents);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MockEngine, RUN_FAILURE_FALLBACK};
    use crate::types::AgentKind;

    fn agents() -> Vec<AgentSpec> {
        vec![AgentSpec::new("A", AgentKind::ToolCallingAgent, "d")]
    }

    fn running_controller() -> RunController {
        let mut controller = RunController::new();
        controller.begin("k", "model", "hello", &agents()).unwrap();
        controller
    }

    #[test]
    fn test_starts_idle() {
        let controller = RunController::new();
        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.transcript().is_empty());
        assert!(controller.outcome().is_none());
    }

    #[test]
    fn test_preconditions_checked_in_order() {
        let mut controller = RunController::new();

        let err = controller.begin("", "m", "", &[]).unwrap_err();
        assert_eq!(err, RunError::Precondition(PreconditionError::MissingCredential));
        assert_eq!(controller.error(), Some("Please set your Cerebras API key"));

        let err = controller.begin("k", "m", "", &[]).unwrap_err();
        assert_eq!(err, RunError::Precondition(PreconditionError::EmptyPrompt));
        assert_eq!(controller.error(), Some("Please enter a prompt"));

        let err = controller.begin("k", "m", "hello", &[]).unwrap_err();
        assert_eq!(err, RunError::Precondition(PreconditionError::NoAgents));
        assert_eq!(controller.error(), Some("Please add at least one agent"));

        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.transcript().is_empty());
    }

    #[test]
    fn test_begin_builds_request_and_enters_running() {
        let mut controller = RunController::new();
        let request = controller
            .begin("k", "cerebras/llama3.1-8b", "hello", &agents())
            .unwrap();

        assert_eq!(request.api_key, "k");
        assert_eq!(request.model_id, "cerebras/llama3.1-8b");
        assert_eq!(request.agents, agents());
        assert!(controller.is_running());
        assert_eq!(controller.transcript().as_str(), format!("{}\n", START_BANNER));
    }

    #[test]
    fn test_second_begin_while_running_is_refused() {
        let mut controller = running_controller();
        let err = controller.begin("k", "m", "again", &agents()).unwrap_err();

        assert_eq!(err, RunError::AlreadyRunning);
        assert!(controller.is_running());
        assert_eq!(controller.transcript().lines().count(), 1);
    }

    #[test]
    fn test_completed_reply() {
        let mut controller = running_controller();
        controller
            .finish(Ok(RunReply::completed(Some("L"), Some("R"))))
            .unwrap();

        assert_eq!(controller.state(), RunState::Completed);
        assert_eq!(controller.execution_logs(), Some("L"));
        assert_eq!(controller.result(), Some("R"));
        assert!(controller.error().is_none());
        assert_eq!(
            controller.transcript().lines().collect::<Vec<_>>(),
            vec![START_BANNER, SUCCESS_BANNER]
        );
    }

    #[test]
    fn test_completed_reply_without_fields_uses_placeholders() {
        let mut controller = running_controller();
        controller
            .finish(Ok(RunReply::completed(None, Some(""))))
            .unwrap();

        assert_eq!(controller.execution_logs(), Some(LOGS_PLACEHOLDER));
        assert_eq!(controller.result(), Some(RESULT_PLACEHOLDER));
    }

    #[test]
    fn test_falsy_result_uses_placeholder() {
        let mut controller = running_controller();
        controller
            .finish(Ok(RunReply::Completed {
                execution_logs: Some("L".to_string()),
                result: Some(serde_json::json!(false)),
            }))
            .unwrap();

        assert_eq!(controller.state(), RunState::Completed);
        assert_eq!(controller.result(), Some(RESULT_PLACEHOLDER));
    }

    #[test]
    fn test_engine_error_does_not_touch_transcript() {
        let mut controller = running_controller();
        controller.finish(Ok(RunReply::error(None))).unwrap();

        assert_eq!(controller.state(), RunState::Failed);
        assert_eq!(controller.error(), Some(UNKNOWN_ENGINE_ERROR));
        assert_eq!(controller.transcript().lines().collect::<Vec<_>>(), vec![START_BANNER]);
    }

    #[test]
    fn test_transport_error_appends_failure_line() {
        let mut controller = running_controller();
        controller
            .finish(Err(EngineError::Transport(String::new())))
            .unwrap();

        assert_eq!(controller.state(), RunState::Failed);
        assert_eq!(controller.error(), Some(RUN_FAILURE_FALLBACK));
        let lines: Vec<_> = controller.transcript().lines().collect();
        assert_eq!(lines[0], START_BANNER);
        assert_eq!(lines[1], format!("❌ Error: {}", RUN_FAILURE_FALLBACK));
    }

    #[test]
    fn test_status_error_prefers_engine_body() {
        let mut controller = running_controller();
        controller
            .finish(Err(EngineError::Status {
                status: 400,
                error: Some("Missing required fields".to_string()),
            }))
            .unwrap();

        assert_eq!(controller.error(), Some("Missing required fields"));
        assert!(controller
            .transcript()
            .as_str()
            .ends_with("❌ Error: Missing required fields\n"));
    }

    #[test]
    fn test_finish_without_run_is_rejected() {
        let mut controller = RunController::new();
        let result = controller.finish(Ok(RunReply::completed(None, None)));
        assert!(matches!(result, Err(RunError::NotRunning)));
    }

    #[test]
    fn test_resubmit_clears_previous_outcome() {
        let mut controller = running_controller();
        controller
            .finish(Ok(RunReply::completed(Some("L"), Some("R"))))
            .unwrap();

        controller.begin("k", "m", "hello", &agents()).unwrap();
        assert!(controller.execution_logs().is_none());
        assert!(controller.result().is_none());
        assert!(controller.outcome().is_none());
        assert_eq!(controller.transcript().lines().count(), 1);

        controller.finish(Ok(RunReply::error(Some("boom")))).unwrap();
        assert!(controller.result().is_none());

        controller.begin("k", "m", "hello", &agents()).unwrap();
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_precondition_failure_keeps_previous_outcome() {
        let mut controller = running_controller();
        controller
            .finish(Ok(RunReply::completed(Some("L"), Some("R"))))
            .unwrap();

        assert!(controller.begin("k", "m", "", &agents()).is_err());
        assert_eq!(controller.state(), RunState::Completed);
        assert_eq!(controller.result(), Some("R"));
        assert_eq!(controller.error(), Some("Please enter a prompt"));
    }

    #[tokio::test]
    async fn test_submit_with_missing_key_never_calls_engine() {
        let engine = MockEngine::new();
        let mut controller = RunController::new();

        let result = controller
            .submit(&engine, "", "m", "hello", &agents(), None)
            .await;

        assert!(result.is_err());
        assert_eq!(engine.run_calls(), 0);
        assert_eq!(controller.state(), RunState::Idle);
    }

    #[tokio::test]
    async fn test_submit_times_out() {
        let engine = MockEngine::new().with_run_delay(Duration::from_secs(5));
        let mut controller = RunController::new();

        let outcome = controller
            .submit(
                &engine,
                "k",
                "m",
                "hello",
                &agents(),
                Some(Duration::from_millis(20)),
            )
            .await
            .unwrap()
            .clone();

        assert!(matches!(outcome, RunOutcome::Failed { .. }));
        assert_eq!(controller.state(), RunState::Failed);
        assert!(controller
            .transcript()
            .as_str()
            .contains("Run timed out after 20ms"));
    }
}
