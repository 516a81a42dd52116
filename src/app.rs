use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::dialog::AgentDialog;
use crate::engine::{EngineClient, EngineError};
use crate::error::RunError;
use crate::models::ModelSelection;
use crate::notify::NotificationChannel;
use crate::registry::AgentRegistry;
use crate::run::{dispatch, RunController, FAILURE_NOTICE, SUCCESS_NOTICE};
use crate::storage::CredentialStore;
use crate::types::{AgentSpec, DefaultConfig, ModelDescriptor, RunOutcome, RunReply, RunRequest, RunState};
use crate::view::{View, ViewRouter};

pub const KEY_SAVED_NOTICE: &str = "API Key saved!";
pub const KEY_SAVE_FAILED_NOTICE: &str = "Failed to save API key";
pub const MODELS_FETCH_FAILED: &str = "Failed to fetch models";
pub const DEFAULTS_FETCH_FAILED: &str = "Failed to load default configuration";

/// One of the two startup fetches, delivered as soon as it resolves.
#[derive(Debug)]
pub enum StartupReply {
    Models(Result<Vec<ModelDescriptor>, EngineError>),
    DefaultConfig(Result<DefaultConfig, EngineError>),
}

/// Everything the client shows and edits, wired together.
///
/// Data flows one way into the run controller (credential, model, prompt and
/// agents) and one way out (status, transcript, result, error). The controller
/// never writes back to the registry or the credential.
pub struct App {
    engine: Arc<dyn EngineClient>,
    credentials: Arc<dyn CredentialStore>,
    run_timeout: Option<Duration>,
    router: ViewRouter,
    api_key: String,
    models: ModelSelection,
    prompt: String,
    registry: AgentRegistry,
    dialog: AgentDialog,
    controller: RunController,
    notifications: NotificationChannel,
    models_error: Option<String>,
    defaults_error: Option<String>,
}

impl App {
    pub fn new(engine: Arc<dyn EngineClient>, credentials: Arc<dyn CredentialStore>) -> Self {
        let api_key = credentials.load();
        log::debug!("Loaded credential (present: {})", !api_key.is_empty());

        Self {
            engine,
            credentials,
            run_timeout: None,
            router: ViewRouter::new(),
            api_key,
            models: ModelSelection::new(),
            prompt: String::new(),
            registry: AgentRegistry::new(),
            dialog: AgentDialog::new(),
            controller: RunController::new(),
            notifications: NotificationChannel::new(),
            models_error: None,
            defaults_error: None,
        }
    }

    pub fn with_run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Spawns the model catalog and default configuration fetches.
    ///
    /// Each reply is sent on the returned channel as soon as it arrives, so a
    /// fetch that never resolves does not hold back the other one. The channel
    /// closes once both have replied.
    pub fn spawn_startup(&self) -> mpsc::UnboundedReceiver<StartupReply> {
        let (tx, rx) = mpsc::unbounded_channel();

        let engine = self.engine.clone();
        let models_tx = tx.clone();
        tokio::spawn(async move {
            let reply = engine.fetch_models().await;
            let _ = models_tx.send(StartupReply::Models(reply));
        });

        let engine = self.engine.clone();
        tokio::spawn(async move {
            let reply = engine.fetch_default_config().await;
            let _ = tx.send(StartupReply::DefaultConfig(reply));
        });

        rx
    }

    pub fn apply_startup(&mut self, reply: StartupReply) {
        match reply {
            StartupReply::Models(models) => self.apply_models(models),
            StartupReply::DefaultConfig(defaults) => self.apply_default_config(defaults),
        }
    }

    /// Runs both startup fetches and applies each result as it lands.
    /// Returns once both have replied.
    pub async fn startup(&mut self) {
        let mut replies = self.spawn_startup();
        while let Some(reply) = replies.recv().await {
            self.apply_startup(reply);
        }
    }

    pub fn apply_models(&mut self, models: Result<Vec<ModelDescriptor>, EngineError>) {
        match models {
            Ok(catalog) => {
                log::info!("Loaded {} model(s) from the engine", catalog.len());
                self.models_error = None;
                self.models.load_catalog(catalog);
            }
            Err(e) => {
                log::warn!("Model catalog fetch failed: {}", e);
                self.models_error = Some(MODELS_FETCH_FAILED.to_string());
                self.notifications.error(MODELS_FETCH_FAILED);
            }
        }
    }

    pub fn apply_default_config(&mut self, defaults: Result<DefaultConfig, EngineError>) {
        match defaults {
            Ok(config) => {
                log::info!("Seeding {} default agent(s)", config.agents.len());
                self.defaults_error = None;
                self.registry.seed_from_defaults(config.agents);
                self.prompt = config.prompt;
            }
            Err(e) => {
                log::warn!("Default configuration fetch failed: {}", e);
                self.defaults_error = Some(DEFAULTS_FETCH_FAILED.to_string());
                self.notifications.error(DEFAULTS_FETCH_FAILED);
            }
        }
    }

    // Views

    pub fn view(&self) -> View {
        self.router.current()
    }

    pub fn select_view(&mut self, index: usize) -> bool {
        self.router.select(index)
    }

    // Configuration

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Edits the key field. Nothing is persisted until [`App::save_api_key`].
    pub fn set_api_key(&mut self, value: impl Into<String>) {
        self.api_key = value.into();
    }

    pub fn save_api_key(&mut self) -> bool {
        match self.credentials.save(&self.api_key) {
            Ok(()) => {
                self.notifications.success(KEY_SAVED_NOTICE);
                true
            }
            Err(e) => {
                log::error!("Failed to persist credential: {:#}", e);
                self.notifications.error(KEY_SAVE_FAILED_NOTICE);
                false
            }
        }
    }

    pub fn models(&self) -> &ModelSelection {
        &self.models
    }

    pub fn select_model(&mut self, id: &str) -> bool {
        self.models.select(id)
    }

    pub fn select_model_index(&mut self, index: usize) -> bool {
        self.models.select_index(index)
    }

    pub fn models_error(&self) -> Option<&str> {
        self.models_error.as_deref()
    }

    pub fn defaults_error(&self) -> Option<&str> {
        self.defaults_error.as_deref()
    }

    // Agents

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn dialog(&self) -> &AgentDialog {
        &self.dialog
    }

    /// Draft edits go through here; the registry is only touched on save.
    pub fn dialog_mut(&mut self) -> &mut AgentDialog {
        &mut self.dialog
    }

    /// Opens a blank draft. Refused while another draft is open.
    pub fn open_add_dialog(&mut self) -> bool {
        if self.dialog.is_open() {
            return false;
        }
        self.dialog.open_new();
        true
    }

    pub fn open_edit_dialog(&mut self, index: usize) -> bool {
        if self.dialog.is_open() {
            return false;
        }
        self.dialog.open_edit(&self.registry, index)
    }

    pub fn save_dialog(&mut self) -> bool {
        self.dialog.commit(&mut self.registry)
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.cancel();
    }

    /// Removing an entry shifts the indexes an open edit draft points at,
    /// so the list is locked while the dialog is open.
    pub fn delete_agent(&mut self, index: usize) -> Option<AgentSpec> {
        if self.dialog.is_open() {
            log::debug!("Ignoring delete of agent {} while the dialog is open", index);
            return None;
        }
        self.registry.remove(index)
    }

    // Execute

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    /// The Execute control is disabled while a run is in flight.
    pub fn can_execute(&self) -> bool {
        !self.controller.is_running()
    }

    /// Starts a run from the current inputs and hands back the request to send.
    pub fn begin_run(&mut self) -> Result<RunRequest, RunError> {
        self.controller.begin(
            &self.api_key,
            self.models.selected_id(),
            &self.prompt,
            self.registry.agents(),
        )
    }

    /// Applies the engine's reply to the run in flight and posts the matching
    /// notification.
    pub fn finish_run(&mut self, reply: Result<RunReply, EngineError>) -> Result<RunState, RunError> {
        let succeeded = matches!(self.controller.finish(reply)?, RunOutcome::Completed { .. });

        if succeeded {
            self.notifications.success(SUCCESS_NOTICE);
        } else {
            self.notifications.error(FAILURE_NOTICE);
        }
        Ok(self.controller.state())
    }

    /// Runs the whole submission inline and waits for the outcome.
    pub async fn execute(&mut self) -> Result<RunState, RunError> {
        let request = self.begin_run()?;
        let engine = self.engine.clone();
        let reply = dispatch(engine.as_ref(), request, self.run_timeout).await;
        self.finish_run(reply)
    }

    pub fn engine(&self) -> Arc<dyn EngineClient> {
        self.engine.clone()
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout
    }

    // Notifications

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationChannel {
        &mut self.notifications
    }
}
