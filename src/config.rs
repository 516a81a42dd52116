use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Engine location baked in at build time.
pub const API_BASE: &str = match option_env!("AGENTDECK_API_BASE") {
    Some(base) => base,
    None => "http://localhost:5000",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base: String,
    pub credential_path: PathBuf,
    pub run_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            credential_path: std::env::var("AGENTDECK_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_credential_path()),
            run_timeout: std::env::var("AGENTDECK_RUN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("agentdeck").join("credentials.json"))
        .unwrap_or_else(|| PathBuf::from(".agentdeck-credentials.json"))
}
