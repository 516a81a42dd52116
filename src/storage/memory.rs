use anyhow::{anyhow, Result};
use std::sync::{Arc, RwLock};

use super::traits::CredentialStore;

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    value: Arc<RwLock<Option<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(value.into()))),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> String {
        self.value
            .read()
            .ok()
            .and_then(|v| v.clone())
            .unwrap_or_default()
    }

    fn save(&self, value: &str) -> Result<()> {
        let mut slot = self
            .value
            .write()
            .map_err(|_| anyhow!("Credential store lock poisoned"))?;
        *slot = Some(value.to_string());
        Ok(())
    }
}
