use crate::types::ModelDescriptor;

/// Selected before the catalog arrives and kept if the catalog never loads.
pub const FALLBACK_MODEL_ID: &str = "cerebras/llama-4-scout-17b-16e-instruct";

/// The engine's model catalog plus the user's current pick.
///
/// The fallback id is not reconciled with the catalog once it loads; use
/// [`ModelSelection::is_known`] to find out whether it is actually offered.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    catalog: Vec<ModelDescriptor>,
    selected: String,
}

impl ModelSelection {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            selected: FALLBACK_MODEL_ID.to_string(),
        }
    }

    pub fn load_catalog(&mut self, catalog: Vec<ModelDescriptor>) {
        self.catalog = catalog;
        if !self.catalog.is_empty() && !self.is_known() {
            log::warn!(
                "Selected model {} is not offered by the engine catalog",
                self.selected
            );
        }
    }

    /// Only ids present in the catalog can be selected.
    pub fn select(&mut self, id: &str) -> bool {
        if self.catalog.iter().any(|m| m.id == id) {
            self.selected = id.to_string();
            true
        } else {
            false
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        match self.catalog.get(index) {
            Some(model) => {
                self.selected = model.id.clone();
                true
            }
            None => false,
        }
    }

    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    pub fn selected(&self) -> Option<&ModelDescriptor> {
        self.catalog.iter().find(|m| m.id == self.selected)
    }

    pub fn is_known(&self) -> bool {
        self.selected().is_some()
    }

    pub fn catalog(&self) -> &[ModelDescriptor] {
        &self.catalog
    }
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::new()
    }
}
