use crate::types::AgentSpec;

/// Ordered, user-edited list of agents. Order is sent verbatim to the engine.
///
/// Entries are addressed by index. Nothing is validated: empty names and
/// duplicate names are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRegistry {
    agents: Vec<AgentSpec>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: AgentSpec) {
        self.agents.push(spec);
    }

    /// Overwrites the entry at `index` in place. Out-of-range indexes are ignored.
    pub fn replace(&mut self, index: usize, spec: AgentSpec) -> bool {
        match self.agents.get_mut(index) {
            Some(slot) => {
                *slot = spec;
                true
            }
            None => {
                log::debug!("Ignoring replace at {} (len {})", index, self.agents.len());
                false
            }
        }
    }

    /// Removes the entry at `index`, shifting later entries left.
    pub fn remove(&mut self, index: usize) -> Option<AgentSpec> {
        if index < self.agents.len() {
            Some(self.agents.remove(index))
        } else {
            None
        }
    }

    /// Discards every entry and hydrates from the engine's defaults.
    pub fn seed_from_defaults(&mut self, specs: Vec<AgentSpec>) {
        self.agents = specs;
    }

    pub fn get(&self, index: usize) -> Option<&AgentSpec> {
        self.agents.get(index)
    }

    pub fn agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
