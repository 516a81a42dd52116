use crate::registry::AgentRegistry;
use crate::types::{AgentKind, AgentSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    New,
    Existing(usize),
}

/// An open editing transaction over a detached copy of an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDraft {
    pub target: DialogTarget,
    pub spec: AgentSpec,
}

/// Add/edit dialog for the agent registry.
///
/// Opening snapshots either a blank template or a copy of the target entry.
/// Only the copy is mutated; the registry changes on [`AgentDialog::commit`]
/// and never on [`AgentDialog::cancel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDialog {
    draft: Option<AgentDraft>,
}

impl AgentDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_new(&mut self) {
        self.draft = Some(AgentDraft {
            target: DialogTarget::New,
            spec: AgentSpec::blank(),
        });
    }

    /// Returns false, leaving the dialog closed, when `index` does not exist.
    pub fn open_edit(&mut self, registry: &AgentRegistry, index: usize) -> bool {
        match registry.get(index) {
            Some(spec) => {
                self.draft = Some(AgentDraft {
                    target: DialogTarget::Existing(index),
                    spec: spec.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&AgentDraft> {
        self.draft.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| match d.target {
            DialogTarget::New => "Add Agent",
            DialogTarget::Existing(_) => "Edit Agent",
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.edit(|spec| spec.name = name.into())
    }

    pub fn set_kind(&mut self, kind: AgentKind) -> bool {
        self.edit(|spec| spec.kind = kind)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        self.edit(|spec| spec.description = description.into())
    }

    fn edit(&mut self, apply: impl FnOnce(&mut AgentSpec)) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                apply(&mut draft.spec);
                true
            }
            None => false,
        }
    }

    /// Applies the draft to the registry and closes the dialog.
    ///
    /// An edit whose target index disappeared in the meantime is dropped.
    pub fn commit(&mut self, registry: &mut AgentRegistry) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };

        match draft.target {
            DialogTarget::New => {
                registry.add(draft.spec);
                true
            }
            DialogTarget::Existing(index) => registry.replace(index, draft.spec),
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
