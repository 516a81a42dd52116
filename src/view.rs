/// The three mutually exclusive panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Configuration,
    Agents,
    Execute,
}

impl View {
    pub const ALL: [View; 3] = [View::Configuration, View::Agents, View::Execute];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            View::Configuration => 0,
            View::Agents => 1,
            View::Execute => 2,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            View::Configuration => "Configuration",
            View::Agents => "Agents",
            View::Execute => "Execute",
        }
    }
}

/// Tracks which panel is shown. Switching has no effect on any other state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Out-of-range indexes leave the current view unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        match View::from_index(index) {
            Some(view) => {
                self.current = view;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_configuration() {
        assert_eq!(ViewRouter::new().current(), View::Configuration);
    }

    #[test]
    fn test_select_by_index() {
        let mut router = ViewRouter::new();
        assert!(router.select(2));
        assert_eq!(router.current(), View::Execute);
        assert!(!router.select(3));
        assert_eq!(router.current(), View::Execute);
    }

    #[test]
    fn test_index_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_index(view.index()), Some(view));
        }
    }
}
