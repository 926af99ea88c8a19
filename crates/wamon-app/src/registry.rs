//! Instance registry: cached list of gateway instances with a selection
//!
//! The gateway is the sole source of truth; this cache is replaced
//! wholesale on every refresh. Selection is tracked by name so it
//! survives reordering and refreshes.

use chrono::{DateTime, Local};

use wamon_core::Instance;

#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: Vec<Instance>,
    selected: usize,
    last_refresh: Option<DateTime<Local>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list. Keeps the selection on the same instance
    /// name when it still exists, otherwise clamps the cursor.
    pub fn set_instances(&mut self, instances: Vec<Instance>) {
        let selected_name = self.selected_instance().map(|i| i.name.clone());
        self.instances = instances;
        self.last_refresh = Some(Local::now());

        self.selected = selected_name
            .and_then(|name| self.instances.iter().position(|i| i.name == name))
            .unwrap_or_else(|| self.selected.min(self.instances.len().saturating_sub(1)));
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_instance(&self) -> Option<&Instance> {
        self.instances.get(self.selected)
    }

    /// Look up an instance by name.
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn select_next(&mut self) {
        if !self.instances.is_empty() {
            self.selected = (self.selected + 1).min(self.instances.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }
}
