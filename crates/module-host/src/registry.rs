//! Process-local export registry.
//!
//! The analog of a runtime's global binding namespace: an executed
//! module publishes its exports under a name, and the provider resolves
//! that name. Publication can lag execution, which is why the provider
//! allows one grace retry.

use std::collections::HashMap;

use parking_lot::RwLock;
use soundstage_overlay_model::ModuleExports;

/// Named module bindings shared across the process.
#[derive(Default)]
pub struct ExportRegistry {
    bindings: RwLock<HashMap<String, ModuleExports>>,
}

impl ExportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish (or replace) a module's exports under a binding name.
    pub fn publish(&self, name: impl Into<String>, exports: ModuleExports) {
        let name = name.into();
        tracing::debug!(binding = %name, "Publishing module exports");
        self.bindings.write().insert(name, exports);
    }

    /// Look up a binding by name.
    pub fn lookup(&self, name: &str) -> Option<ModuleExports> {
        self.bindings.read().get(name).cloned()
    }

    /// Names currently bound, sorted for stable output.
    pub fn binding_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
