use crate::domain::GeneratorConfig;
use crate::ports::ScaffoldStore;

/// Application context holding dependencies for command execution.
pub struct AppContext<S: ScaffoldStore> {
    store: S,
    config: GeneratorConfig,
}

impl<S: ScaffoldStore> AppContext<S> {
    /// Create a new application context.
    pub fn new(store: S, config: GeneratorConfig) -> Self {
        Self { store, config }
    }

    /// Get a reference to the scaffold store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a reference to the generator configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
