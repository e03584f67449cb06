//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::genie::ExplanationGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    generator: Arc<dyn ExplanationGenerator>,
}

impl AppState {
    /// Create a new application state
    ///
    /// The generator is built once at startup and shared by every request.
    pub fn new(config: Config, generator: Arc<dyn ExplanationGenerator>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, generator }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the explanation generator
    pub fn generator(&self) -> &dyn ExplanationGenerator {
        self.inner.generator.as_ref()
    }
}
