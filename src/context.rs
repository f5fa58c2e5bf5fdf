use log::warn;

use crate::config::Config;
use crate::error::DataError;
use crate::reference::ReferenceSet;

/// Read-only state built once at startup and passed into every
/// classification and aggregation call.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    config: Config,
    reference: ReferenceSet,
}

impl AnalysisContext {
    pub fn new(config: Config, reference: ReferenceSet) -> Self {
        Self { config, reference }
    }

    /// Loads the reference documents from `config.reference_dir`. A missing
    /// directory leaves the reference side of every comparison empty; a
    /// present but unreadable or malformed file is an error.
    pub fn load(config: Config) -> Result<Self, DataError> {
        let reference = if config.reference_dir.is_dir() {
            ReferenceSet::load_dir(&config.reference_dir)?
        } else {
            warn!(
                "reference directory {} not found; comparisons will have no baseline",
                config.reference_dir.display()
            );
            ReferenceSet::empty()
        };
        Ok(Self::new(config, reference))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }
}
