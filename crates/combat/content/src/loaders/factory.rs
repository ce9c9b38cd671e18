//! Content factory for loading every combat table from one directory.

use std::path::{Path, PathBuf};

use combat_core::{AbilityCatalog, BalanceConfig, EffectRegistry};

use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── balance.toml
/// └── abilities.ron
/// ```
///
/// Missing files fall back to the built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const BALANCE_FILE: &'static str = "balance.toml";
    pub const ABILITIES_FILE: &'static str = "abilities.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `balance.toml`, or defaults.
    pub fn load_balance(&self) -> LoadResult<BalanceConfig> {
        let path = self.data_dir.join(Self::BALANCE_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No balance file; using defaults");
            return Ok(BalanceConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.ron`, or the built-in set.
    pub fn load_abilities(&self, registry: &EffectRegistry) -> LoadResult<AbilityCatalog> {
        let path = self.data_dir.join(Self::ABILITIES_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No ability file; using built-in catalog");
            return Ok(AbilityCatalog::builtin());
        }
        AbilityLoader::load(&path, registry)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
