//! Ability catalog loader.

use std::path::Path;

use combat_core::{AbilityCatalog, AbilityDef, EffectRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityFile {
    pub abilities: Vec<AbilityDef>,
}

/// Loader for ability catalogs from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog from a RON file.
    ///
    /// Every effect referenced by the file must be buildable by `registry`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an AbilityFile
    /// * `registry` - Effect registry the catalog will be resolved against
    pub fn load(path: &Path, registry: &EffectRegistry) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content, registry)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            abilities = catalog.len(),
            "Loaded ability catalog"
        );
        Ok(catalog)
    }

    /// Parse an ability catalog from RON text.
    pub fn parse(content: &str, registry: &EffectRegistry) -> LoadResult<AbilityCatalog> {
        let file: AbilityFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        let catalog = AbilityCatalog::from_defs(file.abilities)?;
        catalog.validate(registry)?;
        if catalog.starter().is_none() {
            tracing::warn!(
                starter = AbilityCatalog::STARTER_ABILITY,
                "Ability catalog has no starter ability; actors without offense stay unarmed"
            );
        }
        Ok(catalog)
    }
}
