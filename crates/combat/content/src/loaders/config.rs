//! Balance configuration loader.

use std::path::Path;

use combat_core::BalanceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load balance data from a TOML file.
    ///
    /// Missing tables and fields keep their defaults, so a file only needs
    /// the values it overrides.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BalanceConfig
    pub fn load(path: &Path) -> LoadResult<BalanceConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    /// Parse balance data from TOML text.
    pub fn parse(content: &str) -> LoadResult<BalanceConfig> {
        let config: BalanceConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.difficulty.target_win_rate) {
            anyhow::bail!(
                "difficulty.target_win_rate must be within 0..=1, got {}",
                config.difficulty.target_win_rate
            );
        }
        if config.difficulty.window == 0 {
            anyhow::bail!("difficulty.window must be at least 1");
        }
        if !(config.orchestrator.cooldown >= 0.0) {
            anyhow::bail!(
                "orchestrator.cooldown must be non-negative, got {}",
                config.orchestrator.cooldown
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{DamageFormula, DifficultyConfig};

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [combat.damage]
            pivot = 80.0

            [difficulty]
            promote_streak = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.combat.damage.pivot, 80.0);
        assert_eq!(config.combat.damage.alpha, DamageFormula::DEFAULT_ALPHA);
        assert_eq!(config.difficulty.promote_streak, 4);
        assert_eq!(
            config.difficulty.demote_streak,
            DifficultyConfig::DEFAULT_DEMOTE_STREAK
        );
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BalanceConfig::default());
    }

    #[test]
    fn out_of_range_win_rate_is_rejected() {
        let err = ConfigLoader::parse("[difficulty]\ntarget_win_rate = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("target_win_rate"));
    }
}
