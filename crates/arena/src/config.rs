//! Arena configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one arena run.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Seed for wave generation and every AI decision.
    pub seed: u64,
    /// Number of battles to simulate.
    pub battles: u32,
    /// Directory searched for `balance.toml` and `abilities.ron`.
    pub data_dir: PathBuf,
    /// Explicit balance file; overrides the data directory.
    pub balance: Option<PathBuf>,
    /// Explicit ability catalog; overrides the data directory.
    pub abilities: Option<PathBuf>,
    /// When set, logs are also written to `arena.log` in this directory.
    pub log_dir: Option<PathBuf>,
    /// Preset tree driving the player side.
    pub player_tree: String,
    /// Seconds per battle tick.
    pub dt: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            battles: Self::DEFAULT_BATTLES,
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            balance: None,
            abilities: None,
            log_dir: None,
            player_tree: "standard".to_owned(),
            dt: 0.1,
        }
    }
}

impl ArenaConfig {
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_BATTLES: u32 = 20;
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - RNG seed (default: 0x5EED)
    /// - `ARENA_BATTLES` - Number of battles (default: 20)
    /// - `ARENA_DATA_DIR` - Content directory (default: `data`)
    /// - `ARENA_BALANCE` - Balance TOML file
    /// - `ARENA_ABILITIES` - Ability catalog RON file
    /// - `ARENA_LOG_DIR` - Directory for the log file
    /// - `ARENA_PLAYER_TREE` - Player preset name (default: `standard`)
    /// - `ARENA_DT` - Tick length in seconds (default: 0.1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("ARENA_SEED") {
            config.seed = seed;
        }
        if let Some(battles) = read_env::<u32>("ARENA_BATTLES") {
            config.battles = battles.max(1);
        }
        if let Some(dir) = read_env::<PathBuf>("ARENA_DATA_DIR") {
            config.data_dir = dir;
        }
        config.balance = read_env("ARENA_BALANCE");
        config.abilities = read_env("ARENA_ABILITIES");
        config.log_dir = read_env("ARENA_LOG_DIR");
        if let Some(tree) = read_env::<String>("ARENA_PLAYER_TREE") {
            config.player_tree = tree;
        }
        if let Some(dt) = read_env::<f64>("ARENA_DT").filter(|dt| *dt > 0.0) {
            config.dt = dt;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok().filter(|value| !value.is_empty())?.parse().ok()
}
