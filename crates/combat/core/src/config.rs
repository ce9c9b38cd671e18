//! Combat balance constants and tunable parameters.
//!
//! All constants are game-balance values. They are preserved as named
//! defaults and can be overridden from a balance file.

/// Every tunable table, as stored in a balance file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceConfig {
    pub combat: CombatConfig,
    pub difficulty: DifficultyConfig,
    pub orchestrator: OrchestratorConfig,
}

/// Top-level combat configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Defense curve and critical multiplier.
    pub damage: DamageFormula,
    /// Accuracy vs evasion rules for weapon attacks.
    pub hit: HitChanceRules,
    /// Fraction of incoming damage removed while guarding (0.0-1.0).
    pub guard_reduction: f64,
    /// Variance applied to basic weapon attacks.
    pub basic_attack_variance: f64,
}

impl CombatConfig {
    pub const DEFAULT_GUARD_REDUCTION: f64 = 0.5;
    pub const DEFAULT_BASIC_ATTACK_VARIANCE: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            damage: DamageFormula::default(),
            hit: HitChanceRules::default(),
            guard_reduction: Self::DEFAULT_GUARD_REDUCTION,
            basic_attack_variance: Self::DEFAULT_BASIC_ATTACK_VARIANCE,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hybrid defense formula parameters.
///
/// ```text
/// flat    = max(raw - defense * flat_factor, raw * min_percent_floor)
/// reduced = flat * pivot / (pivot + defense ^ alpha)
/// final   = max(reduced, minimum_damage)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageFormula {
    /// Share of defense subtracted as a flat amount.
    pub flat_factor: f64,
    /// Fraction of raw damage that always survives the flat step.
    pub min_percent_floor: f64,
    /// Defense value at which the percentage step halves damage (alpha = 1).
    pub pivot: f64,
    /// Exponent of the diminishing-returns curve.
    pub alpha: f64,
    /// Damage multiplier on a critical hit.
    pub crit_multiplier: f64,
    /// Post-defense floor for any positive hit.
    pub minimum_damage: f64,
}

impl DamageFormula {
    pub const DEFAULT_FLAT_FACTOR: f64 = 0.5;
    pub const DEFAULT_MIN_PERCENT_FLOOR: f64 = 0.2;
    pub const DEFAULT_PIVOT: f64 = 100.0;
    pub const DEFAULT_ALPHA: f64 = 0.9;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_MINIMUM_DAMAGE: f64 = 1.0;
}

impl Default for DamageFormula {
    fn default() -> Self {
        Self {
            flat_factor: Self::DEFAULT_FLAT_FACTOR,
            min_percent_floor: Self::DEFAULT_MIN_PERCENT_FLOOR,
            pivot: Self::DEFAULT_PIVOT,
            alpha: Self::DEFAULT_ALPHA,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
        }
    }
}

/// Hit chance parameters.
///
/// ```text
/// chance = base + (accuracy - evasion) * per_point
/// clamped to [min, max]
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitChanceRules {
    pub base: f64,
    pub per_point: f64,
    pub min: f64,
    pub max: f64,
}

impl HitChanceRules {
    pub const DEFAULT_BASE: f64 = 0.9;
    pub const DEFAULT_PER_POINT: f64 = 0.01;
    pub const DEFAULT_MIN: f64 = 0.05;
    pub const DEFAULT_MAX: f64 = 1.0;
}

impl Default for HitChanceRules {
    fn default() -> Self {
        Self {
            base: Self::DEFAULT_BASE,
            per_point: Self::DEFAULT_PER_POINT,
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Thresholds of the adaptive difficulty controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DifficultyConfig {
    /// Player win rate the controller steers toward.
    pub target_win_rate: f64,
    /// Distance from the target that triggers a level change.
    pub band: f64,
    /// Win streak that promotes regardless of win rate.
    pub promote_streak: u32,
    /// Loss streak that demotes regardless of win rate.
    pub demote_streak: u32,
    /// Battles required since the last adjustment.
    pub min_battles: u32,
    /// Seconds required since the last adjustment.
    pub cooldown: f64,
    /// Number of recent battles in the rolling win rate.
    pub window: usize,
}

impl DifficultyConfig {
    pub const DEFAULT_TARGET_WIN_RATE: f64 = 0.5;
    pub const DEFAULT_BAND: f64 = 0.15;
    pub const DEFAULT_PROMOTE_STREAK: u32 = 8;
    pub const DEFAULT_DEMOTE_STREAK: u32 = 5;
    pub const DEFAULT_MIN_BATTLES: u32 = 3;
    pub const DEFAULT_COOLDOWN: f64 = 30.0;
    pub const DEFAULT_WINDOW: usize = 10;
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            target_win_rate: Self::DEFAULT_TARGET_WIN_RATE,
            band: Self::DEFAULT_BAND,
            promote_streak: Self::DEFAULT_PROMOTE_STREAK,
            demote_streak: Self::DEFAULT_DEMOTE_STREAK,
            min_battles: Self::DEFAULT_MIN_BATTLES,
            cooldown: Self::DEFAULT_COOLDOWN,
            window: Self::DEFAULT_WINDOW,
        }
    }
}

/// Defaults for AI registrations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrchestratorConfig {
    /// Seconds between two decisions of one actor.
    pub cooldown: f64,
}

impl OrchestratorConfig {
    pub const DEFAULT_COOLDOWN: f64 = 1.5;
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
        }
    }
}
