//! Damage categories and the defense curve.

use std::collections::BTreeMap;

use crate::actor::StatKind;
use crate::config::DamageFormula;

// ============================================================================
// Damage Category
// ============================================================================

/// Damage category for affinities and defense selection.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageCategory {
    /// Melee and projectiles. Reduced by Defense.
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    Holy,
    Dark,
    /// Pure magic.
    Arcane,
    /// Ignores defense and affinities.
    True,
}

impl DamageCategory {
    /// Stat that mitigates this category, if any.
    pub const fn defense_stat(self) -> Option<StatKind> {
        match self {
            Self::Physical => Some(StatKind::Defense),
            Self::True => None,
            _ => Some(StatKind::MagicDefense),
        }
    }

    /// Returns true if affinities apply to this category.
    pub const fn uses_affinity(self) -> bool {
        !matches!(self, Self::True)
    }
}

/// Base damage per category.
pub type DamageMap = BTreeMap<DamageCategory, f64>;

// ============================================================================
// Defense Curve
// ============================================================================

/// Reduce raw damage by a defense value.
///
/// # Formula
///
/// ```text
/// flat    = max(raw - defense * flat_factor, raw * min_percent_floor)
/// reduced = flat * pivot / (pivot + defense ^ alpha)
/// final   = max(reduced, minimum_damage)
/// ```
///
/// Negative defense is treated as zero, so at zero defense the curve returns
/// `raw` unchanged (subject to the minimum).
///
/// # Arguments
///
/// * `raw` - Damage before defense (must be positive to be floored)
/// * `defense` - Defender's mitigating stat
/// * `formula` - Curve parameters
pub fn mitigate(raw: f64, defense: f64, formula: &DamageFormula) -> f64 {
    if !(raw > 0.0) {
        return 0.0;
    }
    let defense = defense.max(0.0);

    let flat = (raw - defense * formula.flat_factor).max(raw * formula.min_percent_floor);
    let divisor = formula.pivot + defense.powf(formula.alpha);
    let reduced = if divisor > 0.0 {
        flat * formula.pivot / divisor
    } else {
        flat
    };

    reduced.max(formula.minimum_damage)
}
