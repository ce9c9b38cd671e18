//! Combat stats and difficulty scaling of stats.

use strum::{EnumCount, IntoEnumIterator};

/// Named combat statistics.
///
/// Parsing from a name is supported (`"magic_defense".parse::<StatKind>()`)
/// for data files that reference stats by string.
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
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    /// Physical offense; scales weapon attacks.
    Attack,
    /// Magical offense; scales spells and heals.
    Magic,
    /// Mitigates physical damage.
    Defense,
    /// Mitigates non-physical damage.
    MagicDefense,
    /// Initiative and movement.
    Speed,
    /// Improves hit chance.
    Accuracy,
    /// Reduces the opponent's hit chance.
    Evasion,
    /// Probability (0.0-1.0) of a critical weapon hit.
    CritChance,
}

/// Fixed-size table of stat values indexed by [`StatKind`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    values: [f64; StatKind::COUNT],
}

impl StatBlock {
    /// All stats at zero.
    pub const ZERO: Self = Self {
        values: [0.0; StatKind::COUNT],
    };

    pub fn get(&self, stat: StatKind) -> f64 {
        self.values[stat as usize]
    }

    pub fn set(&mut self, stat: StatKind, value: f64) {
        self.values[stat as usize] = value;
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, stat: StatKind, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    /// Iterates over `(stat, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        StatKind::iter().map(|stat| (stat, self.get(stat)))
    }

    /// Returns a copy with damage, speed and defense stats multiplied.
    #[must_use]
    pub fn scaled(&self, scaling: &StatScaling) -> Self {
        let mut scaled = *self;
        for stat in StatKind::iter() {
            let factor = match stat {
                StatKind::Attack | StatKind::Magic => scaling.damage,
                StatKind::Defense | StatKind::MagicDefense => scaling.defense,
                StatKind::Speed => scaling.speed,
                StatKind::Accuracy | StatKind::Evasion | StatKind::CritChance => 1.0,
            };
            scaled.set(stat, self.get(stat) * factor);
        }
        scaled
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Multipliers applied to an actor's base values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatScaling {
    pub health: f64,
    pub damage: f64,
    pub speed: f64,
    pub mana: f64,
    pub defense: f64,
}

impl StatScaling {
    /// No change.
    pub const IDENTITY: Self = Self {
        health: 1.0,
        damage: 1.0,
        speed: 1.0,
        mana: 1.0,
        defense: 1.0,
    };
}

impl Default for StatScaling {
    fn default() -> Self {
        Self::IDENTITY
    }
}
