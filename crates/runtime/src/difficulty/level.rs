//! Difficulty tiers and their modifier bundles.

use combat_core::{AiTuning, StatScaling};

/// Ordered difficulty tiers, easiest first.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case")]
pub enum DifficultyLevel {
    VeryEasy,
    Easy,
    #[default]
    Normal,
    Hard,
    VeryHard,
    Extreme,
}

impl DifficultyLevel {
    pub const LOWEST: Self = Self::VeryEasy;
    pub const HIGHEST: Self = Self::Extreme;

    const ORDER: [Self; 6] = [
        Self::VeryEasy,
        Self::Easy,
        Self::Normal,
        Self::Hard,
        Self::VeryHard,
        Self::Extreme,
    ];

    /// Position in the ordering, 0 for the easiest tier.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next harder tier, clamped at the top.
    pub fn harder(self) -> Self {
        Self::ORDER[(self.index() + 1).min(Self::ORDER.len() - 1)]
    }

    /// Next easier tier, clamped at the bottom.
    pub fn easier(self) -> Self {
        Self::ORDER[self.index().saturating_sub(1)]
    }

    /// Modifier bundle of this tier.
    pub fn modifiers(self) -> DifficultyModifiers {
        let m = |health, damage, speed, mana, defense, spells, aggression, resist, reward| {
            DifficultyModifiers {
                health,
                damage,
                speed,
                mana,
                defense,
                spell_frequency: spells,
                aggression,
                status_resistance: resist,
                loot: reward,
                experience: reward,
            }
        };
        match self {
            Self::VeryEasy => m(0.6, 0.6, 0.8, 0.8, 0.7, 0.6, 0.6, 0.0, 0.75),
            Self::Easy => m(0.8, 0.8, 0.9, 0.9, 0.85, 0.8, 0.8, 0.0, 0.9),
            Self::Normal => DifficultyModifiers::NEUTRAL,
            Self::Hard => m(1.25, 1.2, 1.1, 1.15, 1.15, 1.2, 1.2, 0.1, 1.25),
            Self::VeryHard => m(1.5, 1.4, 1.2, 1.3, 1.3, 1.4, 1.4, 0.2, 1.5),
            Self::Extreme => m(2.0, 1.75, 1.3, 1.5, 1.5, 1.6, 1.6, 0.3, 2.0),
        }
    }
}

/// Enemy multipliers and AI knobs for one difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyModifiers {
    pub health: f64,
    pub damage: f64,
    pub speed: f64,
    pub mana: f64,
    pub defense: f64,
    pub spell_frequency: f64,
    pub aggression: f64,
    /// Flat status resistance added to enemies (0.0-1.0).
    pub status_resistance: f64,
    pub loot: f64,
    pub experience: f64,
}

impl DifficultyModifiers {
    pub const NEUTRAL: Self = Self {
        health: 1.0,
        damage: 1.0,
        speed: 1.0,
        mana: 1.0,
        defense: 1.0,
        spell_frequency: 1.0,
        aggression: 1.0,
        status_resistance: 0.0,
        loot: 1.0,
        experience: 1.0,
    };

    /// Stat multipliers applied to an actor's bases.
    pub fn stat_scaling(&self) -> StatScaling {
        StatScaling {
            health: self.health,
            damage: self.damage,
            speed: self.speed,
            mana: self.mana,
            defense: self.defense,
        }
    }

    /// Knobs stored on the actor for the decision layer.
    pub fn tuning(&self) -> AiTuning {
        AiTuning {
            aggression: self.aggression,
            spell_frequency: self.spell_frequency,
            status_resistance: self.status_resistance,
        }
    }
}

impl Default for DifficultyModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn steps_clamp_at_the_ends() {
        assert_eq!(DifficultyLevel::LOWEST.easier(), DifficultyLevel::VeryEasy);
        assert_eq!(DifficultyLevel::HIGHEST.harder(), DifficultyLevel::Extreme);
        assert_eq!(DifficultyLevel::Normal.harder(), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::Normal.easier(), DifficultyLevel::Easy);
    }

    #[test]
    fn modifiers_grow_with_level() {
        let levels: Vec<_> = DifficultyLevel::iter().collect();
        for pair in levels.windows(2) {
            let (lower, higher) = (pair[0].modifiers(), pair[1].modifiers());
            assert!(lower.health < higher.health);
            assert!(lower.damage < higher.damage);
            assert!(lower.loot < higher.loot);
        }
        assert_eq!(DifficultyLevel::Normal.modifiers(), DifficultyModifiers::NEUTRAL);
    }

    #[test]
    fn parses_snake_case() {
        assert_eq!(
            "very_hard".parse::<DifficultyLevel>().unwrap(),
            DifficultyLevel::VeryHard
        );
        assert_eq!(DifficultyLevel::VeryEasy.to_string(), "very_easy");
    }
}
