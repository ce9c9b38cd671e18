//! Actor capability interface and reference actor.
//!
//! Actors are owned by the caller (usually inside a [`Roster`]). Combat rules
//! only see them through the [`Combatant`] trait, which guarantees at compile
//! time that every field the rules need exists.

pub mod model;
pub mod resources;
pub mod roster;
pub mod stats;

use core::fmt;

use crate::ability::AbilitySet;
use crate::combat::{DamageCategory, DamageMap, Passive};
use crate::status::{StatusEngine, StatusKind};

pub use model::{Actor, ActorBuilder};
pub use resources::{ResourceKind, ResourceMeter, Resources};
pub use roster::Roster;
pub use stats::{StatBlock, StatKind, StatScaling};

/// Unique identifier for an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side an actor fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    Player,
    Enemy,
    Neutral,
}

impl Team {
    /// Returns true if actors of the two teams fight each other.
    pub fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Player, Team::Enemy) | (Team::Enemy, Team::Player)
        )
    }
}

/// AI-facing knobs stored on an actor by the difficulty scaler.
///
/// The AI reads these from the actor; it never needs to know which
/// difficulty level produced them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiTuning {
    /// Willingness to attack instead of guarding (1.0 = neutral).
    pub aggression: f64,
    /// Relative likelihood of casting abilities (1.0 = neutral).
    pub spell_frequency: f64,
    /// Flat resistance added to every status application (0.0-1.0).
    pub status_resistance: f64,
}

impl AiTuning {
    pub const NEUTRAL: Self = Self {
        aggression: 1.0,
        spell_frequency: 1.0,
        status_resistance: 0.0,
    };
}

impl Default for AiTuning {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Everything the combat rules need from an actor.
///
/// Required methods expose storage; provided methods implement the shared
/// resource rules on top of it so every implementor clamps the same way.
pub trait Combatant {
    fn id(&self) -> ActorId;
    fn name(&self) -> &str;
    fn team(&self) -> Team;

    fn resources(&self) -> &Resources;
    fn resources_mut(&mut self) -> &mut Resources;

    /// Current (scaled) value of a stat.
    fn stat(&self, stat: StatKind) -> f64;

    /// Damage multiplier for a category: >1 weakness, <1 resistance, 0 immune.
    fn affinity(&self, category: DamageCategory) -> f64;

    /// Resistance (0.0-1.0) against a status kind.
    fn status_resistance(&self, kind: StatusKind) -> f64;

    fn abilities(&self) -> &AbilitySet;
    fn abilities_mut(&mut self) -> &mut AbilitySet;

    /// Base damage map of the equipped weapon.
    fn weapon(&self) -> &DamageMap;

    /// Passive effects reacting to dealt or received damage.
    fn passives(&self) -> &[Passive];

    fn statuses(&self) -> &StatusEngine;
    fn statuses_mut(&mut self) -> &mut StatusEngine;

    fn is_guarding(&self) -> bool;
    fn set_guarding(&mut self, guarding: bool);

    fn tuning(&self) -> AiTuning;

    /// Rescales base values and stores AI tuning.
    ///
    /// Implementations must derive scaled values from unscaled bases so that
    /// repeated application never compounds.
    fn apply_difficulty(&mut self, scaling: &StatScaling, tuning: AiTuning);

    // ------------------------------------------------------------------------
    // Provided helpers
    // ------------------------------------------------------------------------

    fn health(&self) -> &ResourceMeter {
        &self.resources().health
    }

    fn mana(&self) -> &ResourceMeter {
        &self.resources().mana
    }

    fn health_fraction(&self) -> f64 {
        self.health().fraction()
    }

    fn mana_fraction(&self) -> f64 {
        self.mana().fraction()
    }

    fn is_alive(&self) -> bool {
        !self.health().is_empty()
    }

    /// Larger of attack and magic.
    fn offensive_power(&self) -> f64 {
        self.stat(StatKind::Attack).max(self.stat(StatKind::Magic))
    }

    /// Removes health; returns the amount actually removed.
    fn take_damage(&mut self, amount: f64) -> f64 {
        self.resources_mut().health.drain(amount)
    }

    /// Restores health; returns the amount actually restored.
    fn heal(&mut self, amount: f64) -> f64 {
        self.resources_mut().health.restore(amount)
    }

    /// Spends mana if enough is available. Never partially spends.
    fn spend_mana(&mut self, amount: f64) -> bool {
        if self.mana().current() + f64::EPSILON < amount {
            return false;
        }
        self.resources_mut().mana.drain(amount);
        true
    }
}
