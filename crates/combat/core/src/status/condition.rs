use std::collections::BTreeMap;

use super::StatusKind;
use crate::actor::ActorId;

/// A timed condition attached to an actor.
///
/// Durations are in seconds of simulation time. A declared duration of
/// [`StatusCondition::PERMANENT`] keeps the condition until it is removed
/// explicitly. Negative durations are kept as given and rejected when the
/// condition is applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCondition {
    pub kind: StatusKind,
    /// Time left before expiry.
    pub remaining: f64,
    /// Duration declared at creation.
    pub duration: f64,
    /// Strength multiplier for ticks and stat modifiers.
    pub intensity: f64,
    /// Damage per second at intensity 1.0.
    pub tick_damage: f64,
    /// Healing per second at intensity 1.0.
    pub tick_heal: f64,
    /// Who or what applied the condition.
    pub source: Option<String>,
    /// Actor credited with damage the condition deals.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applier: Option<ActorId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

impl StatusCondition {
    /// Declared duration meaning "never expires by ticking".
    pub const PERMANENT: f64 = 0.0;

    pub fn new(kind: StatusKind, duration: f64) -> Self {
        Self {
            kind,
            remaining: duration,
            duration,
            intensity: 1.0,
            tick_damage: 0.0,
            tick_heal: 0.0,
            source: None,
            applier: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn permanent(kind: StatusKind) -> Self {
        Self::new(kind, Self::PERMANENT)
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity.max(0.0);
        self
    }

    #[must_use]
    pub fn with_tick_damage(mut self, per_second: f64) -> Self {
        self.tick_damage = per_second.max(0.0);
        self
    }

    #[must_use]
    pub fn with_tick_heal(mut self, per_second: f64) -> Self {
        self.tick_heal = per_second.max(0.0);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_applier(mut self, actor: ActorId) -> Self {
        self.applier = Some(actor);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration == Self::PERMANENT
    }
}
