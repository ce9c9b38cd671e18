//! Secondary effects and the registry that builds them from data.

use std::collections::BTreeMap;

use super::CatalogError;
use crate::actor::{ActorId, Combatant};
use crate::status::{self, Polarity, StatusCondition, StatusKind};

/// Data form of an effect, as stored in an ability definition.
///
/// `effect` names a constructor in an [`EffectRegistry`]; the other fields
/// are read by that constructor as needed. An `apply_status` spec needs a
/// positive `duration` unless `permanent` is set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectSpec {
    pub effect: String,
    pub status: Option<StatusKind>,
    pub amount: f64,
    pub duration: f64,
    pub intensity: f64,
    pub tick_damage: f64,
    pub tick_heal: f64,
    /// Applies to the caster instead of the target.
    pub on_self: bool,
    /// Status never expires by ticking; `duration` is ignored.
    pub permanent: bool,
}

impl Default for EffectSpec {
    fn default() -> Self {
        Self {
            effect: String::new(),
            status: None,
            amount: 0.0,
            duration: 0.0,
            intensity: 1.0,
            tick_damage: 0.0,
            tick_heal: 0.0,
            on_self: false,
            permanent: false,
        }
    }
}

impl EffectSpec {
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            ..Self::default()
        }
    }

    /// An `apply_status` spec.
    pub fn status(kind: StatusKind, duration: f64) -> Self {
        Self {
            status: Some(kind),
            duration,
            ..Self::new(EffectRegistry::APPLY_STATUS)
        }
    }

    /// An `apply_status` spec that never expires.
    pub fn permanent_status(kind: StatusKind) -> Self {
        Self {
            permanent: true,
            ..Self::status(kind, StatusCondition::PERMANENT)
        }
    }

    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_tick_damage(mut self, per_second: f64) -> Self {
        self.tick_damage = per_second;
        self
    }

    #[must_use]
    pub fn with_tick_heal(mut self, per_second: f64) -> Self {
        self.tick_heal = per_second;
        self
    }

    #[must_use]
    pub fn on_self(mut self) -> Self {
        self.on_self = true;
        self
    }
}

/// A resolved secondary effect.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    ApplyStatus(StatusCondition),
    Heal { amount: f64 },
    RestoreMana { amount: f64 },
    /// Removes every debuff.
    Cleanse,
    GrantImmunity(StatusKind),
    /// Moves mana from the target to the caster.
    DrainMana { amount: f64 },
}

impl Effect {
    /// Applies the effect from `caster` to `target`; returns a log line.
    pub fn apply<C, T>(&self, caster: &mut C, target: &mut T) -> String
    where
        C: Combatant + ?Sized,
        T: Combatant + ?Sized,
    {
        match self {
            Self::DrainMana { amount } => {
                let drained = target.resources_mut().mana.drain(*amount);
                caster.resources_mut().mana.restore(drained);
                format!(
                    "{} drains {:.0} mana from {}",
                    caster.name(),
                    drained,
                    target.name()
                )
            }
            _ => self.affect(caster.id(), caster.name().to_owned(), target),
        }
    }

    /// Applies the effect with the caster as its own target.
    pub fn apply_self<C: Combatant + ?Sized>(&self, caster: &mut C) -> String {
        match self {
            Self::DrainMana { .. } => format!("{} has no one to drain", caster.name()),
            _ => self.affect(caster.id(), caster.name().to_owned(), caster),
        }
    }

    fn affect<T: Combatant + ?Sized>(
        &self,
        applier: ActorId,
        source: String,
        recipient: &mut T,
    ) -> String {
        let name = recipient.name().to_owned();
        match self {
            Self::ApplyStatus(condition) => {
                let mut condition = condition.clone();
                if condition.source.is_none() {
                    condition.source = Some(source);
                }
                if condition.applier.is_none() {
                    condition.applier = Some(applier);
                }
                let kind = condition.kind;
                if status::apply(recipient, condition) {
                    format!("{name} is now {kind}")
                } else {
                    format!("{name} resists {kind}")
                }
            }
            Self::Heal { amount } => {
                let healed = recipient.heal(*amount);
                format!("{name} recovers {healed:.0} health")
            }
            Self::RestoreMana { amount } => {
                let restored = recipient.resources_mut().mana.restore(*amount);
                format!("{name} recovers {restored:.0} mana")
            }
            Self::Cleanse => {
                let removed = recipient.statuses_mut().cleanse(Polarity::Debuff);
                if removed.is_empty() {
                    format!("{name} has nothing to cleanse")
                } else {
                    format!("{name} is cleansed of {} condition(s)", removed.len())
                }
            }
            Self::GrantImmunity(kind) => {
                recipient.statuses_mut().grant_immunity(*kind);
                format!("{name} becomes immune to {kind}")
            }
            Self::DrainMana { .. } => format!("{name} has no one to drain"),
        }
    }
}

/// Builds an [`Effect`] from its data form.
pub type EffectConstructor = fn(&EffectSpec) -> Result<Effect, CatalogError>;

/// Identifier to constructor mapping for secondary effects.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    constructors: BTreeMap<String, EffectConstructor>,
}

impl EffectRegistry {
    pub const APPLY_STATUS: &'static str = "apply_status";
    pub const HEAL: &'static str = "heal";
    pub const RESTORE_MANA: &'static str = "restore_mana";
    pub const CLEANSE: &'static str = "cleanse";
    pub const GRANT_IMMUNITY: &'static str = "grant_immunity";
    pub const DRAIN_MANA: &'static str = "drain_mana";

    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in effect.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Self::APPLY_STATUS, build_apply_status);
        registry.register(Self::HEAL, |spec| Ok(Effect::Heal { amount: spec.amount }));
        registry.register(Self::RESTORE_MANA, |spec| {
            Ok(Effect::RestoreMana {
                amount: spec.amount,
            })
        });
        registry.register(Self::CLEANSE, |_| Ok(Effect::Cleanse));
        registry.register(Self::GRANT_IMMUNITY, |spec| {
            spec.status
                .map(Effect::GrantImmunity)
                .ok_or_else(|| CatalogError::MissingStatus {
                    effect: spec.effect.clone(),
                })
        });
        registry.register(Self::DRAIN_MANA, |spec| {
            Ok(Effect::DrainMana {
                amount: spec.amount,
            })
        });
        registry
    }

    /// Registers a constructor, returning the one it replaced.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        constructor: EffectConstructor,
    ) -> Option<EffectConstructor> {
        self.constructors.insert(id.into(), constructor)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Builds the effect described by `spec`.
    pub fn build(&self, spec: &EffectSpec) -> Result<Effect, CatalogError> {
        let constructor = self
            .constructors
            .get(&spec.effect)
            .ok_or_else(|| CatalogError::UnknownEffect(spec.effect.clone()))?;
        constructor(spec)
    }
}

fn build_apply_status(spec: &EffectSpec) -> Result<Effect, CatalogError> {
    let kind = spec.status.ok_or_else(|| CatalogError::MissingStatus {
        effect: spec.effect.clone(),
    })?;
    let duration = if spec.permanent {
        StatusCondition::PERMANENT
    } else if spec.duration > 0.0 && spec.duration.is_finite() {
        spec.duration
    } else {
        return Err(CatalogError::InvalidDuration {
            effect: spec.effect.clone(),
            status: kind,
        });
    };
    Ok(Effect::ApplyStatus(
        StatusCondition::new(kind, duration)
            .with_intensity(spec.intensity)
            .with_tick_damage(spec.tick_damage)
            .with_tick_heal(spec.tick_heal),
    ))
}
