use std::collections::BTreeMap;

use super::{AbilityId, AbilityKind, CatalogError, EffectRegistry, EffectSpec};
use crate::actor::{Combatant, StatKind};
use crate::combat::{DamageCategory, DamageRequest};
use crate::status::StatusKind;

/// Static definition of an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: f64,
    /// Damage for offensive kinds, healing for [`AbilityKind::Heal`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_category"))]
    pub category: DamageCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling_stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default = "default_multiplier"))]
    pub multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub variance: f64,
    /// Seconds between starting the cast and its resolution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wind_up: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectSpec>,
}

#[cfg(feature = "serde")]
fn default_category() -> DamageCategory {
    DamageCategory::Physical
}

#[cfg(feature = "serde")]
fn default_multiplier() -> f64 {
    1.0
}

impl AbilityDef {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            mana_cost: 0.0,
            base_power: 0.0,
            category: DamageCategory::Physical,
            scaling_stat: None,
            multiplier: 1.0,
            crit_chance: 0.0,
            variance: 0.0,
            wind_up: 0.0,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn cost(mut self, mana: f64) -> Self {
        self.mana_cost = mana;
        self
    }

    #[must_use]
    pub fn power(mut self, category: DamageCategory, base: f64) -> Self {
        self.category = category;
        self.base_power = base;
        self
    }

    #[must_use]
    pub fn scaling(mut self, stat: StatKind, multiplier: f64) -> Self {
        self.scaling_stat = Some(stat);
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn crit(mut self, chance: f64) -> Self {
        self.crit_chance = chance;
        self
    }

    #[must_use]
    pub fn variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    #[must_use]
    pub fn wind_up(mut self, seconds: f64) -> Self {
        self.wind_up = seconds;
        self
    }

    #[must_use]
    pub fn effect(mut self, spec: EffectSpec) -> Self {
        self.effects.push(spec);
        self
    }

    /// Damage request for offensive kinds.
    pub fn damage_request(&self) -> Option<DamageRequest> {
        if !self.kind.is_offensive() {
            return None;
        }
        let mut request = DamageRequest::single(self.category, self.base_power)
            .with_crit_chance(self.crit_chance)
            .with_variance(self.variance);
        if let Some(stat) = self.scaling_stat {
            request = request.with_stat(stat, self.multiplier);
        }
        Some(request)
    }

    /// Expected output for `caster` before rolls and defense.
    ///
    /// Used to rank abilities; heals and offense use the same scale.
    pub fn estimated_power<A: Combatant + ?Sized>(&self, caster: &A) -> f64 {
        let bonus = self
            .scaling_stat
            .map(|stat| caster.stat(stat).max(0.0) * self.multiplier)
            .unwrap_or(0.0);
        self.base_power + bonus
    }
}

/// Immutable-after-construction set of ability definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, AbilityDef>,
}

impl AbilityCatalog {
    /// Ability granted to actors that have no usable offense.
    pub const STARTER_ABILITY: &'static str = "strike";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn from_defs(defs: impl IntoIterator<Item = AbilityDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            if catalog.abilities.contains_key(&def.id) {
                return Err(CatalogError::DuplicateAbility(def.id));
            }
            catalog.abilities.insert(def.id.clone(), def);
        }
        Ok(catalog)
    }

    /// Checks that every effect referenced by the catalog can be built.
    pub fn validate(&self, registry: &EffectRegistry) -> Result<(), CatalogError> {
        for def in self.abilities.values() {
            for spec in &def.effects {
                registry.build(spec)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &AbilityId) -> Result<&AbilityDef, CatalogError> {
        self.abilities
            .get(id)
            .ok_or_else(|| CatalogError::UnknownAbility(id.clone()))
    }

    pub fn contains(&self, id: &AbilityId) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDef> {
        self.abilities.values()
    }

    /// Definition of [`Self::STARTER_ABILITY`], if present.
    pub fn starter(&self) -> Option<&AbilityDef> {
        self.abilities.get(&AbilityId::from(Self::STARTER_ABILITY))
    }

    /// The standard ability set.
    pub fn builtin() -> Self {
        use AbilityKind::*;
        use DamageCategory::*;

        let defs = [
            AbilityDef::new("strike", "Strike", Attack)
                .power(Physical, 6.0)
                .scaling(StatKind::Attack, 1.0)
                .crit(0.1)
                .variance(0.1),
            AbilityDef::new("heavy_blow", "Heavy Blow", Attack)
                .cost(6.0)
                .power(Physical, 14.0)
                .scaling(StatKind::Attack, 1.2)
                .crit(0.15)
                .variance(0.15)
                .effect(EffectSpec::status(StatusKind::Bleeding, 3.0).with_tick_damage(2.0)),
            AbilityDef::new("poison_dart", "Poison Dart", Attack)
                .cost(4.0)
                .power(Poison, 5.0)
                .scaling(StatKind::Attack, 0.6)
                .effect(EffectSpec::status(StatusKind::Poisoned, 6.0).with_tick_damage(2.0)),
            AbilityDef::new("fireball", "Fireball", Spell)
                .cost(15.0)
                .power(Fire, 20.0)
                .scaling(StatKind::Magic, 1.0)
                .crit(0.05)
                .variance(0.1)
                .wind_up(1.0)
                .effect(EffectSpec::status(StatusKind::Burning, 3.0).with_tick_damage(3.0)),
            AbilityDef::new("frost_bolt", "Frost Bolt", Spell)
                .cost(12.0)
                .power(Ice, 14.0)
                .scaling(StatKind::Magic, 0.9)
                .variance(0.1)
                .wind_up(0.5)
                .effect(EffectSpec::status(StatusKind::Slowed, 4.0)),
            AbilityDef::new("lightning", "Lightning", Spell)
                .cost(20.0)
                .power(Lightning, 26.0)
                .scaling(StatKind::Magic, 1.1)
                .variance(0.2)
                .wind_up(1.5)
                .effect(EffectSpec::status(StatusKind::Paralyzed, 1.0)),
            AbilityDef::new("drain_life", "Drain Life", Spell)
                .cost(10.0)
                .power(Dark, 10.0)
                .scaling(StatKind::Magic, 0.8)
                .effect(EffectSpec::new(EffectRegistry::DRAIN_MANA).with_amount(8.0)),
            AbilityDef::new("barrier", "Barrier", Defense)
                .cost(10.0)
                .effect(EffectSpec::status(StatusKind::Shielded, 4.0).on_self()),
            AbilityDef::new("war_cry", "War Cry", Defense)
                .cost(8.0)
                .effect(EffectSpec::status(StatusKind::Strengthened, 5.0).on_self()),
            AbilityDef::new("mend", "Mend", Heal)
                .cost(8.0)
                .power(Holy, 20.0)
                .scaling(StatKind::Magic, 0.5),
            AbilityDef::new("regenerate", "Regenerate", Heal)
                .cost(12.0)
                .power(Holy, 5.0)
                .effect(
                    EffectSpec::status(StatusKind::Regenerating, 6.0)
                        .with_tick_heal(4.0)
                        .on_self(),
                ),
            AbilityDef::new("greater_heal", "Greater Heal", Heal)
                .cost(20.0)
                .power(Holy, 45.0)
                .scaling(StatKind::Magic, 1.0)
                .effect(EffectSpec::new(EffectRegistry::CLEANSE).on_self()),
        ];

        let mut catalog = Self::new();
        for def in defs {
            catalog.abilities.insert(def.id.clone(), def);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_consistent() {
        let catalog = AbilityCatalog::builtin();
        assert!(catalog.starter().is_some());
        assert_eq!(catalog.starter().unwrap().mana_cost, 0.0);
        catalog.validate(&EffectRegistry::builtin()).unwrap();
    }

    #[test]
    fn unknown_lookup_fails() {
        let catalog = AbilityCatalog::builtin();
        assert_eq!(
            catalog.get(&"meteor".into()),
            Err(CatalogError::UnknownAbility("meteor".into()))
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        let defs = [
            AbilityDef::new("jab", "Jab", AbilityKind::Attack),
            AbilityDef::new("jab", "Jab Again", AbilityKind::Attack),
        ];
        assert_eq!(
            AbilityCatalog::from_defs(defs),
            Err(CatalogError::DuplicateAbility("jab".into()))
        );
    }

    #[test]
    fn validate_reports_bad_effects() {
        let catalog = AbilityCatalog::from_defs([AbilityDef::new(
            "hex",
            "Hex",
            AbilityKind::Spell,
        )
        .effect(EffectSpec::new("curse"))])
        .unwrap();
        assert_eq!(
            catalog.validate(&EffectRegistry::builtin()),
            Err(CatalogError::UnknownEffect("curse".into()))
        );
    }

    #[test]
    fn damage_request_only_for_offense() {
        let catalog = AbilityCatalog::builtin();
        let fireball = catalog.get(&"fireball".into()).unwrap();
        let request = fireball.damage_request().unwrap();
        assert_eq!(request.stat, Some(StatKind::Magic));
        assert!(catalog.get(&"mend".into()).unwrap().damage_request().is_none());
    }
}
