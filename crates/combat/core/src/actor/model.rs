//! Reference [`Combatant`] implementation.

use std::collections::BTreeMap;

use super::{
    ActorId, AiTuning, Combatant, ResourceMeter, Resources, StatBlock, StatKind, StatScaling,
    Team,
};
use crate::ability::{AbilityId, AbilitySet};
use crate::combat::{DamageCategory, DamageMap, Passive};
use crate::status::{StatusEngine, StatusKind};

/// A plain actor with unscaled bases and difficulty-scaled current values.
#[derive(Clone, Debug)]
pub struct Actor {
    id: ActorId,
    name: String,
    team: Team,
    resources: Resources,
    base_health: f64,
    base_mana: f64,
    base_stats: StatBlock,
    stats: StatBlock,
    affinities: BTreeMap<DamageCategory, f64>,
    status_resistances: BTreeMap<StatusKind, f64>,
    abilities: AbilitySet,
    weapon: DamageMap,
    passives: Vec<Passive>,
    statuses: StatusEngine,
    guarding: bool,
    tuning: AiTuning,
}

impl Actor {
    /// Starts building an actor.
    pub fn builder(id: ActorId, name: impl Into<String>) -> ActorBuilder {
        ActorBuilder::new(id, name)
    }

    /// Unscaled stat value.
    pub fn base_stat(&self, stat: StatKind) -> f64 {
        self.base_stats.get(stat)
    }

    pub fn base_health(&self) -> f64 {
        self.base_health
    }

    pub fn base_mana(&self) -> f64 {
        self.base_mana
    }

    /// Refills every pool and drops transient combat state.
    pub fn restore_fully(&mut self) {
        let health = self.resources.health.maximum();
        let mana = self.resources.mana.maximum();
        let stamina = self.resources.stamina.maximum();
        self.resources = Resources {
            health: ResourceMeter::full(health),
            mana: ResourceMeter::full(mana),
            stamina: ResourceMeter::full(stamina),
        };
        self.statuses.clear();
        self.guarding = false;
    }
}

impl Combatant for Actor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn team(&self) -> Team {
        self.team
    }

    fn resources(&self) -> &Resources {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    fn stat(&self, stat: StatKind) -> f64 {
        self.stats.get(stat)
    }

    fn affinity(&self, category: DamageCategory) -> f64 {
        self.affinities.get(&category).copied().unwrap_or(1.0)
    }

    fn status_resistance(&self, kind: StatusKind) -> f64 {
        let own = self.status_resistances.get(&kind).copied().unwrap_or(0.0);
        (own + self.tuning.status_resistance).clamp(0.0, 1.0)
    }

    fn abilities(&self) -> &AbilitySet {
        &self.abilities
    }

    fn abilities_mut(&mut self) -> &mut AbilitySet {
        &mut self.abilities
    }

    fn weapon(&self) -> &DamageMap {
        &self.weapon
    }

    fn passives(&self) -> &[Passive] {
        &self.passives
    }

    fn statuses(&self) -> &StatusEngine {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusEngine {
        &mut self.statuses
    }

    fn is_guarding(&self) -> bool {
        self.guarding
    }

    fn set_guarding(&mut self, guarding: bool) {
        self.guarding = guarding;
    }

    fn tuning(&self) -> AiTuning {
        self.tuning
    }

    fn apply_difficulty(&mut self, scaling: &StatScaling, tuning: AiTuning) {
        self.resources
            .health
            .rescale_maximum(self.base_health * scaling.health);
        self.resources
            .mana
            .rescale_maximum(self.base_mana * scaling.mana);
        self.stats = self.base_stats.scaled(scaling);
        self.tuning = tuning;
    }
}

/// Builder for [`Actor`].
#[derive(Clone, Debug)]
pub struct ActorBuilder {
    actor: Actor,
}

impl ActorBuilder {
    pub const DEFAULT_HEALTH: f64 = 100.0;
    pub const DEFAULT_MANA: f64 = 50.0;
    pub const DEFAULT_STAMINA: f64 = 100.0;
    pub const DEFAULT_ACCURACY: f64 = 10.0;

    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        let stats = StatBlock::ZERO.with(StatKind::Accuracy, Self::DEFAULT_ACCURACY);
        Self {
            actor: Actor {
                id,
                name: name.into(),
                team: Team::Enemy,
                resources: Resources::new(
                    Self::DEFAULT_HEALTH,
                    Self::DEFAULT_MANA,
                    Self::DEFAULT_STAMINA,
                ),
                base_health: Self::DEFAULT_HEALTH,
                base_mana: Self::DEFAULT_MANA,
                base_stats: stats,
                stats,
                affinities: BTreeMap::new(),
                status_resistances: BTreeMap::new(),
                abilities: AbilitySet::default(),
                weapon: DamageMap::new(),
                passives: Vec::new(),
                statuses: StatusEngine::new(),
                guarding: false,
                tuning: AiTuning::NEUTRAL,
            },
        }
    }

    pub fn team(mut self, team: Team) -> Self {
        self.actor.team = team;
        self
    }

    pub fn health(mut self, maximum: f64) -> Self {
        self.actor.base_health = maximum;
        self.actor.resources.health = ResourceMeter::full(maximum);
        self
    }

    pub fn mana(mut self, maximum: f64) -> Self {
        self.actor.base_mana = maximum;
        self.actor.resources.mana = ResourceMeter::full(maximum);
        self
    }

    pub fn stamina(mut self, maximum: f64) -> Self {
        self.actor.resources.stamina = ResourceMeter::full(maximum);
        self
    }

    pub fn stat(mut self, stat: StatKind, value: f64) -> Self {
        self.actor.base_stats.set(stat, value);
        self.actor.stats.set(stat, value);
        self
    }

    pub fn affinity(mut self, category: DamageCategory, multiplier: f64) -> Self {
        self.actor.affinities.insert(category, multiplier.max(0.0));
        self
    }

    pub fn status_resistance(mut self, kind: StatusKind, resistance: f64) -> Self {
        self.actor
            .status_resistances
            .insert(kind, resistance.clamp(0.0, 1.0));
        self
    }

    pub fn weapon(mut self, category: DamageCategory, amount: f64) -> Self {
        self.actor.weapon.insert(category, amount);
        self
    }

    pub fn offensive(mut self, id: impl Into<AbilityId>) -> Self {
        self.actor.abilities.offensive.push(id.into());
        self
    }

    pub fn defensive(mut self, id: impl Into<AbilityId>) -> Self {
        self.actor.abilities.defensive.push(id.into());
        self
    }

    pub fn healing(mut self, id: impl Into<AbilityId>) -> Self {
        self.actor.abilities.heal.push(id.into());
        self
    }

    pub fn passive(mut self, passive: Passive) -> Self {
        self.actor.passives.push(passive);
        self
    }

    pub fn build(self) -> Actor {
        self.actor
    }
}
