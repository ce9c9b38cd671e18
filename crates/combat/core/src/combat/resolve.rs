//! Damage resolution: per-category rolls, defense, affinities, application.

use rand::Rng;

use super::damage::{DamageCategory, DamageMap, mitigate};
use super::hit::chance;
use super::passive::Passive;
use crate::actor::{ActorId, Combatant, StatKind};
use crate::config::{CombatConfig, DamageFormula};

/// Inputs for one damage resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    /// Base damage per category.
    pub damage: DamageMap,
    /// Attacker stat added to each positive category.
    pub stat: Option<StatKind>,
    /// Factor applied to the stat contribution.
    pub multiplier: f64,
    /// Probability (0.0-1.0) of a critical hit per category.
    pub crit_chance: f64,
    /// Symmetric variance; each category is scaled by `[1-v, 1+v]`.
    pub variance: f64,
}

impl DamageRequest {
    pub fn new(damage: DamageMap) -> Self {
        Self {
            damage,
            stat: None,
            multiplier: 1.0,
            crit_chance: 0.0,
            variance: 0.0,
        }
    }

    /// A single-category request.
    pub fn single(category: DamageCategory, amount: f64) -> Self {
        Self::new(DamageMap::from([(category, amount)]))
    }

    #[must_use]
    pub fn with_stat(mut self, stat: StatKind, multiplier: f64) -> Self {
        self.stat = Some(stat);
        self.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_crit_chance(mut self, crit_chance: f64) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    #[must_use]
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }
}

/// Final damage for one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryDamage {
    pub category: DamageCategory,
    /// Damage after defense and affinity.
    pub amount: f64,
    pub critical: bool,
    /// Defender affinity that was applied.
    pub multiplier: f64,
}

/// Outcome of a resolved attack.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageReport {
    pub attacker: ActorId,
    pub defender: ActorId,
    /// Per-category breakdown.
    pub entries: Vec<CategoryDamage>,
    /// Sum of the breakdown.
    pub total: f64,
    /// Health actually removed after status, guard and clamping.
    pub applied: f64,
    /// The defender's guard absorbed part of the hit.
    pub guarded: bool,
    /// The defender dropped to zero health.
    pub defeated: bool,
    /// Messages produced by passives.
    pub notes: Vec<String>,
}

impl DamageReport {
    pub fn is_critical(&self) -> bool {
        self.entries.iter().any(|e| e.critical)
    }
}

/// Compute per-category damage without touching either actor.
///
/// # Formula (per category with positive base)
///
/// ```text
/// amount  = base + stat * multiplier
/// amount *= uniform(1 - variance, 1 + variance)
/// amount *= crit_multiplier            (on a critical roll)
/// amount  = mitigate(amount, defense)  (skipped for True damage)
/// amount *= affinity                   (skipped for True damage)
/// ```
///
/// An empty map falls back to a physical entry: the stat alone if one was
/// requested, otherwise a single point.
pub fn calculate<A, D>(
    attacker: &A,
    defender: &D,
    request: &DamageRequest,
    rng: &mut impl Rng,
    formula: &DamageFormula,
) -> Vec<CategoryDamage>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let stat_bonus = request
        .stat
        .map(|stat| attacker.stat(stat).max(0.0) * request.multiplier)
        .unwrap_or(0.0);

    let fallback;
    let (damage, stat_bonus) = if request.damage.values().any(|amount| *amount > 0.0) {
        (&request.damage, stat_bonus)
    } else if stat_bonus > 0.0 {
        fallback = DamageMap::from([(DamageCategory::Physical, stat_bonus)]);
        (&fallback, 0.0)
    } else {
        fallback = DamageMap::from([(DamageCategory::Physical, 1.0)]);
        (&fallback, 0.0)
    };

    let variance = if request.variance.is_finite() {
        request.variance.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut entries = Vec::with_capacity(damage.len());
    for (&category, &base) in damage {
        if !(base > 0.0) {
            continue;
        }
        let mut amount = base + stat_bonus;

        if variance > 0.0 {
            amount *= rng.gen_range(1.0 - variance..=1.0 + variance);
        }

        let critical = chance(rng, request.crit_chance);
        if critical {
            amount *= formula.crit_multiplier;
        }

        let multiplier = if category.uses_affinity() {
            defender.affinity(category).max(0.0)
        } else {
            1.0
        };
        amount = match category.defense_stat() {
            Some(stat) => mitigate(amount, defender.stat(stat), formula),
            None => amount.max(formula.minimum_damage),
        };
        amount *= multiplier;
        if multiplier > 0.0 {
            amount = amount.max(formula.minimum_damage);
        }

        entries.push(CategoryDamage {
            category,
            amount,
            critical,
            multiplier,
        });
    }
    entries
}

/// Resolve an attack and apply it to the defender.
///
/// The breakdown total is scaled by the attacker's outgoing and the
/// defender's incoming status multipliers and by the guard reduction, then
/// removed from the defender's health in one step. A guard is consumed by
/// the hit it reduces. Passives react to the applied amount afterwards.
pub fn resolve<A, D>(
    attacker: &mut A,
    defender: &mut D,
    request: &DamageRequest,
    rng: &mut impl Rng,
    config: &CombatConfig,
) -> DamageReport
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let entries = calculate(&*attacker, &*defender, request, rng, &config.damage);
    let total: f64 = entries.iter().map(|e| e.amount).sum();

    let mut scaled = total
        * attacker.statuses().damage_multiplier(true)
        * defender.statuses().damage_multiplier(false);

    let guarded = defender.is_guarding() && scaled > 0.0;
    if guarded {
        scaled *= 1.0 - config.guard_reduction.clamp(0.0, 1.0);
        defender.set_guarding(false);
    }

    let applied = defender.take_damage(scaled);
    let defeated = !defender.is_alive();
    let notes = trigger_passives(attacker, defender, applied);

    tracing::info!(
        attacker = %attacker.id(),
        defender = %defender.id(),
        total,
        applied,
        guarded,
        critical = entries.iter().any(|e| e.critical),
        "{} hits {} for {:.1} damage",
        attacker.name(),
        defender.name(),
        applied
    );

    DamageReport {
        attacker: attacker.id(),
        defender: defender.id(),
        entries,
        total,
        applied,
        guarded,
        defeated,
        notes,
    }
}

/// Post-damage notification: runs attacker and defender passives.
fn trigger_passives<A, D>(attacker: &mut A, defender: &mut D, applied: f64) -> Vec<String>
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
{
    let mut notes = Vec::new();
    if !(applied > 0.0) {
        return notes;
    }

    let attacker_passives = attacker.passives().to_vec();
    for passive in attacker_passives {
        if let Passive::Lifesteal { fraction } = passive {
            let healed = attacker.heal(applied * fraction);
            if healed > 0.0 {
                notes.push(format!("{} drains {:.0} health", attacker.name(), healed));
            }
        }
    }

    let defender_passives = defender.passives().to_vec();
    for passive in defender_passives {
        if let Passive::Thorns { fraction } = passive {
            let reflected = attacker.take_damage(applied * fraction);
            if reflected > 0.0 {
                notes.push(format!(
                    "{}'s thorns deal {:.0} damage to {}",
                    defender.name(),
                    reflected,
                    attacker.name()
                ));
            }
        }
    }
    notes
}
