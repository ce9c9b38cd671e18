//! Action selection and execution.
//!
//! [`select_action`] turns a [`Strategy`] into a concrete [`CombatAction`];
//! [`execute_action`] performs it immediately through the damage engine and
//! the effect registry. Execution never panics or returns an error: every
//! failed precondition becomes an [`ActionOutcome`] with `Failure` status and
//! a message suitable for a combat log.

use core::fmt;
use std::sync::Arc;

use behavior_tree::Status;
use combat_core::combat::{self, DamageRequest, roll_hit};
use combat_core::{
    AbilityCatalog, AbilityDef, AbilityId, AbilityKind, ActionError, ActorId, CombatConfig,
    CombatFault, Combatant, EffectRegistry, ErrorSeverity, StatKind,
};
use rand::Rng;
use rand::seq::SliceRandom;

use super::{Strategy, ThreatLevel};

/// Immutable rules shared by every decision: ability catalog, effect
/// registry and combat balance.
#[derive(Clone, Debug)]
pub struct CombatRules {
    pub catalog: Arc<AbilityCatalog>,
    pub effects: Arc<EffectRegistry>,
    pub config: Arc<CombatConfig>,
}

impl CombatRules {
    pub fn new(catalog: AbilityCatalog, effects: EffectRegistry, config: CombatConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            effects: Arc::new(effects),
            config: Arc::new(config),
        }
    }

    /// Built-in catalog and effects with default balance.
    pub fn builtin() -> Self {
        Self::new(
            AbilityCatalog::builtin(),
            EffectRegistry::builtin(),
            CombatConfig::default(),
        )
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A concrete thing an actor can do on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CombatAction {
    /// Weapon attack against the target.
    BasicAttack,
    /// Ability from the catalog.
    UseAbility(AbilityId),
    /// Halve the next incoming hit.
    Guard,
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasicAttack => f.write_str("basic attack"),
            Self::UseAbility(id) => write!(f, "ability '{id}'"),
            Self::Guard => f.write_str("guard"),
        }
    }
}

/// Result of an action, successful or not.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub actor: ActorId,
    pub action: CombatAction,
    pub status: Status,
    /// Human-readable log line.
    pub message: String,
    /// Health removed from the target.
    pub damage_dealt: f64,
    /// Set when the target was defeated by this action.
    pub defeated: Option<ActorId>,
}

impl ActionOutcome {
    pub fn new(actor: ActorId, action: CombatAction, status: Status, message: String) -> Self {
        Self {
            actor,
            action,
            status,
            message,
            damage_dealt: 0.0,
            defeated: None,
        }
    }

    fn failure(actor: ActorId, action: CombatAction, error: &ActionError) -> Self {
        match error.severity() {
            ErrorSeverity::Recoverable => {
                tracing::debug!(actor = %actor, code = error.error_code(), "{action} failed: {error}")
            }
            _ => tracing::warn!(actor = %actor, code = error.error_code(), "{action} rejected: {error}"),
        }
        Self::new(actor, action, Status::Failure, error.to_string())
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Base chance that a Defensive actor guards instead of attacking.
pub const DEFENSIVE_GUARD_CHANCE: f64 = 0.4;
/// Health below which a Defensive actor heals.
pub const DEFENSIVE_HEAL_HEALTH: f64 = 0.4;
/// Target health below which an Opportunistic actor goes for the kill.
pub const FINISHING_HEALTH: f64 = 0.3;
/// Health below which a Balanced actor may heal.
pub const BALANCED_HEAL_HEALTH: f64 = 0.5;
/// Chance that a Balanced actor heals when allowed to.
pub const BALANCED_HEAL_CHANCE: f64 = 0.6;
/// Base chance that a Balanced actor uses an ability instead of attacking.
pub const BALANCED_ABILITY_CHANCE: f64 = 0.5;

/// Returns true if `def` can be used by `actor` right now (known, affordable,
/// and not blocked by a status).
pub fn is_usable<A: Combatant + ?Sized>(actor: &A, def: &AbilityDef) -> bool {
    let statuses = actor.statuses();
    let permitted = statuses.can_act()
        && match def.kind {
            AbilityKind::Attack => statuses.can_attack(),
            _ => statuses.can_cast(),
        };
    permitted && actor.abilities().contains(&def.id) && actor.mana().current() >= def.mana_cost
}

/// Usable abilities from the actor's list of the given role.
fn usable<'c, A: Combatant + ?Sized>(
    actor: &A,
    ids: &[AbilityId],
    catalog: &'c AbilityCatalog,
) -> Vec<&'c AbilityDef> {
    ids.iter()
        .filter_map(|id| catalog.get(id).ok())
        .filter(|def| is_usable(actor, def))
        .collect()
}

fn cheapest<'c>(defs: &[&'c AbilityDef]) -> Option<&'c AbilityDef> {
    defs.iter()
        .copied()
        .min_by(|a, b| a.mana_cost.total_cmp(&b.mana_cost))
}

/// Usable offensive ability with the highest estimated output.
pub fn strongest_offense<'c, A: Combatant + ?Sized>(
    actor: &A,
    catalog: &'c AbilityCatalog,
) -> Option<&'c AbilityDef> {
    usable(actor, &actor.abilities().offensive, catalog)
        .into_iter()
        .max_by(|a, b| a.estimated_power(actor).total_cmp(&b.estimated_power(actor)))
}

/// Usable heal with the lowest mana cost.
pub fn cheapest_heal<'c, A: Combatant + ?Sized>(
    actor: &A,
    catalog: &'c AbilityCatalog,
) -> Option<&'c AbilityDef> {
    cheapest(&usable(actor, &actor.abilities().heal, catalog))
}

/// Chooses a concrete action for a strategy.
///
/// `target` is the actor's current target, if any; without a living target
/// the choice falls back to healing or guarding.
pub fn select_action<A, T>(
    strategy: Strategy,
    actor: &A,
    target: Option<&T>,
    threat: ThreatLevel,
    catalog: &AbilityCatalog,
    rng: &mut impl Rng,
) -> CombatAction
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let Some(target) = target.filter(|t| t.is_alive()) else {
        if actor.health_fraction() < DEFENSIVE_HEAL_HEALTH {
            if let Some(heal) = cheapest_heal(actor, catalog) {
                return CombatAction::UseAbility(heal.id.clone());
            }
        }
        return CombatAction::Guard;
    };

    match strategy {
        Strategy::Aggressive => aggressive(actor, catalog),
        Strategy::Defensive => defensive(actor, catalog, rng),
        Strategy::Balanced => balanced(actor, catalog, rng),
        Strategy::Opportunistic => {
            if target.health_fraction() < FINISHING_HEALTH {
                aggressive(actor, catalog)
            } else if threat >= ThreatLevel::High {
                defensive(actor, catalog, rng)
            } else {
                balanced(actor, catalog, rng)
            }
        }
    }
}

fn aggressive<A: Combatant + ?Sized>(actor: &A, catalog: &AbilityCatalog) -> CombatAction {
    match strongest_offense(actor, catalog) {
        Some(def) => CombatAction::UseAbility(def.id.clone()),
        None => CombatAction::BasicAttack,
    }
}

fn defensive<A: Combatant + ?Sized>(
    actor: &A,
    catalog: &AbilityCatalog,
    rng: &mut impl Rng,
) -> CombatAction {
    if actor.health_fraction() < DEFENSIVE_HEAL_HEALTH {
        if let Some(heal) = cheapest_heal(actor, catalog) {
            return CombatAction::UseAbility(heal.id.clone());
        }
    }

    let guard_chance = guard_chance(actor.tuning().aggression);
    if rng.r#gen::<f64>() < guard_chance {
        let protection = usable(actor, &actor.abilities().defensive, catalog);
        return match cheapest(&protection) {
            Some(def) => CombatAction::UseAbility(def.id.clone()),
            None => CombatAction::Guard,
        };
    }

    match cheapest(&usable(actor, &actor.abilities().offensive, catalog)) {
        Some(def) => CombatAction::UseAbility(def.id.clone()),
        None => CombatAction::BasicAttack,
    }
}

fn balanced<A: Combatant + ?Sized>(
    actor: &A,
    catalog: &AbilityCatalog,
    rng: &mut impl Rng,
) -> CombatAction {
    if actor.health_fraction() < BALANCED_HEAL_HEALTH && rng.r#gen::<f64>() < BALANCED_HEAL_CHANCE
    {
        if let Some(heal) = cheapest_heal(actor, catalog) {
            return CombatAction::UseAbility(heal.id.clone());
        }
    }

    let abilities = actor.abilities();
    let mut options = usable(actor, &abilities.offensive, catalog);
    options.extend(usable(actor, &abilities.defensive, catalog));

    let chance = (BALANCED_ABILITY_CHANCE * actor.tuning().spell_frequency).clamp(0.0, 1.0);
    if !options.is_empty() && rng.r#gen::<f64>() < chance {
        if let Some(def) = options.choose(rng) {
            return CombatAction::UseAbility(def.id.clone());
        }
    }
    CombatAction::BasicAttack
}

/// Guard chance scaled down by aggression.
fn guard_chance(aggression: f64) -> f64 {
    if aggression > 0.0 {
        (DEFENSIVE_GUARD_CHANCE / aggression).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Checks every precondition of `action` without changing anything.
///
/// Used before starting a wind-up so a cast that could never resolve is
/// rejected immediately.
pub fn validate_action<A, T>(
    actor: &A,
    target: Option<&T>,
    action: &CombatAction,
    rules: &CombatRules,
) -> Result<(), ActionError>
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    if !actor.statuses().can_act() {
        return Err(ActionError::CannotAct {
            actor: actor.name().to_owned(),
        });
    }
    match action {
        CombatAction::Guard => Ok(()),
        CombatAction::BasicAttack => {
            if !actor.statuses().can_attack() {
                return Err(ActionError::CannotAttack {
                    actor: actor.name().to_owned(),
                });
            }
            living_target(actor, target).map(|_| ())
        }
        CombatAction::UseAbility(id) => {
            let def = rules.catalog.get(id)?;
            check_ability(actor, def)?;
            if def.kind.is_offensive() {
                living_target(actor, target)?;
            }
            Ok(())
        }
    }
}

fn check_ability<A: Combatant + ?Sized>(actor: &A, def: &AbilityDef) -> Result<(), ActionError> {
    if !actor.abilities().contains(&def.id) {
        return Err(ActionError::NotKnown {
            actor: actor.name().to_owned(),
            ability: def.id.clone(),
        });
    }
    let statuses = actor.statuses();
    if def.kind == AbilityKind::Attack && !statuses.can_attack() {
        return Err(ActionError::CannotAttack {
            actor: actor.name().to_owned(),
        });
    }
    if def.kind.is_magic() && !statuses.can_cast() {
        return Err(ActionError::CannotCast {
            actor: actor.name().to_owned(),
        });
    }
    if actor.mana().current() < def.mana_cost {
        return Err(ActionError::NotEnoughMana {
            required: def.mana_cost,
            available: actor.mana().current(),
        });
    }
    Ok(())
}

fn living_target<'t, A, T>(actor: &A, target: Option<&'t T>) -> Result<&'t T, ActionError>
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let target = target.ok_or_else(|| ActionError::NoTarget {
        actor: actor.name().to_owned(),
    })?;
    if !target.is_alive() {
        return Err(ActionError::TargetDefeated {
            target: target.name().to_owned(),
        });
    }
    Ok(target)
}

/// Performs `action` immediately.
///
/// Attacks and offensive abilities resolve damage against `target` and then
/// apply the ability's secondary effects. Heals and defensive abilities
/// affect the actor. Mana is spent only when the action resolves. A missed
/// weapon attack still consumes the turn and reports `Success` with a miss
/// message.
pub fn execute_action<A, T>(
    actor: &mut A,
    target: Option<&mut T>,
    action: &CombatAction,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> ActionOutcome
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let id = actor.id();
    if let Err(error) = validate_action(&*actor, target.as_deref(), action, rules) {
        return ActionOutcome::failure(id, action.clone(), &error);
    }

    match action {
        CombatAction::Guard => {
            actor.set_guarding(true);
            let message = format!("{} raises a guard", actor.name());
            tracing::debug!(actor = %id, "{message}");
            ActionOutcome::new(id, action.clone(), Status::Success, message)
        }
        CombatAction::BasicAttack => {
            // Validated above: a living target exists.
            let Some(target) = target else {
                return ActionOutcome::failure(
                    id,
                    action.clone(),
                    &ActionError::NoTarget {
                        actor: actor.name().to_owned(),
                    },
                );
            };
            basic_attack(actor, target, rules, rng)
        }
        CombatAction::UseAbility(ability) => match rules.catalog.get(ability) {
            Ok(def) => use_ability(actor, target, def, rules, rng),
            Err(error) => ActionOutcome::failure(id, action.clone(), &error.into()),
        },
    }
}

fn basic_attack<A, T>(
    actor: &mut A,
    target: &mut T,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> ActionOutcome
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let id = actor.id();
    let hit = roll_hit(
        actor.stat(StatKind::Accuracy),
        target.stat(StatKind::Evasion),
        rng,
        &rules.config.hit,
    );
    if !hit {
        let message = format!("{}'s attack missed!", actor.name());
        tracing::info!(actor = %id, target = %target.id(), "{message}");
        return ActionOutcome::new(id, CombatAction::BasicAttack, Status::Success, message);
    }

    let request = DamageRequest::new(actor.weapon().clone())
        .with_stat(StatKind::Attack, 1.0)
        .with_crit_chance(actor.stat(StatKind::CritChance))
        .with_variance(rules.config.basic_attack_variance);
    let report = combat::resolve(actor, target, &request, rng, &rules.config);

    let mut message = format!(
        "{} attacks {} for {:.0} damage",
        actor.name(),
        target.name(),
        report.applied
    );
    if report.is_critical() {
        message.push_str(" (critical)");
    }
    append_notes(&mut message, &report.notes);
    if report.defeated {
        message.push_str(&format!("; {} is defeated", target.name()));
    }

    ActionOutcome {
        damage_dealt: report.applied,
        defeated: report.defeated.then(|| target.id()),
        ..ActionOutcome::new(id, CombatAction::BasicAttack, Status::Success, message)
    }
}

fn use_ability<A, T>(
    actor: &mut A,
    target: Option<&mut T>,
    def: &AbilityDef,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> ActionOutcome
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let id = actor.id();
    let action = CombatAction::UseAbility(def.id.clone());
    if !actor.spend_mana(def.mana_cost) {
        let error = ActionError::NotEnoughMana {
            required: def.mana_cost,
            available: actor.mana().current(),
        };
        return ActionOutcome::failure(id, action, &error);
    }

    let mut outcome = ActionOutcome::new(id, action, Status::Success, String::new());
    let mut lines = Vec::new();

    match (def.damage_request(), target) {
        (Some(request), Some(target)) => {
            let report = combat::resolve(actor, target, &request, rng, &rules.config);
            lines.push(format!(
                "{} uses {} on {} for {:.0} damage",
                actor.name(),
                def.name,
                target.name(),
                report.applied
            ));
            lines.extend(report.notes.iter().cloned());
            outcome.damage_dealt = report.applied;

            for spec in &def.effects {
                match rules.effects.build(spec) {
                    Ok(effect) if spec.on_self => lines.push(effect.apply_self(actor)),
                    Ok(_) if !target.is_alive() => {}
                    Ok(effect) => lines.push(effect.apply(actor, target)),
                    Err(error) => {
                        tracing::warn!(ability = %def.id, "skipping effect: {error}");
                    }
                }
            }

            if report.defeated {
                lines.push(format!("{} is defeated", target.name()));
                outcome.defeated = Some(target.id());
            }
        }
        (Some(_), None) => {
            // Validated before spending; only reachable through a bad caller.
            actor.resources_mut().mana.restore(def.mana_cost);
            let error = ActionError::NoTarget {
                actor: actor.name().to_owned(),
            };
            return ActionOutcome::failure(id, outcome.action, &error);
        }
        (None, _) => {
            if def.kind == AbilityKind::Heal {
                let amount = def.estimated_power(&*actor);
                let healed = actor.heal(amount);
                lines.push(format!(
                    "{} uses {} and recovers {:.0} health",
                    actor.name(),
                    def.name,
                    healed
                ));
            } else {
                lines.push(format!("{} uses {}", actor.name(), def.name));
            }
            for spec in &def.effects {
                match rules.effects.build(spec) {
                    Ok(effect) => lines.push(effect.apply_self(actor)),
                    Err(error) => {
                        tracing::warn!(ability = %def.id, "skipping effect: {error}");
                    }
                }
            }
        }
    }

    outcome.message = lines.join("; ");
    tracing::debug!(actor = %id, ability = %def.id, "{}", outcome.message);
    outcome
}

fn append_notes(message: &mut String, notes: &[String]) {
    for note in notes {
        message.push_str("; ");
        message.push_str(note);
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId, DamageCategory, StatusCondition, StatusKind, Team, status};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    fn mage() -> Actor {
        Actor::builder(ActorId(1), "Mage")
            .health(100.0)
            .mana(40.0)
            .stat(StatKind::Magic, 10.0)
            .stat(StatKind::Accuracy, 100.0)
            .offensive("strike")
            .offensive("fireball")
            .healing("mend")
            .build()
    }

    fn dummy() -> Actor {
        Actor::builder(ActorId(2), "Dummy")
            .team(Team::Player)
            .health(500.0)
            .build()
    }

    #[test]
    fn aggressive_picks_strongest_affordable_ability() {
        let rules = CombatRules::builtin();
        let caster = mage();
        let action = select_action(
            Strategy::Aggressive,
            &caster,
            Some(&dummy()),
            ThreatLevel::Low,
            &rules.catalog,
            &mut rng(),
        );
        assert_eq!(action, CombatAction::UseAbility("fireball".into()));

        let mut drained = mage();
        drained.spend_mana(30.0);
        let action = select_action(
            Strategy::Aggressive,
            &drained,
            Some(&dummy()),
            ThreatLevel::Low,
            &rules.catalog,
            &mut rng(),
        );
        assert_eq!(action, CombatAction::UseAbility("strike".into()));
    }

    #[test]
    fn defensive_heals_when_low() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        caster.take_damage(70.0);
        let action = select_action(
            Strategy::Defensive,
            &caster,
            Some(&dummy()),
            ThreatLevel::Critical,
            &rules.catalog,
            &mut rng(),
        );
        assert_eq!(action, CombatAction::UseAbility("mend".into()));
    }

    #[test]
    fn no_target_means_guard() {
        let rules = CombatRules::builtin();
        let action = select_action::<Actor, Actor>(
            Strategy::Aggressive,
            &mage(),
            None,
            ThreatLevel::Low,
            &rules.catalog,
            &mut rng(),
        );
        assert_eq!(action, CombatAction::Guard);
    }

    #[test]
    fn silenced_caster_falls_back_to_weapon_abilities() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        status::apply(&mut caster, StatusCondition::new(StatusKind::Silenced, 5.0));
        let action = select_action(
            Strategy::Aggressive,
            &caster,
            Some(&dummy()),
            ThreatLevel::Low,
            &rules.catalog,
            &mut rng(),
        );
        assert_eq!(action, CombatAction::UseAbility("strike".into()));
    }

    #[test]
    fn not_enough_mana_is_a_failure_message() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        caster.spend_mana(35.0);
        let mut target = dummy();

        let outcome = execute_action(
            &mut caster,
            Some(&mut target),
            &CombatAction::UseAbility("fireball".into()),
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Failure);
        assert_eq!(outcome.message, "Not enough mana");
        assert_eq!(caster.mana().current(), 5.0);
        assert_eq!(target.health().current(), 500.0);
    }

    #[test]
    fn unknown_ability_fails_gracefully() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        let outcome = execute_action(
            &mut caster,
            Some(&mut dummy()),
            &CombatAction::UseAbility("meteor".into()),
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Failure);
        assert!(outcome.message.contains("meteor"));
    }

    #[test]
    fn stunned_actor_cannot_act() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        status::apply(&mut caster, StatusCondition::new(StatusKind::Stunned, 5.0));
        let outcome = execute_action(
            &mut caster,
            Some(&mut dummy()),
            &CombatAction::Guard,
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Failure);
        assert_eq!(outcome.message, "Mage cannot act");
        assert!(!caster.is_guarding());
    }

    #[test]
    fn fireball_spends_mana_and_burns() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        let mut target = dummy();
        let outcome = execute_action(
            &mut caster,
            Some(&mut target),
            &CombatAction::UseAbility("fireball".into()),
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Success);
        assert_eq!(caster.mana().current(), 25.0);
        assert!(outcome.damage_dealt >= 1.0);
        assert!(target.statuses().has(StatusKind::Burning));
    }

    #[test]
    fn heal_restores_caster() {
        let rules = CombatRules::builtin();
        let mut caster = mage();
        caster.take_damage(50.0);
        let outcome = execute_action::<Actor, Actor>(
            &mut caster,
            None,
            &CombatAction::UseAbility("mend".into()),
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Success);
        // 20 base + 10 magic * 0.5
        assert_eq!(caster.health().current(), 75.0);
    }

    #[test]
    fn basic_attack_uses_weapon_map() {
        let rules = CombatRules::builtin();
        let mut knight = Actor::builder(ActorId(3), "Knight")
            .stat(StatKind::Accuracy, 1_000.0)
            .stat(StatKind::Attack, 5.0)
            .weapon(DamageCategory::Physical, 10.0)
            .build();
        let mut target = dummy();
        let outcome = execute_action(
            &mut knight,
            Some(&mut target),
            &CombatAction::BasicAttack,
            &rules,
            &mut rng(),
        );
        assert_eq!(outcome.status, Status::Success);
        // 15 +/- 10% variance, no defense
        assert!((13.5..=16.5).contains(&outcome.damage_dealt));
    }
}
