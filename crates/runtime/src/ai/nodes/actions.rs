//! Action nodes for combat behavior trees.
//!
//! Action nodes perform a [`CombatAction`] through the context and report the
//! resulting status. Every attempt, successful or not, leaves an
//! [`crate::ai::ActionOutcome`] in the context.

use behavior_tree::{Behavior, Status};
use combat_core::{AbilityKind, Combatant};

use crate::ai::{AiContext, CombatAction, cheapest_heal, strongest_offense};

/// Runs the full decision pipeline and performs the chosen action.
///
/// Resumes an in-flight cast instead of deciding again.
pub struct ExecuteDecision;

impl<A: Combatant> Behavior<AiContext<A>> for ExecuteDecision {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        if ctx.is_casting() {
            return ctx.continue_cast();
        }
        let action = ctx.decide();
        ctx.perform(action)
    }
}

/// Weapon attack against the current target.
pub struct BasicAttack;

impl<A: Combatant> Behavior<AiContext<A>> for BasicAttack {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        ctx.perform(CombatAction::BasicAttack)
    }
}

/// Raises a guard against the next hit.
pub struct Guard;

impl<A: Combatant> Behavior<AiContext<A>> for Guard {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        ctx.perform(CombatAction::Guard)
    }
}

/// Uses the cheapest usable heal. Fails if none is usable.
pub struct HealSelf;

impl<A: Combatant> Behavior<AiContext<A>> for HealSelf {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        let Some(heal) = cheapest_heal(&ctx.actor, &ctx.rules.catalog) else {
            return Status::Failure;
        };
        let action = CombatAction::UseAbility(heal.id.clone());
        ctx.perform(action)
    }
}

/// Casts the usable spell with the highest estimated output.
///
/// Only [`AbilityKind::Spell`] abilities qualify; fails when none is usable.
pub struct CastStrongestSpell;

impl<A: Combatant> Behavior<AiContext<A>> for CastStrongestSpell {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        if ctx.is_casting() {
            return ctx.continue_cast();
        }
        let spell = strongest_offense(&ctx.actor, &ctx.rules.catalog)
            .filter(|def| def.kind == AbilityKind::Spell)
            .map(|def| def.id.clone());
        match spell {
            Some(id) => ctx.perform(CombatAction::UseAbility(id)),
            None => Status::Failure,
        }
    }
}

/// Resolves or waits on an in-flight cast. Fails when nothing is being cast.
pub struct ContinueCast;

impl<A: Combatant> Behavior<AiContext<A>> for ContinueCast {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        ctx.continue_cast()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId, StatKind, Team};

    use super::*;
    use crate::ai::CombatRules;

    fn context(actor: Actor) -> AiContext<Actor> {
        let target = Actor::builder(ActorId(9), "Hero")
            .team(Team::Player)
            .health(400.0)
            .build();
        AiContext::new(actor, Some(target), CombatRules::builtin(), 0.0, 3)
    }

    #[test]
    fn heal_self_needs_a_heal() {
        let mut ctx = context(Actor::builder(ActorId(1), "Brute").build());
        assert_eq!(HealSelf.tick(&mut ctx), Status::Failure);
        assert!(ctx.outcomes().is_empty());

        let mut ctx = context(
            Actor::builder(ActorId(1), "Cleric")
                .healing("mend")
                .build(),
        );
        ctx.actor.take_damage(50.0);
        assert_eq!(HealSelf.tick(&mut ctx), Status::Success);
        assert!(ctx.actor.health().current() > 50.0);
    }

    #[test]
    fn strongest_spell_ignores_weapon_techniques() {
        let mut ctx = context(
            Actor::builder(ActorId(1), "Brute")
                .stat(StatKind::Attack, 30.0)
                .offensive("heavy_blow")
                .build(),
        );
        assert_eq!(CastStrongestSpell.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn casting_resumes_until_resolved() {
        let mut ctx = context(
            Actor::builder(ActorId(1), "Mage")
                .mana(50.0)
                .stat(StatKind::Magic, 12.0)
                .offensive("frost_bolt")
                .offensive("fireball")
                .build(),
        );
        let mut node = CastStrongestSpell;
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.pending().unwrap().ability.as_str(), "fireball");

        ctx.now = 1.0;
        assert_eq!(ContinueCast.tick(&mut ctx), Status::Success);
        assert_eq!(ContinueCast.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn guard_sets_flag() {
        let mut ctx = context(Actor::builder(ActorId(1), "Squire").build());
        assert_eq!(Guard.tick(&mut ctx), Status::Success);
        assert!(ctx.actor.is_guarding());
        assert_eq!(ctx.outcomes()[0].message, "Squire raises a guard");
    }
}
