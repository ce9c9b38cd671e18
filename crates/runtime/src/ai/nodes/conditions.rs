//! Condition nodes for combat behavior trees.
//!
//! Condition nodes read the context and return Success or Failure. They never
//! act and never return Running.

use behavior_tree::{Behavior, Status};
use combat_core::Combatant;

use crate::ai::{AiContext, ThreatLevel};

fn check(passed: bool) -> Status {
    if passed {
        Status::Success
    } else {
        Status::Failure
    }
}

/// Checks that the actor has a living target.
pub struct HasTarget;

impl<A: Combatant> Behavior<AiContext<A>> for HasTarget {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(ctx.living_target().is_some())
    }
}

/// Checks if the actor's health fraction is below a threshold.
///
/// # Example
///
/// ```rust,ignore
/// // Heal below 35%
/// sequence(vec![
///     Box::new(HealthBelow { threshold: 0.35 }),
///     Box::new(HealSelf),
/// ])
/// ```
pub struct HealthBelow {
    /// Health ratio threshold (0.0 to 1.0).
    pub threshold: f64,
}

impl<A: Combatant> Behavior<AiContext<A>> for HealthBelow {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(ctx.actor.health_fraction() < self.threshold)
    }
}

/// Checks if the target's health fraction is below a threshold.
///
/// Fails without a living target.
pub struct TargetHealthBelow {
    pub threshold: f64,
}

impl<A: Combatant> Behavior<AiContext<A>> for TargetHealthBelow {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(
            ctx.living_target()
                .is_some_and(|target| target.health_fraction() < self.threshold),
        )
    }
}

/// Checks that the target is at least this dangerous.
pub struct ThreatAtLeast {
    pub level: ThreatLevel,
}

impl<A: Combatant> Behavior<AiContext<A>> for ThreatAtLeast {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(ctx.threat() >= self.level)
    }
}

/// Checks if the actor's mana fraction is above a threshold.
pub struct ManaAbove {
    pub threshold: f64,
}

impl<A: Combatant> Behavior<AiContext<A>> for ManaAbove {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(ctx.actor.mana_fraction() > self.threshold)
    }
}

/// Checks whether a wind-up is in progress.
pub struct IsCasting;

impl<A: Combatant> Behavior<AiContext<A>> for IsCasting {
    fn tick(&mut self, ctx: &mut AiContext<A>) -> Status {
        check(ctx.is_casting())
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId, StatKind, Team};

    use super::*;
    use crate::ai::CombatRules;

    fn context(target_health: Option<f64>) -> AiContext<Actor> {
        let actor = Actor::builder(ActorId(1), "Orc")
            .health(100.0)
            .mana(10.0)
            .build();
        let target = target_health.map(|health| {
            let mut target = Actor::builder(ActorId(2), "Hero")
                .team(Team::Player)
                .health(100.0)
                .stat(StatKind::Attack, 10.0)
                .build();
            target.take_damage(100.0 - health);
            target
        });
        AiContext::new(actor, target, CombatRules::builtin(), 0.0, 1)
    }

    #[test]
    fn target_checks() {
        assert_eq!(HasTarget.tick(&mut context(None)), Status::Failure);
        assert_eq!(HasTarget.tick(&mut context(Some(0.0))), Status::Failure);
        assert_eq!(HasTarget.tick(&mut context(Some(50.0))), Status::Success);

        let mut low = TargetHealthBelow { threshold: 0.3 };
        assert_eq!(low.tick(&mut context(Some(20.0))), Status::Success);
        assert_eq!(low.tick(&mut context(Some(80.0))), Status::Failure);
        assert_eq!(low.tick(&mut context(None)), Status::Failure);
    }

    #[test]
    fn self_checks() {
        let mut ctx = context(Some(100.0));
        assert_eq!(HealthBelow { threshold: 0.5 }.tick(&mut ctx), Status::Failure);
        ctx.actor.take_damage(60.0);
        assert_eq!(HealthBelow { threshold: 0.5 }.tick(&mut ctx), Status::Success);

        assert_eq!(ManaAbove { threshold: 0.5 }.tick(&mut ctx), Status::Success);
        ctx.actor.spend_mana(8.0);
        assert_eq!(ManaAbove { threshold: 0.5 }.tick(&mut ctx), Status::Failure);

        assert_eq!(IsCasting.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn threat_check_uses_target() {
        let mut ctx = context(Some(100.0));
        ctx.actor.take_damage(80.0);
        // stronger target at full health against a badly hurt actor
        let mut critical = ThreatAtLeast {
            level: ThreatLevel::Critical,
        };
        assert_eq!(critical.tick(&mut ctx), Status::Success);
        assert_eq!(critical.tick(&mut context(None)), Status::Failure);
    }
}
