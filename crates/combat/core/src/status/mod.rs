//! Status Engine: timed conditions on actors.
//!
//! [`StatusEngine`] holds the conditions of one actor and knows nothing about
//! health. The free functions in this module connect an engine to its owner
//! through [`Combatant`]: they look up the owner's resistance, apply tick
//! damage and healing to its health, and emit log lines.

mod condition;
mod engine;
mod kind;

pub use condition::StatusCondition;
pub use engine::{
    Applied, EXPIRY_EPSILON, MIN_MULTIPLIER, StatusEngine, StatusRejection, StatusTick,
};
pub use kind::{ActionMask, Polarity, StatusFlags, StatusKind, StatusProfile};

use crate::actor::Combatant;
use crate::error::CombatFault;

/// Applies a condition to an actor, scaled by the actor's resistance.
///
/// Returns `false` without touching the actor when the condition is rejected.
pub fn apply<A: Combatant + ?Sized>(actor: &mut A, condition: StatusCondition) -> bool {
    try_apply(actor, condition).is_ok()
}

/// Like [`apply`], reporting why a condition was rejected.
pub fn try_apply<A: Combatant + ?Sized>(
    actor: &mut A,
    condition: StatusCondition,
) -> Result<Applied, StatusRejection> {
    let kind = condition.kind;
    let resistance = actor.status_resistance(kind);
    match actor.statuses_mut().try_apply(condition, resistance) {
        Ok(applied) => {
            tracing::debug!(
                actor = %actor.id(),
                status = %kind,
                ?applied,
                "{} is now {}",
                actor.name(),
                kind
            );
            Ok(applied)
        }
        Err(rejection) => {
            tracing::debug!(
                actor = %actor.id(),
                status = %kind,
                code = rejection.error_code(),
                "{} rejected {}: {}",
                actor.name(),
                kind,
                rejection
            );
            Err(rejection)
        }
    }
}

/// Advances an actor's conditions by `dt` seconds.
///
/// Periodic damage and healing are applied to the actor's health; the
/// returned tick reports the amounts before clamping.
pub fn update<A: Combatant + ?Sized>(actor: &mut A, dt: f64) -> StatusTick {
    let tick = actor.statuses_mut().advance(dt);
    if tick.damage > 0.0 {
        actor.take_damage(tick.damage);
    }
    if tick.heal > 0.0 {
        actor.heal(tick.heal);
    }
    for kind in &tick.expired {
        tracing::debug!(actor = %actor.id(), status = %kind, "{} is no longer {}", actor.name(), kind);
    }
    tick
}
