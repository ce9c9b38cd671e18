//! Strategy selection from health, mana and threat.

use combat_core::Combatant;

use super::ThreatLevel;

/// Overall posture for the next action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Maximize damage.
    Aggressive,
    /// Heal, guard, or take the cheapest shot.
    Defensive,
    /// Mix healing, abilities and basic attacks.
    Balanced,
    /// Finish weak targets, retreat from strong ones.
    Opportunistic,
}

impl Strategy {
    pub const DEFENSIVE_HEALTH: f64 = 0.25;
    pub const OPPORTUNISTIC_HEALTH: f64 = 0.5;
    pub const AGGRESSIVE_HEALTH: f64 = 0.7;
    pub const AGGRESSIVE_MANA: f64 = 0.6;
}

/// Picks a strategy.
///
/// 1. Critical threat or health below 25%: Defensive
/// 2. Health below 50%: Opportunistic
/// 3. Health above 70% and mana above 60%: Aggressive
/// 4. Otherwise: Balanced
pub fn choose_strategy<A: Combatant + ?Sized>(actor: &A, threat: ThreatLevel) -> Strategy {
    let health = actor.health_fraction();
    if threat == ThreatLevel::Critical || health < Strategy::DEFENSIVE_HEALTH {
        Strategy::Defensive
    } else if health < Strategy::OPPORTUNISTIC_HEALTH {
        Strategy::Opportunistic
    } else if health > Strategy::AGGRESSIVE_HEALTH && actor.mana_fraction() > Strategy::AGGRESSIVE_MANA
    {
        Strategy::Aggressive
    } else {
        Strategy::Balanced
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId};

    use super::*;

    fn actor(health_taken: f64, mana_spent: f64) -> Actor {
        let mut actor = Actor::builder(ActorId(1), "Unit")
            .health(100.0)
            .mana(100.0)
            .build();
        actor.take_damage(health_taken);
        actor.spend_mana(mana_spent);
        actor
    }

    #[test]
    fn critical_threat_forces_defense() {
        assert_eq!(
            choose_strategy(&actor(0.0, 0.0), ThreatLevel::Critical),
            Strategy::Defensive
        );
    }

    #[test]
    fn health_bands() {
        assert_eq!(
            choose_strategy(&actor(80.0, 0.0), ThreatLevel::Low),
            Strategy::Defensive
        );
        assert_eq!(
            choose_strategy(&actor(60.0, 0.0), ThreatLevel::Low),
            Strategy::Opportunistic
        );
        assert_eq!(
            choose_strategy(&actor(10.0, 10.0), ThreatLevel::High),
            Strategy::Aggressive
        );
        assert_eq!(
            choose_strategy(&actor(10.0, 50.0), ThreatLevel::Low),
            Strategy::Balanced
        );
        assert_eq!(
            choose_strategy(&actor(40.0, 0.0), ThreatLevel::Low),
            Strategy::Balanced
        );
    }
}
