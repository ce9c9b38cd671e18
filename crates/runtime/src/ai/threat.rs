//! Threat assessment between an actor and its target.

use combat_core::Combatant;

/// How dangerous a target currently is to the assessing actor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub const CRITICAL_SCORE: f64 = 4.0;
    pub const HIGH_SCORE: f64 = 2.5;
    pub const MEDIUM_SCORE: f64 = 1.0;

    /// Maps an additive threat score to a level.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_SCORE {
            Self::Critical
        } else if score >= Self::HIGH_SCORE {
            Self::High
        } else if score >= Self::MEDIUM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Additive threat score of `target` as seen by `actor`.
///
/// # Formula
///
/// ```text
/// ratio = target offense / actor offense
///   ratio >= 1.5        +2
///   ratio >= 1.0        +1
/// target health > 0.8   +1
/// target health > 0.5   +0.5
/// actor health  < 0.3   +2
/// actor health  < 0.6   +1
/// ```
///
/// An actor with no offense treats any armed target as 1.5x stronger.
pub fn threat_score<A, T>(actor: &A, target: &T) -> f64
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let own = actor.offensive_power();
    let theirs = target.offensive_power();
    let ratio = if own > 0.0 {
        theirs / own
    } else if theirs > 0.0 {
        f64::INFINITY
    } else {
        1.0
    };

    let mut score = 0.0;
    if ratio >= 1.5 {
        score += 2.0;
    } else if ratio >= 1.0 {
        score += 1.0;
    }

    let target_health = target.health_fraction();
    if target_health > 0.8 {
        score += 1.0;
    } else if target_health > 0.5 {
        score += 0.5;
    }

    let own_health = actor.health_fraction();
    if own_health < 0.3 {
        score += 2.0;
    } else if own_health < 0.6 {
        score += 1.0;
    }
    score
}

/// Threat level of `target` as seen by `actor`.
pub fn assess_threat<A, T>(actor: &A, target: &T) -> ThreatLevel
where
    A: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    ThreatLevel::from_score(threat_score(actor, target))
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId, StatKind};

    use super::*;

    fn actor(attack: f64, health_taken: f64) -> Actor {
        let mut actor = Actor::builder(ActorId(1), "Unit")
            .health(100.0)
            .stat(StatKind::Attack, attack)
            .build();
        actor.take_damage(health_taken);
        actor
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(ThreatLevel::from_score(0.5), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_score(1.0), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_score(2.5), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_score(4.0), ThreatLevel::Critical);
    }

    #[test]
    fn stronger_healthy_target_against_wounded_actor_is_critical() {
        let me = actor(10.0, 80.0);
        let them = actor(20.0, 0.0);
        // 2 (ratio 2.0) + 1 (target full) + 2 (self at 20%)
        assert_eq!(threat_score(&me, &them), 5.0);
        assert_eq!(assess_threat(&me, &them), ThreatLevel::Critical);
    }

    #[test]
    fn weak_wounded_target_is_low() {
        let me = actor(20.0, 0.0);
        let them = actor(10.0, 60.0);
        assert_eq!(threat_score(&me, &them), 0.0);
        assert_eq!(assess_threat(&me, &them), ThreatLevel::Low);
    }

    #[test]
    fn equal_fighters_at_two_thirds_health() {
        let me = actor(10.0, 0.0);
        let them = actor(10.0, 30.0);
        // 1 (ratio 1.0) + 0.5 (target at 70%)
        assert_eq!(threat_score(&me, &them), 1.5);
        assert_eq!(assess_threat(&me, &them), ThreatLevel::Medium);
    }
}
