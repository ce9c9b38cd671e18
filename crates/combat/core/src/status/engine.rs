//! Per-actor collection of active conditions.

use arrayvec::ArrayVec;
use strum::EnumCount;

use super::{ActionMask, Polarity, StatusCondition, StatusFlags, StatusKind, StatusProfile};
use crate::actor::ActorId;
use crate::error::{CombatFault, ErrorSeverity};

/// Remaining time at or below which a condition counts as expired.
///
/// Absorbs float drift when many small `dt` steps add up to a duration.
pub const EXPIRY_EPSILON: f64 = 1e-9;

/// Lowest value returned by the movement and damage multiplier queries.
pub const MIN_MULTIPLIER: f64 = 0.1;

/// Why a condition was not applied. The engine is untouched in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatusRejection {
    #[error("immune to {0}")]
    Immune(StatusKind),

    #[error("{0} was fully resisted")]
    Resisted(StatusKind),

    #[error("{0} has a non-finite duration or intensity")]
    Invalid(StatusKind),

    #[error("{0} has a negative duration")]
    NegativeDuration(StatusKind),
}

impl StatusRejection {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Immune(kind)
            | Self::Resisted(kind)
            | Self::Invalid(kind)
            | Self::NegativeDuration(kind) => *kind,
        }
    }
}

impl CombatFault for StatusRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Immune(_) | Self::Resisted(_) => ErrorSeverity::Recoverable,
            Self::Invalid(_) | Self::NegativeDuration(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Immune(_) => "STATUS_IMMUNE",
            Self::Resisted(_) => "STATUS_RESISTED",
            Self::Invalid(_) => "STATUS_INVALID",
            Self::NegativeDuration(_) => "STATUS_NEGATIVE_DURATION",
        }
    }
}

/// Result of a successful application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The kind was not active before.
    Inserted,
    /// An active condition of the same kind absorbed the new one.
    Merged,
}

/// What one [`StatusEngine::advance`] call produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Periodic damage owed by the owner.
    pub damage: f64,
    /// Periodic healing owed to the owner.
    pub heal: f64,
    /// Kinds removed by this tick, in application order.
    pub expired: Vec<StatusKind>,
    /// Applier of the condition that dealt the most damage this tick.
    pub dealt_by: Option<ActorId>,
}

/// Active conditions on one actor, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEngine {
    conditions: ArrayVec<StatusCondition, { StatusKind::COUNT }>,
    immunities: StatusFlags,
}

impl StatusEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Applies a condition after scaling it by `resistance` (0.0-1.0).
    ///
    /// Conflicting kinds are removed before insertion. Re-applying an active
    /// kind keeps the longer remaining time and the higher intensity, and
    /// takes the newer tick values and source.
    pub fn try_apply(
        &mut self,
        mut condition: StatusCondition,
        resistance: f64,
    ) -> Result<Applied, StatusRejection> {
        let kind = condition.kind;
        if self.immunities.contains(kind.flag()) {
            return Err(StatusRejection::Immune(kind));
        }
        if !condition.duration.is_finite() || !condition.intensity.is_finite() {
            return Err(StatusRejection::Invalid(kind));
        }
        if condition.duration < 0.0 {
            return Err(StatusRejection::NegativeDuration(kind));
        }

        let scale = 1.0 - resistance.clamp(0.0, 1.0);
        condition.intensity *= scale;
        if !condition.is_permanent() {
            condition.duration *= scale;
            condition.remaining = condition.duration;
        }
        let expired_on_arrival = !condition.is_permanent() && condition.remaining <= 0.0;
        if condition.intensity <= 0.0 || expired_on_arrival {
            return Err(StatusRejection::Resisted(kind));
        }

        for conflicting in kind.conflicts() {
            self.remove(*conflicting);
        }

        if let Some(existing) = self.conditions.iter_mut().find(|c| c.kind == kind) {
            if existing.is_permanent() || condition.is_permanent() {
                existing.duration = StatusCondition::PERMANENT;
                existing.remaining = 0.0;
            } else if condition.remaining > existing.remaining {
                existing.remaining = condition.remaining;
                existing.duration = condition.duration;
            }
            existing.intensity = existing.intensity.max(condition.intensity);
            existing.tick_damage = condition.tick_damage;
            existing.tick_heal = condition.tick_heal;
            existing.source = condition.source;
            existing.applier = condition.applier;
            existing.metadata.extend(condition.metadata);
            return Ok(Applied::Merged);
        }

        // One slot per kind, so the push cannot overflow.
        self.conditions.push(condition);
        Ok(Applied::Inserted)
    }

    /// Same as [`try_apply`](Self::try_apply), discarding the reason.
    pub fn apply(&mut self, condition: StatusCondition, resistance: f64) -> bool {
        self.try_apply(condition, resistance).is_ok()
    }

    /// Advances every condition by `dt` seconds.
    ///
    /// Tick amounts are accumulated before durations are decremented, so a
    /// condition still ticks during the step in which it expires.
    pub fn advance(&mut self, dt: f64) -> StatusTick {
        let mut tick = StatusTick::default();
        if !(dt > 0.0) {
            return tick;
        }

        let mut heaviest = 0.0;
        for condition in &mut self.conditions {
            let damage = condition.tick_damage * condition.intensity * dt;
            tick.damage += damage;
            tick.heal += condition.tick_heal * condition.intensity * dt;
            if damage > heaviest && condition.applier.is_some() {
                heaviest = damage;
                tick.dealt_by = condition.applier;
            }

            if condition.is_permanent() {
                continue;
            }
            condition.remaining -= dt;
            if condition.remaining <= EXPIRY_EPSILON {
                condition.remaining = 0.0;
                tick.expired.push(condition.kind);
            }
        }

        if !tick.expired.is_empty() {
            self.conditions
                .retain(|c| c.is_permanent() || c.remaining > 0.0);
        }
        tick
    }

    /// Removes a condition; returns it if it was active.
    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusCondition> {
        let index = self.conditions.iter().position(|c| c.kind == kind)?;
        Some(self.conditions.remove(index))
    }

    /// Removes every condition. Immunities are kept.
    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    /// Removes every condition of the given polarity.
    pub fn cleanse(&mut self, polarity: Polarity) -> Vec<StatusKind> {
        let removed = self
            .conditions
            .iter()
            .filter(|c| c.kind.polarity() == polarity)
            .map(|c| c.kind)
            .collect();
        self.conditions.retain(|c| c.kind.polarity() != polarity);
        removed
    }

    /// Grants immunity and removes any active condition of that kind.
    pub fn grant_immunity(&mut self, kind: StatusKind) -> Option<StatusCondition> {
        self.immunities.insert(kind.flag());
        self.remove(kind)
    }

    pub fn revoke_immunity(&mut self, kind: StatusKind) {
        self.immunities.remove(kind.flag());
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_immune(&self, kind: StatusKind) -> bool {
        self.immunities.contains(kind.flag())
    }

    pub fn immunities(&self) -> StatusFlags {
        self.immunities
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusCondition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusCondition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Bit set of the active kinds.
    pub fn active_flags(&self) -> StatusFlags {
        self.conditions
            .iter()
            .fold(StatusFlags::empty(), |flags, c| flags | c.kind.flag())
    }

    fn blocked(&self) -> ActionMask {
        self.conditions
            .iter()
            .fold(ActionMask::empty(), |mask, c| mask | c.kind.profile().blocks)
    }

    pub fn can_act(&self) -> bool {
        !self.blocked().contains(ActionMask::ACT)
    }

    pub fn can_move(&self) -> bool {
        !self.blocked().contains(ActionMask::MOVE)
    }

    pub fn can_cast(&self) -> bool {
        !self.blocked().contains(ActionMask::CAST)
    }

    pub fn can_attack(&self) -> bool {
        !self.blocked().contains(ActionMask::ATTACK)
    }

    /// Combined movement speed multiplier, never below [`MIN_MULTIPLIER`].
    pub fn movement_multiplier(&self) -> f64 {
        self.conditions
            .iter()
            .map(|c| StatusProfile::scaled(c.kind.profile().movement, c.intensity))
            .product::<f64>()
            .max(MIN_MULTIPLIER)
    }

    /// Combined damage multiplier for dealt (`outgoing`) or taken damage.
    ///
    /// Taken damage is exactly zero while [`StatusKind::Invulnerable`] is
    /// active. Otherwise the result never drops below [`MIN_MULTIPLIER`].
    pub fn damage_multiplier(&self, outgoing: bool) -> f64 {
        if !outgoing && self.has(StatusKind::Invulnerable) {
            return 0.0;
        }
        self.conditions
            .iter()
            .filter(|c| c.kind != StatusKind::Invulnerable)
            .map(|c| {
                let profile = c.kind.profile();
                let base = if outgoing {
                    profile.outgoing
                } else {
                    profile.incoming
                };
                StatusProfile::scaled(base, c.intensity)
            })
            .product::<f64>()
            .max(MIN_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burning(duration: f64) -> StatusCondition {
        StatusCondition::new(StatusKind::Burning, duration).with_tick_damage(4.0)
    }

    #[test]
    fn resistance_scales_duration_and_intensity() {
        let mut engine = StatusEngine::new();
        engine.try_apply(burning(10.0), 0.5).unwrap();

        let active = engine.get(StatusKind::Burning).unwrap();
        assert_eq!(active.remaining, 5.0);
        assert_eq!(active.intensity, 0.5);
    }

    #[test]
    fn full_resistance_rejects() {
        let mut engine = StatusEngine::new();
        let err = engine.try_apply(burning(10.0), 1.0).unwrap_err();
        assert_eq!(err, StatusRejection::Resisted(StatusKind::Burning));
        assert!(engine.is_empty());
    }

    #[test]
    fn permanent_duration_is_not_scaled() {
        let mut engine = StatusEngine::new();
        engine
            .try_apply(StatusCondition::permanent(StatusKind::Shielded), 0.5)
            .unwrap();
        let shield = engine.get(StatusKind::Shielded).unwrap();
        assert!(shield.is_permanent());
        assert_eq!(shield.intensity, 0.5);
    }

    #[test]
    fn reapplication_merges() {
        let mut engine = StatusEngine::new();
        engine.apply(burning(3.0).with_intensity(2.0), 0.0);
        let outcome = engine
            .try_apply(burning(6.0).with_tick_damage(1.0).with_source("torch"), 0.0)
            .unwrap();

        assert_eq!(outcome, Applied::Merged);
        assert_eq!(engine.len(), 1);
        let merged = engine.get(StatusKind::Burning).unwrap();
        assert_eq!(merged.remaining, 6.0);
        assert_eq!(merged.intensity, 2.0);
        assert_eq!(merged.tick_damage, 1.0);
        assert_eq!(merged.source.as_deref(), Some("torch"));
    }

    #[test]
    fn conflicting_kind_is_removed_first() {
        let mut engine = StatusEngine::new();
        engine.apply(StatusCondition::new(StatusKind::Frozen, 5.0), 0.0);
        engine.apply(burning(5.0), 0.0);

        assert!(!engine.has(StatusKind::Frozen));
        assert!(engine.has(StatusKind::Burning));
    }

    #[test]
    fn ticks_accumulate_before_expiry() {
        let mut engine = StatusEngine::new();
        engine.apply(burning(1.0), 0.0);

        let tick = engine.advance(1.0);
        assert_eq!(tick.damage, 4.0);
        assert_eq!(tick.expired, vec![StatusKind::Burning]);
        assert!(engine.is_empty());
    }

    #[test]
    fn non_positive_dt_is_ignored() {
        let mut engine = StatusEngine::new();
        engine.apply(burning(1.0), 0.0);
        assert_eq!(engine.advance(0.0), StatusTick::default());
        assert_eq!(engine.advance(f64::NAN), StatusTick::default());
        assert_eq!(engine.get(StatusKind::Burning).unwrap().remaining, 1.0);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let mut engine = StatusEngine::new();
        assert_eq!(
            engine.try_apply(StatusCondition::new(StatusKind::Stunned, -5.0), 0.0),
            Err(StatusRejection::NegativeDuration(StatusKind::Stunned))
        );
        assert_eq!(
            engine.try_apply(StatusCondition::new(StatusKind::Stunned, f64::NAN), 0.0),
            Err(StatusRejection::Invalid(StatusKind::Stunned))
        );
        assert!(engine.is_empty());
        assert!(engine.can_act());
    }

    #[test]
    fn tick_credits_heaviest_applier() {
        let mut engine = StatusEngine::new();
        engine.apply(burning(5.0).with_applier(ActorId(7)), 0.0);
        engine.apply(
            StatusCondition::new(StatusKind::Poisoned, 5.0)
                .with_tick_damage(1.0)
                .with_applier(ActorId(8)),
            0.0,
        );

        let tick = engine.advance(1.0);
        assert_eq!(tick.damage, 5.0);
        assert_eq!(tick.dealt_by, Some(ActorId(7)));

        engine.apply(burning(5.0).with_applier(ActorId(9)), 0.0);
        assert_eq!(engine.get(StatusKind::Burning).unwrap().applier, Some(ActorId(9)));
    }

    #[test]
    fn grant_immunity_removes_active_condition() {
        let mut engine = StatusEngine::new();
        engine.apply(StatusCondition::new(StatusKind::Stunned, 2.0), 0.0);
        assert!(!engine.can_act());

        assert!(engine.grant_immunity(StatusKind::Stunned).is_some());
        assert!(engine.can_act());
        assert_eq!(
            engine.try_apply(StatusCondition::new(StatusKind::Stunned, 2.0), 0.0),
            Err(StatusRejection::Immune(StatusKind::Stunned))
        );

        engine.revoke_immunity(StatusKind::Stunned);
        assert!(engine.apply(StatusCondition::new(StatusKind::Stunned, 2.0), 0.0));
    }

    #[test]
    fn blocking_queries() {
        let mut engine = StatusEngine::new();
        engine.apply(StatusCondition::new(StatusKind::Silenced, 5.0), 0.0);
        engine.apply(StatusCondition::new(StatusKind::Feared, 5.0), 0.0);

        assert!(engine.can_act());
        assert!(engine.can_move());
        assert!(!engine.can_cast());
        assert!(!engine.can_attack());
    }

    #[test]
    fn multipliers_combine_and_floor() {
        let mut engine = StatusEngine::new();
        engine.apply(StatusCondition::new(StatusKind::Slowed, 5.0), 0.0);
        engine.apply(StatusCondition::new(StatusKind::Rooted, 5.0), 0.0);
        assert_eq!(engine.movement_multiplier(), 0.5);

        engine.apply(StatusCondition::new(StatusKind::Weakened, 5.0), 0.0);
        engine.apply(StatusCondition::new(StatusKind::Berserking, 5.0), 0.0);
        assert!((engine.damage_multiplier(true) - 1.4).abs() < 1e-12);
        assert_eq!(engine.damage_multiplier(false), 1.5);

        engine.apply(StatusCondition::new(StatusKind::Invulnerable, 5.0), 0.0);
        assert_eq!(engine.damage_multiplier(false), 0.0);
    }

    #[test]
    fn cleanse_removes_only_matching_polarity() {
        let mut engine = StatusEngine::new();
        engine.apply(burning(5.0), 0.0);
        engine.apply(StatusCondition::new(StatusKind::Hasted, 5.0), 0.0);

        assert_eq!(engine.cleanse(Polarity::Debuff), vec![StatusKind::Burning]);
        assert!(engine.has(StatusKind::Hasted));
    }
}
