//! Adaptive difficulty controller.

use combat_core::{Combatant, DifficultyConfig, Team};

use super::{BattleResult, DifficultyLevel, DifficultyModifiers, PerformanceMetrics};

/// Direction of a level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AdjustmentKind {
    Promoted,
    Demoted,
}

/// A level change made by [`DifficultyScaler::check_adjustment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub from: DifficultyLevel,
    pub to: DifficultyLevel,
    pub at: f64,
}

/// State machine over [`DifficultyLevel`] driven by battle results.
///
/// # Transitions
///
/// Evaluated only once `min_battles` results have been recorded since the
/// last adjustment and `cooldown` seconds have passed since it:
///
/// ```text
/// promote: recent win rate > target + band  or  win streak  >= promote_streak
/// demote:  recent win rate < target - band  or  loss streak >= demote_streak
/// ```
///
/// Each check moves at most one level and never past either end.
#[derive(Clone, Debug)]
pub struct DifficultyScaler {
    level: DifficultyLevel,
    metrics: PerformanceMetrics,
    config: DifficultyConfig,
    since_adjustment: u32,
    last_adjustment: Option<f64>,
}

impl Default for DifficultyScaler {
    fn default() -> Self {
        Self::new(DifficultyConfig::default())
    }
}

impl DifficultyScaler {
    pub fn new(config: DifficultyConfig) -> Self {
        Self::with_level(config, DifficultyLevel::default())
    }

    pub fn with_level(config: DifficultyConfig, level: DifficultyLevel) -> Self {
        Self {
            level,
            metrics: PerformanceMetrics::new(config.window),
            config,
            since_adjustment: 0,
            last_adjustment: None,
        }
    }

    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// Modifier bundle of the current level.
    pub fn modifiers(&self) -> DifficultyModifiers {
        self.level.modifiers()
    }

    /// Sets the level directly. Counters and cooldown are untouched.
    pub fn force_level(&mut self, level: DifficultyLevel) {
        if level != self.level {
            tracing::info!(from = %self.level, to = %level, "difficulty forced");
        }
        self.level = level;
    }

    /// Records a finished battle and runs the adjustment check at the
    /// battle's end time.
    pub fn record_battle_result(&mut self, result: BattleResult) -> Option<Adjustment> {
        self.metrics.record(&result);
        self.since_adjustment += 1;
        tracing::debug!(
            won = result.player_won,
            win_streak = self.metrics.win_streak,
            loss_streak = self.metrics.loss_streak,
            battles = self.metrics.battles,
            "battle recorded"
        );
        self.check_adjustment(result.finished_at)
    }

    /// Moves one level up or down if the thresholds call for it.
    ///
    /// # Returns
    ///
    /// The adjustment made, or `None` if the level is unchanged (including
    /// when a move is called for but the level is already at that end).
    pub fn check_adjustment(&mut self, now: f64) -> Option<Adjustment> {
        if self.since_adjustment < self.config.min_battles {
            return None;
        }
        if let Some(last) = self.last_adjustment {
            if now - last < self.config.cooldown {
                return None;
            }
        }

        let kind = self.wanted_adjustment()?;
        let to = match kind {
            AdjustmentKind::Promoted => self.level.harder(),
            AdjustmentKind::Demoted => self.level.easier(),
        };
        if to == self.level {
            tracing::debug!(level = %self.level, %kind, "difficulty already at limit");
            return None;
        }

        let adjustment = Adjustment {
            kind,
            from: self.level,
            to,
            at: now,
        };
        tracing::info!(
            from = %adjustment.from,
            to = %adjustment.to,
            win_rate = self.metrics.recent_win_rate(),
            win_streak = self.metrics.win_streak,
            loss_streak = self.metrics.loss_streak,
            "difficulty {}",
            kind
        );

        self.level = to;
        self.since_adjustment = 0;
        self.last_adjustment = Some(now);
        Some(adjustment)
    }

    fn wanted_adjustment(&self) -> Option<AdjustmentKind> {
        let config = &self.config;
        let win_rate = self
            .metrics
            .recent_win_rate()
            .unwrap_or(config.target_win_rate);

        if win_rate > config.target_win_rate + config.band
            || self.metrics.win_streak >= config.promote_streak
        {
            Some(AdjustmentKind::Promoted)
        } else if win_rate < config.target_win_rate - config.band
            || self.metrics.loss_streak >= config.demote_streak
        {
            Some(AdjustmentKind::Demoted)
        } else {
            None
        }
    }

    /// Applies the current modifiers to an enemy.
    ///
    /// Base health, damage, speed, mana and defense are rescaled (current
    /// resources are clamped to the new maxima) and the AI knobs are stored
    /// on the actor. Player-side actors are left alone.
    pub fn apply_modifiers_to_enemy<A: Combatant + ?Sized>(&self, actor: &mut A) {
        if actor.team() == Team::Player {
            return;
        }
        let modifiers = self.modifiers();
        actor.apply_difficulty(&modifiers.stat_scaling(), modifiers.tuning());
        tracing::debug!(actor = %actor.id(), level = %self.level, "difficulty applied");
    }

    /// Clears every recorded result. Level is kept.
    pub fn reset_metrics(&mut self) {
        self.metrics = PerformanceMetrics::new(self.config.window);
        self.since_adjustment = 0;
        self.last_adjustment = None;
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Actor, ActorId, StatKind};

    use super::*;

    fn result(player_won: bool, finished_at: f64) -> BattleResult {
        BattleResult {
            player_won,
            damage_dealt: 0.0,
            damage_received: 0.0,
            duration: 10.0,
            finished_at,
        }
    }

    #[test]
    fn needs_min_battles() {
        let mut scaler = DifficultyScaler::default();
        assert_eq!(scaler.record_battle_result(result(true, 100.0)), None);
        assert_eq!(scaler.record_battle_result(result(true, 200.0)), None);
        let adjustment = scaler.record_battle_result(result(true, 300.0)).unwrap();
        assert_eq!(adjustment.kind, AdjustmentKind::Promoted);
        assert_eq!(scaler.level(), DifficultyLevel::Hard);
    }

    #[test]
    fn cooldown_blocks_back_to_back_changes() {
        let mut scaler = DifficultyScaler::default();
        for i in 0..3 {
            scaler.record_battle_result(result(false, f64::from(i)));
        }
        assert_eq!(scaler.level(), DifficultyLevel::Easy);

        for i in 3..9 {
            scaler.record_battle_result(result(false, f64::from(i)));
        }
        assert_eq!(scaler.level(), DifficultyLevel::Easy);

        assert!(scaler.check_adjustment(100.0).is_some());
        assert_eq!(scaler.level(), DifficultyLevel::VeryEasy);
    }

    #[test]
    fn mixed_results_hold() {
        let mut scaler = DifficultyScaler::new(DifficultyConfig {
            min_battles: 4,
            ..DifficultyConfig::default()
        });
        for (i, won) in [true, false, true, false, true, false].into_iter().enumerate() {
            assert_eq!(scaler.record_battle_result(result(won, i as f64 * 100.0)), None);
        }
        assert_eq!(scaler.level(), DifficultyLevel::Normal);
    }

    #[test]
    fn enemy_is_scaled_player_is_not() {
        let mut scaler = DifficultyScaler::default();
        scaler.force_level(DifficultyLevel::Extreme);

        let mut ogre = Actor::builder(ActorId(1), "Ogre")
            .health(100.0)
            .stat(StatKind::Attack, 10.0)
            .build();
        scaler.apply_modifiers_to_enemy(&mut ogre);
        assert_eq!(ogre.health().maximum(), 200.0);
        assert_eq!(ogre.stat(StatKind::Attack), 17.5);
        assert_eq!(ogre.tuning().aggression, 1.6);

        let mut hero = Actor::builder(ActorId(2), "Hero")
            .team(Team::Player)
            .health(100.0)
            .build();
        scaler.apply_modifiers_to_enemy(&mut hero);
        assert_eq!(hero.health().maximum(), 100.0);
    }

    #[test]
    fn reset_clears_counters() {
        let mut scaler = DifficultyScaler::default();
        scaler.record_battle_result(result(true, 0.0));
        scaler.reset_metrics();
        assert_eq!(scaler.metrics().battles, 0);
        assert_eq!(scaler.metrics().win_streak, 0);
        assert_eq!(scaler.level(), DifficultyLevel::Normal);
    }
}
