//! Fixed-step battle driver.
//!
//! A [`Battle`] advances every living actor's conditions, ticks the
//! orchestrator, and stops as soon as one side has no living actors or the
//! time limit passes. Kills by periodic damage are credited to the actor
//! that applied the condition.

use combat_core::{ActorId, Combatant, Roster, Team, status};

use crate::ai::ActionOutcome;
use crate::difficulty::BattleResult;
use crate::orchestrator::AiOrchestrator;

/// Tick cadence and time limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattleConfig {
    /// Seconds per tick.
    pub dt: f64,
    /// Battles still undecided after this many seconds end in a draw.
    pub time_limit: f64,
}

impl BattleConfig {
    pub const DEFAULT_DT: f64 = 0.1;
    pub const DEFAULT_TIME_LIMIT: f64 = 120.0;
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            dt: Self::DEFAULT_DT,
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }
}

/// How a battle ended, seen from the player side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleSummary {
    /// Winning team; `None` on a draw or timeout.
    pub winner: Option<Team>,
    pub started_at: f64,
    pub duration: f64,
    /// Damage dealt by player-side actors, including their conditions.
    pub damage_dealt: f64,
    /// Damage taken by player-side actors.
    pub damage_received: f64,
    /// Combat log lines, timestamped.
    pub log: Vec<String>,
    pub actions: usize,
    pub defeats: Vec<(ActorId, ActorId)>,
}

impl BattleSummary {
    pub fn player_won(&self) -> bool {
        self.winner == Some(Team::Player)
    }

    pub fn finished_at(&self) -> f64 {
        self.started_at + self.duration
    }

    /// Converts the summary into a scaler input.
    pub fn to_result(&self) -> BattleResult {
        BattleResult {
            player_won: self.player_won(),
            damage_dealt: self.damage_dealt,
            damage_received: self.damage_received,
            duration: self.duration,
            finished_at: self.finished_at(),
        }
    }
}

/// Runs one encounter on a roster of player and enemy actors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Battle {
    config: BattleConfig,
}

impl Battle {
    pub fn new(config: BattleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Runs until one side is defeated or the time limit passes.
    ///
    /// Actors must already be registered with `orchestrator`; the battle
    /// only supplies the clock.
    pub fn run<A: Combatant>(
        &self,
        roster: &mut Roster<A>,
        orchestrator: &mut AiOrchestrator<A>,
        start: f64,
    ) -> BattleSummary {
        let dt = self.config.dt.max(f64::EPSILON);
        let mut summary = BattleSummary {
            started_at: start,
            ..BattleSummary::default()
        };
        tracing::info!(start, actors = roster.len(), "battle started");

        let mut elapsed = 0.0;
        loop {
            let now = start + elapsed;

            for (defeated, dealt_by) in self.advance_conditions(roster, elapsed, &mut summary) {
                if let Some(victor) = orchestrator.record_defeat(defeated, dealt_by) {
                    summary.defeats.push((defeated, victor));
                }
            }

            let report = orchestrator.tick(roster, now);
            for outcome in &report.outcomes {
                record_outcome(roster, outcome, now, &mut summary);
            }
            summary.defeats.extend(report.defeats);

            let players = roster.team_alive(Team::Player);
            let enemies = roster.team_alive(Team::Enemy);
            if !players || !enemies {
                summary.winner = match (players, enemies) {
                    (true, false) => Some(Team::Player),
                    (false, true) => Some(Team::Enemy),
                    _ => None,
                };
                summary.duration = elapsed;
                break;
            }
            if elapsed >= self.config.time_limit {
                summary.duration = elapsed;
                tracing::info!(limit = self.config.time_limit, "battle timed out");
                break;
            }
            elapsed += dt;
        }

        tracing::info!(
            winner = ?summary.winner,
            duration = summary.duration,
            damage_dealt = summary.damage_dealt,
            damage_received = summary.damage_received,
            "battle finished"
        );
        summary
    }

    /// Returns actors killed by their conditions, with the applier credited
    /// for the killing tick.
    fn advance_conditions<A: Combatant>(
        &self,
        roster: &mut Roster<A>,
        elapsed: f64,
        summary: &mut BattleSummary,
    ) -> Vec<(ActorId, Option<ActorId>)> {
        let mut deaths = Vec::new();
        if elapsed <= 0.0 {
            return deaths;
        }
        for actor in roster.iter_mut().filter(|actor| actor.is_alive()) {
            let before = actor.health().current();
            let tick = status::update(actor, self.config.dt);
            let lost = (before - actor.health().current()).max(0.0);
            if lost > 0.0 {
                if actor.team() == Team::Player {
                    summary.damage_received += lost;
                } else {
                    summary.damage_dealt += lost;
                }
            }
            for kind in &tick.expired {
                summary
                    .log
                    .push(format!("[{elapsed:.1}s] {} is no longer {}", actor.name(), kind));
            }
            if !actor.is_alive() {
                summary
                    .log
                    .push(format!("[{elapsed:.1}s] {} succumbs", actor.name()));
                deaths.push((actor.id(), tick.dealt_by));
            }
        }
        deaths
    }
}

fn record_outcome<A: Combatant>(
    roster: &Roster<A>,
    outcome: &ActionOutcome,
    now: f64,
    summary: &mut BattleSummary,
) {
    summary.actions += 1;
    summary.log.push(format!("[{now:.1}s] {}", outcome.message));

    let player_side = roster
        .get(outcome.actor)
        .is_some_and(|actor| actor.team() == Team::Player);
    if player_side {
        summary.damage_dealt += outcome.damage_dealt;
    } else {
        summary.damage_received += outcome.damage_dealt;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use combat_core::{Actor, OrchestratorConfig, StatKind, StatusCondition, StatusKind};

    use super::*;
    use crate::ai::{CombatRules, presets};
    use crate::difficulty::DifficultyScaler;
    use crate::orchestrator::RegistrationOptions;

    fn setup(enemy_health: f64) -> (Roster<Actor>, AiOrchestrator<Actor>) {
        let mut roster = Roster::new();
        roster.insert(
            Actor::builder(ActorId(1), "Hero")
                .team(Team::Player)
                .health(120.0)
                .stat(StatKind::Attack, 14.0)
                .build(),
        );
        roster.insert(
            Actor::builder(ActorId(2), "Slime")
                .health(enemy_health)
                .stat(StatKind::Attack, 2.0)
                .build(),
        );

        let mut ai = AiOrchestrator::new(
            CombatRules::builtin(),
            DifficultyScaler::default(),
            OrchestratorConfig::default(),
            11,
        );
        for id in [ActorId(1), ActorId(2)] {
            ai.register(&mut roster, id, presets::berserker(), RegistrationOptions::default())
                .unwrap();
        }
        (roster, ai)
    }

    #[test]
    fn strong_player_wins() {
        let (mut roster, mut ai) = setup(30.0);
        let summary = Battle::default().run(&mut roster, &mut ai, 100.0);

        assert_eq!(summary.winner, Some(Team::Player));
        assert!(summary.damage_dealt >= 30.0);
        assert!(summary.duration < BattleConfig::DEFAULT_TIME_LIMIT);
        assert_eq!(summary.defeats, vec![(ActorId(2), ActorId(1))]);

        let result = summary.to_result();
        assert!(result.player_won);
        assert_eq!(result.finished_at, 100.0 + summary.duration);
    }

    #[test]
    fn burn_kill_is_credited_to_applier() {
        let (mut roster, mut ai) = setup(3.0);
        let defeats = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&defeats);
        ai.set_reward_hook(move |defeated, victor| {
            sink.lock().unwrap().push((defeated, victor));
        });
        status::apply(
            roster.get_mut(ActorId(1)).unwrap(),
            StatusCondition::permanent(StatusKind::Stunned),
        );
        status::apply(
            roster.get_mut(ActorId(2)).unwrap(),
            StatusCondition::new(StatusKind::Burning, 5.0)
                .with_tick_damage(10.0)
                .with_applier(ActorId(1)),
        );

        let summary = Battle::default().run(&mut roster, &mut ai, 0.0);

        assert_eq!(summary.winner, Some(Team::Player));
        assert_eq!(summary.defeats, vec![(ActorId(2), ActorId(1))]);
        assert_eq!(*defeats.lock().unwrap(), vec![(ActorId(2), ActorId(1))]);
        assert!(summary.log.iter().any(|line| line.ends_with("Slime succumbs")));
    }

    #[test]
    fn time_limit_ends_in_draw() {
        let (mut roster, mut ai) = setup(1_000_000.0);
        let battle = Battle::new(BattleConfig {
            dt: 0.5,
            time_limit: 5.0,
        });
        let summary = battle.run(&mut roster, &mut ai, 0.0);

        assert_eq!(summary.winner, None);
        assert!(!summary.player_won());
        assert_eq!(summary.duration, 5.0);
    }
}
