//! Player performance tracking.

use std::collections::VecDeque;

/// Outcome of one finished battle, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattleResult {
    pub player_won: bool,
    pub damage_dealt: f64,
    pub damage_received: f64,
    /// Battle length in seconds.
    pub duration: f64,
    /// Simulation time at which the battle ended.
    pub finished_at: f64,
}

/// Aggregated results and a rolling window of recent outcomes.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceMetrics {
    pub wins: u32,
    pub losses: u32,
    pub win_streak: u32,
    pub loss_streak: u32,
    pub damage_dealt: f64,
    pub damage_received: f64,
    pub battles: u32,
    pub average_duration: f64,
    recent: VecDeque<bool>,
    window: usize,
}

impl PerformanceMetrics {
    /// Empty metrics keeping the last `window` outcomes (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            wins: 0,
            losses: 0,
            win_streak: 0,
            loss_streak: 0,
            damage_dealt: 0.0,
            damage_received: 0.0,
            battles: 0,
            average_duration: 0.0,
            recent: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Folds one battle into the totals.
    pub fn record(&mut self, result: &BattleResult) {
        if result.player_won {
            self.wins += 1;
            self.win_streak += 1;
            self.loss_streak = 0;
        } else {
            self.losses += 1;
            self.loss_streak += 1;
            self.win_streak = 0;
        }

        self.damage_dealt += result.damage_dealt.max(0.0);
        self.damage_received += result.damage_received.max(0.0);

        self.battles += 1;
        let duration = result.duration.max(0.0);
        self.average_duration += (duration - self.average_duration) / f64::from(self.battles);

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(result.player_won);
    }

    /// Win rate over the rolling window, `None` before any battle.
    pub fn recent_win_rate(&self) -> Option<f64> {
        if self.recent.is_empty() {
            return None;
        }
        let wins = self.recent.iter().filter(|won| **won).count();
        Some(wins as f64 / self.recent.len() as f64)
    }

    /// Lifetime win rate, `None` before any battle.
    pub fn win_rate(&self) -> Option<f64> {
        (self.battles > 0).then(|| f64::from(self.wins) / f64::from(self.battles))
    }

    pub fn recent(&self) -> impl Iterator<Item = bool> + '_ {
        self.recent.iter().copied()
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
