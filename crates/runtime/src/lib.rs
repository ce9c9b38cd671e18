//! Combat AI runtime.
//!
//! This crate drives [`combat_core`] actors with behavior trees. Consumers
//! register actors with an [`AiOrchestrator`] and tick it on their own clock,
//! or hand a roster to a [`Battle`] that supplies the clock itself.
//!
//! Modules are organized by responsibility:
//! - [`ai`] hosts the decision layer, its behavior-tree nodes and presets
//! - [`difficulty`] tracks player performance and scales enemies
//! - [`orchestrator`] owns per-actor registrations and ticks them
//! - [`battle`] runs complete encounters for simulations and tests
pub mod ai;
pub mod battle;
pub mod difficulty;
pub mod error;
pub mod orchestrator;

pub use ai::{
    ActionOutcome, AiContext, CombatAction, CombatRules, PendingCast, Strategy, ThreatLevel,
    presets,
};
pub use battle::{Battle, BattleConfig, BattleSummary};
pub use difficulty::{
    Adjustment, AdjustmentKind, BattleResult, DifficultyLevel, DifficultyModifiers,
    DifficultyScaler, PerformanceMetrics,
};
pub use error::{Result, RuntimeError};
pub use orchestrator::{
    AiOrchestrator, Registration, RegistrationOptions, RewardHook, TickReport,
};
