//! Difficulty Scaler.
//!
//! [`DifficultyScaler`] watches [`BattleResult`]s through
//! [`PerformanceMetrics`] and steps the [`DifficultyLevel`] up or down one
//! tier at a time. The active level's [`DifficultyModifiers`] are applied to
//! enemies when they are registered with the orchestrator.

pub mod level;
pub mod metrics;
pub mod scaler;

pub use level::{DifficultyLevel, DifficultyModifiers};
pub use metrics::{BattleResult, PerformanceMetrics};
pub use scaler::{Adjustment, AdjustmentKind, DifficultyScaler};
