//! Combat rules and the actor model shared by the runtime and offline tools.
//!
//! `combat-core` holds the numeric side of a fight: the [`status`] engine for
//! timed conditions, damage resolution in [`combat`], and the [`ability`]
//! catalog with its effect registry. Actors are owned by the caller and seen
//! only through the [`Combatant`] trait. Nothing here keeps global state or
//! performs I/O; randomness is always passed in.
pub mod ability;
pub mod actor;
pub mod combat;
pub mod config;
pub mod error;
pub mod status;

pub use ability::{
    AbilityCatalog, AbilityDef, AbilityId, AbilityKind, AbilitySet, ActionError, CatalogError,
    Effect, EffectRegistry, EffectSpec,
};
pub use actor::{
    Actor, ActorBuilder, ActorId, AiTuning, Combatant, ResourceKind, ResourceMeter, Resources,
    Roster, StatBlock, StatKind, StatScaling, Team,
};
pub use combat::{
    CategoryDamage, DamageCategory, DamageMap, DamageReport, DamageRequest, Passive,
};
pub use config::{
    BalanceConfig, CombatConfig, DamageFormula, DifficultyConfig, HitChanceRules,
    OrchestratorConfig,
};
pub use error::{CombatFault, ErrorSeverity};
pub use status::{
    Polarity, StatusCondition, StatusEngine, StatusFlags, StatusKind, StatusRejection, StatusTick,
};
