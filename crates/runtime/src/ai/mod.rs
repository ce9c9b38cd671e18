//! Combat AI Decision Layer.
//!
//! Decision making runs in three steps:
//!
//! 1. **Threat**: [`assess_threat`] scores how dangerous the target is
//! 2. **Strategy**: [`choose_strategy`] picks a stance from threat and resources
//! 3. **Action**: [`select_action`] turns the stance into a [`CombatAction`],
//!    which [`execute_action`] performs
//!
//! The same pipeline is exposed to behavior trees through [`nodes`] and
//! assembled into ready-made trees in [`presets`]. Difficulty tuning reaches
//! the layer only through the aggression and spell-frequency values stored on
//! the actor.

pub mod context;
pub mod decision;
pub mod nodes;
pub mod presets;
pub mod strategy;
pub mod threat;

pub use context::{AiContext, ContextParts, PendingCast};
pub use decision::{
    ActionOutcome, CombatAction, CombatRules, cheapest_heal, execute_action, is_usable,
    select_action, strongest_offense, validate_action,
};
pub use presets::Node;
pub use strategy::{Strategy, choose_strategy};
pub use threat::{ThreatLevel, assess_threat, threat_score};
