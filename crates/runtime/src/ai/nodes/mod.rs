//! Combat-specific behavior tree nodes.
//!
//! Nodes are divided into:
//!
//! - `conditions`: read the [`crate::ai::AiContext`] and return Success/Failure
//! - `actions`: perform combat actions through the context

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
