//! Lightweight tri-state behavior tree library for tick-driven combat AI.
//!
//! This library provides a minimal behavior tree implementation where nodes
//! may span several evaluations (spell wind-ups, timed waits).
//!
//! - **Tri-state**: Every node returns Success, Failure or Running
//! - **Caller-driven time**: Time only advances when the caller ticks the tree
//!   again; [`Blackboard::now`] supplies the clock
//! - **Owned progress**: Nodes keep their own progress, so every actor owns
//!   its own [`DecisionTree`] instance
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Blackboard`]: Clock, randomness and stamping capabilities of a context
//! - [`Status`]: Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`], [`Parallel`], [`RandomChoice`]
//! - Leaf nodes: [`Condition`], [`Action`], [`Wait`]
//! - Decorator nodes: [`Inverter`]
//! - Root: [`DecisionTree`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Blackboard};
pub use composite::{Parallel, RandomChoice, Selector, Sequence};
pub use decorator::Inverter;
pub use leaf::{Action, Condition, Wait};
pub use status::Status;
pub use tree::DecisionTree;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use crate::Blackboard;

    /// Minimal blackboard used by the unit tests.
    #[derive(Debug, Default)]
    pub struct TestContext {
        pub value: i32,
        pub clock: f64,
        pub picks: VecDeque<usize>,
        pub stamps: Vec<(String, u64)>,
    }

    impl Blackboard for TestContext {
        fn now(&self) -> f64 {
            self.clock
        }

        fn pick(&mut self, _len: usize) -> usize {
            self.picks.pop_front().unwrap_or(0)
        }

        fn stamp(&mut self, tree: &str, evaluation: u64) {
            self.stamps.push((tree.to_string(), evaluation));
        }
    }
}
