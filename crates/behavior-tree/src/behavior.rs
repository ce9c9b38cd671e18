//! Core behavior trait and blackboard capabilities.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access game state and make decisions.
//!
//! Nodes that depend on time or randomness ([`crate::Wait`],
//! [`crate::RandomChoice`]) and the [`crate::DecisionTree`] root additionally
//! require the context to implement [`Blackboard`].

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
///
/// Nodes may keep transient progress between evaluations (current child,
/// wait start time, chosen branch). That progress belongs to the node
/// instance, so a tree must never be shared between actors that are
/// evaluated independently.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes can read
    ///   game state and modify it (e.g., to store intermediate results).
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs further evaluations
    fn tick(&mut self, ctx: &mut C) -> Status;

    /// Clears all transient progress held by this node and its children.
    fn reset(&mut self) {}
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&mut self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Capabilities a context must expose to time-based and random nodes.
pub trait Blackboard {
    /// Current simulation time in seconds.
    fn now(&self) -> f64;

    /// Picks an index uniformly from `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Records which tree is being evaluated and its evaluation counter.
    fn stamp(&mut self, tree: &str, evaluation: u64);
}
