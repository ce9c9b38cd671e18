//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{
    Action, Behavior, Blackboard, Condition, Inverter, Parallel, RandomChoice, Selector, Sequence,
    Status, Wait,
};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates a parallel node that succeeds once `threshold` children succeed.
#[inline]
pub fn parallel<C: 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
    threshold: usize,
) -> Box<dyn Behavior<C>> {
    Box::new(Parallel::new(children, threshold))
}

/// Creates a random choice node.
#[inline]
pub fn random_choice<C: Blackboard + 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(RandomChoice::new(children))
}

/// Creates a condition node from a predicate.
#[inline]
pub fn condition<C: 'static>(
    name: &'static str,
    predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Condition::new(name, predicate))
}

/// Creates an action node from an operation.
#[inline]
pub fn action<C: 'static>(
    name: &'static str,
    operation: impl FnMut(&mut C) -> Status + Send + Sync + 'static,
) -> Box<dyn Behavior<C>> {
    Box::new(Action::new(name, operation))
}

/// Creates a wait node.
#[inline]
pub fn wait<C: Blackboard + 'static>(duration: f64) -> Box<dyn Behavior<C>> {
    Box::new(Wait::new(duration))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(child))`.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}
