//! Leaf behavior nodes.
//!
//! Leaves do the actual work of a tree: [`Condition`] checks a predicate,
//! [`Action`] performs a side effect, and [`Wait`] lets time pass.

use crate::{Behavior, Blackboard, Status};

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;
type Operation<C> = Box<dyn FnMut(&mut C) -> Status + Send + Sync>;

/// Evaluates a predicate against the context.
///
/// Returns `Success` when the predicate holds and `Failure` otherwise; a
/// condition is never `Running`.
pub struct Condition<C> {
    name: &'static str,
    predicate: Predicate<C>,
}

impl<C> Condition<C> {
    /// Creates a named condition from a predicate.
    pub fn new(name: &'static str, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Condition<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        Status::from((self.predicate)(ctx))
    }
}

/// Invokes a side-effecting operation and reports whatever it returns.
pub struct Action<C> {
    name: &'static str,
    operation: Operation<C>,
}

impl<C> Action<C> {
    /// Creates a named action from an operation.
    pub fn new(
        name: &'static str,
        operation: impl FnMut(&mut C) -> Status + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            operation: Box::new(operation),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> Behavior<C> for Action<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        (self.operation)(ctx)
    }
}

/// Returns `Running` until a wall-clock duration has elapsed.
///
/// The start time is recorded on the first evaluation of an activation;
/// once `now - start >= duration` the node returns `Success` and clears its
/// timer so the next activation waits again.
pub struct Wait {
    duration: f64,
    started_at: Option<f64>,
}

impl Wait {
    /// Creates a wait node for `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            started_at: None,
        }
    }

    /// Time at which the current activation started waiting.
    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }
}

impl<C: Blackboard> Behavior<C> for Wait {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let now = ctx.now();
        let started_at = *self.started_at.get_or_insert(now);

        if now - started_at >= self.duration {
            self.started_at = None;
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        self.started_at = None;
    }
}
