//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result.
//! This module provides [`Inverter`] (NOT logic).

use crate::{Behavior, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` is passed through unchanged
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestContext;

    struct IsPositive;
    impl Behavior<TestContext> for IsPositive {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            Status::from(ctx.value > 0)
        }
    }

    struct AlwaysRunning;
    impl Behavior<TestContext> for AlwaysRunning {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            Status::Running
        }
    }

    #[test]
    fn inverter_inverts_success() {
        let mut inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext {
            value: 10,
            ..TestContext::default()
        };
        assert_eq!(inverter.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn inverter_inverts_failure() {
        let mut inverter = Inverter::new(Box::new(IsPositive));

        let mut ctx = TestContext {
            value: -10,
            ..TestContext::default()
        };
        assert_eq!(inverter.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn inverter_passes_running_through() {
        let mut inverter = Inverter::new(Box::new(AlwaysRunning));

        let mut ctx = TestContext::default();
        assert_eq!(inverter.tick(&mut ctx), Status::Running);
    }
}
