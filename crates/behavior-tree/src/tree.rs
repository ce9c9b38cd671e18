//! Named tree root with an evaluation counter.

use crate::{Behavior, Blackboard, Status};

/// A named behavior tree.
///
/// A tree owns its nodes and therefore their transient progress. It is
/// deliberately not `Clone`: build one instance per actor (for example from a
/// preset constructor function) instead of sharing one.
pub struct DecisionTree<C> {
    name: String,
    root: Box<dyn Behavior<C>>,
    evaluations: u64,
}

impl<C> DecisionTree<C> {
    /// Creates a tree from a name and a root node.
    pub fn new(name: impl Into<String>, root: Box<dyn Behavior<C>>) -> Self {
        Self {
            name: name.into(),
            root,
            evaluations: 0,
        }
    }

    /// The tree's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of evaluations performed so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Clears the transient progress of every node in the tree.
    pub fn reset(&mut self) {
        self.root.reset();
    }
}

impl<C: Blackboard> DecisionTree<C> {
    /// Evaluates the tree once.
    ///
    /// The context is stamped with the tree name and the incremented
    /// evaluation counter before the root is ticked.
    pub fn evaluate(&mut self, ctx: &mut C) -> Status {
        self.evaluations += 1;
        ctx.stamp(&self.name, self.evaluations);
        self.root.tick(ctx)
    }
}

impl<C> core::fmt::Debug for DecisionTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecisionTree")
            .field("name", &self.name)
            .field("evaluations", &self.evaluations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{action, sequence, wait};
    use crate::testing::TestContext;

    #[test]
    fn evaluate_stamps_context() {
        let mut tree = DecisionTree::new(
            "counter",
            action("bump", |ctx: &mut TestContext| {
                ctx.value += 1;
                Status::Success
            }),
        );

        let mut ctx = TestContext::default();
        assert_eq!(tree.evaluate(&mut ctx), Status::Success);
        assert_eq!(tree.evaluate(&mut ctx), Status::Success);

        assert_eq!(tree.evaluations(), 2);
        assert_eq!(ctx.stamps, vec![("counter".to_string(), 1), ("counter".to_string(), 2)]);
    }

    #[test]
    fn reset_clears_nested_progress() {
        let mut tree = DecisionTree::new(
            "patient",
            sequence(vec![
                wait(2.0),
                action("bump", |ctx: &mut TestContext| {
                    ctx.value += 1;
                    Status::Success
                }),
            ]),
        );

        let mut ctx = TestContext::default();
        assert_eq!(tree.evaluate(&mut ctx), Status::Running);

        ctx.clock = 5.0;
        tree.reset();
        // The wait restarts at the new clock value instead of finishing.
        assert_eq!(tree.evaluate(&mut ctx), Status::Running);
        ctx.clock = 7.0;
        assert_eq!(tree.evaluate(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }
}
