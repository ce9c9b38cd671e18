//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic), [`Selector`] (OR logic),
//! [`Parallel`] (threshold logic) and [`RandomChoice`] (random branch).

use crate::{Behavior, Blackboard, Status};

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately**, resets
///   its progress and returns `Failure`
/// - If a child returns `Running`, the sequence pauses at that child and
///   resumes there on the next evaluation
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence resets and returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    current: usize,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            current: 0,
        }
    }

    /// Index of the child the next evaluation starts from.
    pub fn current(&self) -> usize {
        self.current
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        while self.current < self.children.len() {
            match self.children[self.current].tick(ctx) {
                Status::Success => self.current += 1,
                Status::Running => return Status::Running,
                Status::Failure => {
                    self.reset();
                    return Status::Failure;
                }
            }
        }
        self.reset();
        Status::Success
    }

    fn reset(&mut self) {
        self.current = 0;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Executes child behaviors in sequence until one succeeds.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success`, the selector **stops immediately**, resets
///   its progress and returns `Success`
/// - If a child returns `Running`, the selector stops and returns `Running`;
///   the next evaluation starts again from the first child so higher
///   priority branches can take over
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    current: usize,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            children,
            current: 0,
        }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        while self.current < self.children.len() {
            match self.children[self.current].tick(ctx) {
                Status::Failure => self.current += 1,
                status => {
                    // Running children keep their own state; only the cursor rewinds.
                    self.current = 0;
                    return status;
                }
            }
        }
        self.reset();
        Status::Failure
    }

    fn reset(&mut self) {
        self.current = 0;
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Evaluates every child on every call and succeeds once enough of them do.
///
/// # Semantics
///
/// - `Success` as soon as at least `success_threshold` children succeed
/// - `Failure` as soon as the children that have not failed can no longer
///   reach the threshold; a `Running` child still counts as a possible success
/// - `Running` otherwise
pub struct Parallel<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    success_threshold: usize,
}

impl<C> Parallel<C> {
    /// Creates a new parallel node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty or if `success_threshold` is zero or
    /// larger than the number of children.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>, success_threshold: usize) -> Self {
        assert!(
            !children.is_empty(),
            "Parallel must have at least one child"
        );
        assert!(
            (1..=children.len()).contains(&success_threshold),
            "Parallel threshold must be between 1 and the number of children"
        );
        Self {
            children,
            success_threshold,
        }
    }

    /// Number of successful children required.
    pub fn success_threshold(&self) -> usize {
        self.success_threshold
    }
}

impl<C> Behavior<C> for Parallel<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let mut successes = 0;
        let mut failures = 0;
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                Status::Running => {}
            }
        }

        if successes >= self.success_threshold {
            self.reset();
            Status::Success
        } else if self.children.len() - failures < self.success_threshold {
            self.reset();
            Status::Failure
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        for child in &mut self.children {
            child.reset();
        }
    }
}

/// Picks one child at random and sticks with it until it finishes.
///
/// # Semantics
///
/// On the first evaluation of an activation a child is chosen uniformly via
/// [`Blackboard::pick`]. That child alone is evaluated until it returns
/// something other than `Running`; its result is returned and the choice is
/// cleared so the next activation picks again.
pub struct RandomChoice<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    chosen: Option<usize>,
}

impl<C> RandomChoice<C> {
    /// Creates a new random choice node.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "RandomChoice must have at least one child"
        );
        Self {
            children,
            chosen: None,
        }
    }

    /// The child currently being delegated to, if an activation is in progress.
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }
}

impl<C: Blackboard> Behavior<C> for RandomChoice<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let index = match self.chosen {
            Some(index) => index,
            None => ctx.pick(self.children.len()).min(self.children.len() - 1),
        };

        let status = self.children[index].tick(ctx);
        self.chosen = status.is_running().then_some(index);
        status
    }

    fn reset(&mut self) {
        self.chosen = None;
        for child in &mut self.children {
            child.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::testing::TestContext;

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    struct FailAlways;
    impl Behavior<TestContext> for FailAlways {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            Status::Failure
        }
    }

    /// Replays a fixed list of statuses, then repeats the last one.
    struct Scripted {
        script: VecDeque<Status>,
        last: Status,
        ticks: u32,
    }

    impl Scripted {
        fn new(script: &[Status]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                last: Status::Success,
                ticks: 0,
            }
        }
    }

    impl Behavior<TestContext> for Scripted {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            self.ticks += 1;
            if let Some(next) = self.script.pop_front() {
                self.last = next;
            }
            self.last
        }
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = Sequence::new(vec![Box::new(Increment), Box::new(Increment)]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let mut seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(FailAlways),
            Box::new(Increment), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1); // Only first increment executed
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn sequence_resumes_running_child() {
        let mut seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(Scripted::new(&[Status::Running, Status::Success])),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(seq.current(), 1);
        assert_eq!(ctx.value, 1);

        // First child is not re-run on resume.
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn sequence_failure_after_running_resets_index() {
        let mut seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(Scripted::new(&[Status::Running, Status::Failure])),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(seq.current(), 1);
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let mut sel = Selector::new(vec![
            Box::new(FailAlways),
            Box::new(Increment),
            Box::new(Increment), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1); // Only one Increment executed
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut sel = Selector::new(vec![Box::new(FailAlways), Box::new(FailAlways)]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn selector_restarts_from_first_child_after_running() {
        let mut sel = Selector::new(vec![
            Box::new(Scripted::new(&[Status::Failure, Status::Success])),
            Box::new(Scripted::new(&[Status::Running])),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        // Higher priority child now succeeds and pre-empts the running branch.
        assert_eq!(sel.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn parallel_succeeds_at_threshold() {
        let mut par = Parallel::new(
            vec![
                Box::new(Increment),
                Box::new(FailAlways),
                Box::new(Increment),
            ],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn parallel_fails_when_threshold_unreachable() {
        let mut par = Parallel::new(
            vec![
                Box::new(FailAlways),
                Box::new(FailAlways),
                Box::new(Scripted::new(&[Status::Running])),
            ],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn parallel_counts_running_as_possible_success() {
        let mut par = Parallel::new(
            vec![
                Box::new(Increment),
                Box::new(FailAlways),
                Box::new(Scripted::new(&[Status::Running, Status::Success])),
            ],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Running);
        assert_eq!(par.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn random_choice_sticks_with_running_child() {
        let mut choice = RandomChoice::new(vec![
            Box::new(Increment),
            Box::new(Scripted::new(&[Status::Running, Status::Running, Status::Success])),
        ]);

        let mut ctx = TestContext::default();
        ctx.picks.push_back(1);
        assert_eq!(choice.tick(&mut ctx), Status::Running);
        assert_eq!(choice.chosen(), Some(1));

        // Would pick 0 if asked again; the running child keeps control.
        ctx.picks.push_back(0);
        assert_eq!(choice.tick(&mut ctx), Status::Running);
        assert_eq!(choice.tick(&mut ctx), Status::Success);
        assert_eq!(choice.chosen(), None);
        assert_eq!(ctx.value, 0);

        // New activation consumes the queued pick.
        assert_eq!(choice.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }
}
