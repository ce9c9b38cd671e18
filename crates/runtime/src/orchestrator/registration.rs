use behavior_tree::DecisionTree;
use combat_core::ActorId;

use crate::ai::{AiContext, PendingCast};

/// Tolerance for cooldown comparisons on accumulated tick times.
const DUE_EPSILON: f64 = 1e-9;

/// Per-registration overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegistrationOptions {
    /// Seconds between decisions; the orchestrator default when `None`.
    pub cooldown: Option<f64>,
    /// Initial target; the weakest hostile actor when `None`.
    pub target: Option<ActorId>,
}

impl RegistrationOptions {
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: f64) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }
}

/// An actor under AI control.
///
/// Owns the actor's decision tree, so node progress is never shared.
#[derive(Debug)]
pub struct Registration<A> {
    pub(crate) tree: DecisionTree<AiContext<A>>,
    pub(crate) target: Option<ActorId>,
    pub(crate) last_action: Option<f64>,
    pub(crate) cooldown: f64,
    pub(crate) active: bool,
    pub(crate) pending: Option<PendingCast>,
}

impl<A> Registration<A> {
    pub(crate) fn new(
        tree: DecisionTree<AiContext<A>>,
        target: Option<ActorId>,
        cooldown: f64,
    ) -> Self {
        Self {
            tree,
            target,
            last_action: None,
            cooldown: cooldown.max(0.0),
            active: true,
            pending: None,
        }
    }

    /// Whether the actor should be evaluated at `now`.
    ///
    /// A wind-up in progress is checked every tick so it resolves on time.
    pub fn is_due(&self, now: f64) -> bool {
        if self.pending.is_some() {
            return true;
        }
        self.last_action
            .is_none_or(|last| now - last + DUE_EPSILON >= self.cooldown)
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.pending = None;
        self.tree.reset();
    }

    pub fn tree_name(&self) -> &str {
        self.tree.name()
    }

    pub fn evaluations(&self) -> u64 {
        self.tree.evaluations()
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn last_action(&self) -> Option<f64> {
        self.last_action
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<&PendingCast> {
        self.pending.as_ref()
    }
}
