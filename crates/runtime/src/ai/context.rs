//! Evaluation context for combat behavior trees.
//!
//! The [`AiContext`] is the blackboard every combat node reads and writes
//! during one evaluation. It owns the acting actor and its target for the
//! duration of the evaluation (the orchestrator takes them out of the roster
//! and puts them back afterwards), the shared [`CombatRules`], the clock, a
//! seeded RNG, and any wind-up cast carried over from earlier evaluations.

use behavior_tree::{Blackboard, Status};
use combat_core::{AbilityId, ActionError, Combatant};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::decision::{
    ActionOutcome, CombatAction, CombatRules, execute_action, select_action, validate_action,
};
use super::{Strategy, ThreatLevel, assess_threat, choose_strategy};

/// A spell whose wind-up has started but not yet resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingCast {
    pub ability: AbilityId,
    pub started_at: f64,
    pub ready_at: f64,
}

impl PendingCast {
    pub fn is_ready(&self, now: f64) -> bool {
        now >= self.ready_at
    }
}

/// Blackboard for one actor's evaluation.
pub struct AiContext<A> {
    /// The deciding actor.
    pub actor: A,

    /// Current target, if it could be resolved.
    pub target: Option<A>,

    pub rules: CombatRules,

    /// Simulation time of this evaluation, in seconds.
    pub now: f64,

    rng: ChaCha8Rng,
    tree: String,
    evaluation: u64,
    pending: Option<PendingCast>,
    outcomes: Vec<ActionOutcome>,
}

/// What an evaluation leaves behind once the context is dismantled.
pub struct ContextParts<A> {
    pub actor: A,
    pub target: Option<A>,
    pub pending: Option<PendingCast>,
    pub outcomes: Vec<ActionOutcome>,
}

impl<A: Combatant> AiContext<A> {
    /// Creates a context for `actor` at time `now`.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for this evaluation's RNG; the orchestrator derives it
    ///   from its own seeded generator so whole battles replay exactly.
    pub fn new(actor: A, target: Option<A>, rules: CombatRules, now: f64, seed: u64) -> Self {
        Self {
            actor,
            target,
            rules,
            now,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tree: String::new(),
            evaluation: 0,
            pending: None,
            outcomes: Vec::new(),
        }
    }

    /// Restores a wind-up started by an earlier evaluation.
    pub fn with_pending(mut self, pending: Option<PendingCast>) -> Self {
        self.pending = pending;
        self
    }

    /// Name of the tree that last stamped this context.
    pub fn tree(&self) -> &str {
        &self.tree
    }

    /// Evaluation counter stamped by the tree.
    pub fn evaluation(&self) -> u64 {
        self.evaluation
    }

    pub fn pending(&self) -> Option<&PendingCast> {
        self.pending.as_ref()
    }

    pub fn is_casting(&self) -> bool {
        self.pending.is_some()
    }

    /// Outcomes produced so far in this evaluation.
    pub fn outcomes(&self) -> &[ActionOutcome] {
        &self.outcomes
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Living target, if any.
    pub fn living_target(&self) -> Option<&A> {
        self.target.as_ref().filter(|target| target.is_alive())
    }

    // ========================================================================
    // Decision helpers
    // ========================================================================

    /// Threat posed by the current target; `Low` without one.
    pub fn threat(&self) -> ThreatLevel {
        match self.living_target() {
            Some(target) => assess_threat(&self.actor, target),
            None => ThreatLevel::Low,
        }
    }

    pub fn strategy(&self) -> Strategy {
        choose_strategy(&self.actor, self.threat())
    }

    /// Runs the full decision pipeline: threat, strategy, action.
    pub fn decide(&mut self) -> CombatAction {
        let threat = self.threat();
        let strategy = choose_strategy(&self.actor, threat);
        let action = select_action(
            strategy,
            &self.actor,
            self.target.as_ref(),
            threat,
            &self.rules.catalog,
            &mut self.rng,
        );
        tracing::trace!(
            actor = %self.actor.id(),
            ?threat,
            ?strategy,
            %action,
            "decision"
        );
        action
    }

    // ========================================================================
    // Action execution
    // ========================================================================

    /// Performs `action`, starting a wind-up when the ability has one.
    ///
    /// Returns `Running` while a wind-up is in progress; the cast resolves
    /// through [`Self::continue_cast`] once the clock reaches its ready time.
    /// Mana is spent only at resolution, so an interrupted cast costs nothing.
    pub fn perform(&mut self, action: CombatAction) -> Status {
        if self.is_casting() {
            return self.continue_cast();
        }

        let wind_up = match &action {
            CombatAction::UseAbility(id) => self
                .rules
                .catalog
                .get(id)
                .map(|def| def.wind_up)
                .unwrap_or(0.0),
            _ => 0.0,
        };

        if wind_up > 0.0 {
            if let CombatAction::UseAbility(id) = &action {
                return self.begin_cast(id.clone(), wind_up);
            }
        }

        self.resolve(action)
    }

    /// Advances an in-flight cast.
    ///
    /// Returns `Failure` when nothing is being cast.
    pub fn continue_cast(&mut self) -> Status {
        let Some(pending) = self.pending.as_ref() else {
            return Status::Failure;
        };
        if !pending.is_ready(self.now) {
            return Status::Running;
        }
        let ability = pending.ability.clone();
        self.pending = None;
        self.resolve(CombatAction::UseAbility(ability))
    }

    /// Decides and performs an action immediately, ignoring wind-up.
    pub fn act_now(&mut self) -> ActionOutcome {
        let action = self.decide();
        let outcome = execute_action(
            &mut self.actor,
            self.target.as_mut(),
            &action,
            &self.rules,
            &mut self.rng,
        );
        self.outcomes.push(outcome.clone());
        outcome
    }

    /// Drops an in-flight cast without applying any of its effects.
    pub fn cancel_cast(&mut self) -> Option<PendingCast> {
        self.pending.take()
    }

    fn begin_cast(&mut self, ability: AbilityId, wind_up: f64) -> Status {
        let action = CombatAction::UseAbility(ability.clone());
        if let Err(error) = validate_action(&self.actor, self.target.as_ref(), &action, &self.rules)
        {
            return self.record_failure(action, &error);
        }

        let name = self
            .rules
            .catalog
            .get(&ability)
            .map(|def| def.name.clone())
            .unwrap_or_else(|_| ability.to_string());
        let message = format!("{} begins casting {}", self.actor.name(), name);
        tracing::debug!(actor = %self.actor.id(), %ability, wind_up, "{message}");

        self.pending = Some(PendingCast {
            ability,
            started_at: self.now,
            ready_at: self.now + wind_up,
        });
        self.outcomes.push(ActionOutcome::new(
            self.actor.id(),
            action,
            Status::Running,
            message,
        ));
        Status::Running
    }

    fn resolve(&mut self, action: CombatAction) -> Status {
        let outcome = execute_action(
            &mut self.actor,
            self.target.as_mut(),
            &action,
            &self.rules,
            &mut self.rng,
        );
        let status = outcome.status;
        self.outcomes.push(outcome);
        status
    }

    fn record_failure(&mut self, action: CombatAction, error: &ActionError) -> Status {
        tracing::debug!(actor = %self.actor.id(), %action, "{error}");
        self.outcomes.push(ActionOutcome::new(
            self.actor.id(),
            action,
            Status::Failure,
            error.to_string(),
        ));
        Status::Failure
    }

    /// Consumes the context, returning the actors and leftover state.
    pub fn into_parts(self) -> ContextParts<A> {
        ContextParts {
            actor: self.actor,
            target: self.target,
            pending: self.pending,
            outcomes: self.outcomes,
        }
    }
}

impl<A> Blackboard for AiContext<A> {
    fn now(&self) -> f64 {
        self.now
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn stamp(&mut self, tree: &str, evaluation: u64) {
        if self.tree != tree {
            self.tree = tree.to_owned();
        }
        self.evaluation = evaluation;
    }
}
