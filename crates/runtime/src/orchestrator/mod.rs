//! AI Orchestrator.
//!
//! The [`AiOrchestrator`] owns one [`Registration`] per AI-controlled actor
//! and drives them from a shared clock:
//!
//! ```text
//! AiOrchestrator
//! ├── registrations: BTreeMap<ActorId, Registration>  (stable tick order)
//! ├── scaler: DifficultyScaler                         (applied on register)
//! ├── rules: CombatRules                               (catalog, effects, balance)
//! └── reward_hook: Option<Box<dyn RewardHook>>         (defeat notifications)
//! ```
//!
//! Actors stay in the caller's [`Roster`]. During an evaluation the acting
//! actor and its target are moved into an [`AiContext`] and moved back
//! afterwards, even if the evaluation panics.

mod hook;
mod registration;

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use behavior_tree::{DecisionTree, Status};
use combat_core::{
    AbilityDef, ActorId, BalanceConfig, Combatant, OrchestratorConfig, Roster,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use hook::RewardHook;
pub use registration::{Registration, RegistrationOptions};

use crate::ai::{ActionOutcome, AiContext, CombatRules, PendingCast};
use crate::difficulty::DifficultyScaler;
use crate::error::{Result, RuntimeError};

/// Everything that happened during one [`AiOrchestrator::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub now: f64,
    /// Actors whose tree was evaluated, with the tree's result.
    pub evaluated: Vec<(ActorId, Status)>,
    /// Action outcomes in the order they happened.
    pub outcomes: Vec<ActionOutcome>,
    /// `(defeated, victor)` pairs.
    pub defeats: Vec<(ActorId, ActorId)>,
    /// Registrations marked inactive this tick.
    pub deactivated: Vec<ActorId>,
    /// Actors whose evaluation panicked and was skipped.
    pub failed: Vec<ActorId>,
}

impl TickReport {
    fn new(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Returns true if no actor did anything.
    pub fn is_idle(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Drives registered actors' decision trees on a shared clock.
pub struct AiOrchestrator<A> {
    registrations: BTreeMap<ActorId, Registration<A>>,
    scaler: DifficultyScaler,
    rules: CombatRules,
    config: OrchestratorConfig,
    rng: ChaCha8Rng,
    reward_hook: Option<Box<dyn RewardHook>>,
}

impl<A: Combatant> AiOrchestrator<A> {
    /// Creates an orchestrator.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for every random decision made through this
    ///   orchestrator; equal seeds replay equal battles.
    pub fn new(
        rules: CombatRules,
        scaler: DifficultyScaler,
        config: OrchestratorConfig,
        seed: u64,
    ) -> Self {
        Self {
            registrations: BTreeMap::new(),
            scaler,
            rules,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            reward_hook: None,
        }
    }

    /// Creates an orchestrator from a loaded balance file.
    pub fn from_balance(rules: CombatRules, balance: &BalanceConfig, seed: u64) -> Self {
        Self::new(
            rules,
            DifficultyScaler::new(balance.difficulty),
            balance.orchestrator,
            seed,
        )
    }

    pub fn set_reward_hook(&mut self, hook: impl RewardHook + 'static) {
        self.reward_hook = Some(Box::new(hook));
    }

    pub fn scaler(&self) -> &DifficultyScaler {
        &self.scaler
    }

    pub fn scaler_mut(&mut self) -> &mut DifficultyScaler {
        &mut self.scaler
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registration(&self, id: ActorId) -> Option<&Registration<A>> {
        self.registrations.get(&id)
    }

    /// Registered actor ids in tick order.
    pub fn registered(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.registrations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn is_active(&self, id: ActorId) -> bool {
        self.registrations.get(&id).is_some_and(|r| r.active)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Puts an actor from `roster` under AI control.
    ///
    /// Applies the current difficulty modifiers to the actor, grants a
    /// starter ability if it knows no usable offensive ability, and picks
    /// the weakest hostile actor as target unless one is given.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` for a second registration of the same actor and
    /// `UnknownActor` when the actor is not in the roster.
    pub fn register(
        &mut self,
        roster: &mut Roster<A>,
        id: ActorId,
        tree: DecisionTree<AiContext<A>>,
        options: RegistrationOptions,
    ) -> Result<()> {
        if self.registrations.contains_key(&id) {
            return Err(RuntimeError::AlreadyRegistered(id));
        }
        let actor = roster.get_mut(id).ok_or(RuntimeError::UnknownActor(id))?;

        self.scaler.apply_modifiers_to_enemy(actor);
        self.ensure_offense(actor);

        let target = options.target.or_else(|| roster.weakest_enemy_of(id));
        let cooldown = options.cooldown.unwrap_or(self.config.cooldown);
        tracing::info!(
            actor = %id,
            tree = tree.name(),
            target = ?target,
            cooldown,
            "registered"
        );
        self.registrations
            .insert(id, Registration::new(tree, target, cooldown));
        Ok(())
    }

    /// Grants the starter ability (or the cheapest offensive ability in the
    /// catalog) to an actor without a usable offense.
    ///
    /// An offensive ability is usable when its mana cost fits in the actor's
    /// mana pool.
    fn ensure_offense(&self, actor: &mut A) {
        let catalog = &self.rules.catalog;
        let pool = actor.mana().maximum();
        let usable = |def: &AbilityDef| def.kind.is_offensive() && def.mana_cost <= pool;
        let armed = actor
            .abilities()
            .offensive
            .iter()
            .any(|id| catalog.get(id).is_ok_and(usable));
        if armed {
            return;
        }

        let starter = catalog.starter().filter(|&def| usable(def)).or_else(|| {
            catalog
                .iter()
                .filter(|&def| usable(def))
                .min_by(|a, b| a.mana_cost.total_cmp(&b.mana_cost))
        });
        match starter {
            Some(def) => {
                grant(actor, def);
            }
            None => tracing::warn!(
                actor = %actor.id(),
                mana = pool,
                "catalog has no affordable offensive ability to grant; relying on basic attacks"
            ),
        }
    }

    /// Removes a registration, discarding any wind-up in progress.
    pub fn unregister(&mut self, id: ActorId) -> Option<Registration<A>> {
        let registration = self.registrations.remove(&id);
        if registration.is_some() {
            tracing::info!(actor = %id, "unregistered");
        }
        registration
    }

    /// Drops every registration, keeping the scaler and its history.
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    /// Cancels an in-flight cast and clears the tree's progress.
    ///
    /// No effect of the interrupted cast is applied and no mana is spent.
    pub fn interrupt(&mut self, id: ActorId) -> Result<Option<PendingCast>> {
        let registration = self
            .registrations
            .get_mut(&id)
            .ok_or(RuntimeError::NotRegistered(id))?;
        let cancelled = registration.pending.take();
        registration.tree.reset();
        if let Some(cast) = &cancelled {
            tracing::info!(actor = %id, ability = %cast.ability, "cast interrupted");
        }
        Ok(cancelled)
    }

    pub fn set_target(&mut self, id: ActorId, target: Option<ActorId>) -> Result<()> {
        let registration = self
            .registrations
            .get_mut(&id)
            .ok_or(RuntimeError::NotRegistered(id))?;
        registration.target = target;
        Ok(())
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluates every active, living, due registration once.
    ///
    /// Registrations are visited in id order. Dead or missing actors are
    /// marked inactive. A panic inside one evaluation is logged, that actor
    /// is skipped, and the rest of the tick proceeds.
    pub fn tick(&mut self, roster: &mut Roster<A>, now: f64) -> TickReport {
        let mut report = TickReport::new(now);
        let ids: Vec<ActorId> = self.registrations.keys().copied().collect();
        for id in ids {
            self.tick_one(roster, id, now, &mut report);
        }
        self.notify_defeats(&report.defeats);
        report
    }

    fn tick_one(&mut self, roster: &mut Roster<A>, id: ActorId, now: f64, report: &mut TickReport) {
        let Some(registration) = self.registrations.get_mut(&id) else {
            return;
        };
        if !registration.active {
            return;
        }

        match roster.get(id).map(|actor| actor.is_alive()) {
            Some(true) => {}
            Some(false) => {
                tracing::debug!(actor = %id, "defeated; deactivating");
                registration.deactivate();
                report.deactivated.push(id);
                return;
            }
            None => {
                tracing::warn!(actor = %id, "missing from roster; deactivating");
                registration.deactivate();
                report.deactivated.push(id);
                return;
            }
        }

        if !registration.is_due(now) {
            return;
        }

        let target_alive = registration
            .target
            .and_then(|target| roster.get(target))
            .is_some_and(|target| target.is_alive());
        if !target_alive {
            registration.target = roster.weakest_enemy_of(id);
        }

        let Some(actor) = roster.remove(id) else {
            return;
        };
        let target = registration
            .target
            .filter(|target| *target != id)
            .and_then(|target| roster.remove(target));

        let seed = self.rng.next_u64();
        let mut ctx = AiContext::new(actor, target, self.rules.clone(), now, seed)
            .with_pending(registration.pending.take());

        let tree = &mut registration.tree;
        let result = panic::catch_unwind(AssertUnwindSafe(|| tree.evaluate(&mut ctx)));

        let parts = ctx.into_parts();
        roster.insert(parts.actor);
        if let Some(target) = parts.target {
            roster.insert(target);
        }

        match result {
            Ok(status) => {
                if status != Status::Failure {
                    registration.last_action = Some(now);
                }
                if !status.is_running() {
                    registration.tree.reset();
                }
                registration.pending = parts.pending;
                report.evaluated.push((id, status));
            }
            Err(payload) => {
                tracing::error!(
                    actor = %id,
                    tree = registration.tree.name(),
                    "evaluation panicked: {}",
                    panic_message(payload.as_ref())
                );
                registration.tree.reset();
                registration.pending = None;
                report.failed.push(id);
            }
        }

        for outcome in parts.outcomes {
            if let Some(defeated) = outcome.defeated {
                report.defeats.push((defeated, outcome.actor));
            }
            report.outcomes.push(outcome);
        }
    }

    /// Performs one decision and action for `id` against `target` right now.
    ///
    /// Bypasses the cooldown and any wind-up; the registration's own target,
    /// timestamp and in-flight cast are left unchanged.
    ///
    /// # Errors
    ///
    /// `NotRegistered`, `UnknownActor` for a missing actor or target, and
    /// `Defeated` when the acting actor is dead.
    pub fn force_action(
        &mut self,
        roster: &mut Roster<A>,
        id: ActorId,
        target: ActorId,
    ) -> Result<ActionOutcome> {
        if !self.registrations.contains_key(&id) {
            return Err(RuntimeError::NotRegistered(id));
        }
        match roster.get(id) {
            None => return Err(RuntimeError::UnknownActor(id)),
            Some(actor) if !actor.is_alive() => return Err(RuntimeError::Defeated(id)),
            Some(_) => {}
        }
        if !roster.contains(target) {
            return Err(RuntimeError::UnknownActor(target));
        }

        let actor = roster.remove(id).ok_or(RuntimeError::UnknownActor(id))?;
        let target_actor = if target == id {
            None
        } else {
            roster.remove(target)
        };

        let seed = self.rng.next_u64();
        let now = self
            .registrations
            .get(&id)
            .and_then(|r| r.last_action)
            .unwrap_or(0.0);
        let mut ctx = AiContext::new(actor, target_actor, self.rules.clone(), now, seed);
        let outcome = ctx.act_now();

        let parts = ctx.into_parts();
        roster.insert(parts.actor);
        if let Some(target) = parts.target {
            roster.insert(target);
        }

        if let Some(defeated) = outcome.defeated {
            self.notify_defeats(&[(defeated, outcome.actor)]);
        }
        Ok(outcome)
    }

    /// Reports a defeat that happened outside an action, such as a kill by
    /// periodic damage.
    ///
    /// Without a known `victor` the defeat is credited to an active
    /// registration targeting `defeated`. Returns the credited actor; the
    /// reward hook only fires when there is one.
    pub fn record_defeat(
        &mut self,
        defeated: ActorId,
        victor: Option<ActorId>,
    ) -> Option<ActorId> {
        let victor = victor.filter(|victor| *victor != defeated).or_else(|| {
            self.registrations
                .iter()
                .find(|(id, r)| **id != defeated && r.active && r.target == Some(defeated))
                .map(|(id, _)| *id)
        });
        match victor {
            Some(victor) => self.notify_defeats(&[(defeated, victor)]),
            None => tracing::info!(%defeated, "actor defeated; no one to credit"),
        }
        victor
    }

    fn notify_defeats(&mut self, defeats: &[(ActorId, ActorId)]) {
        for &(defeated, victor) in defeats {
            tracing::info!(%defeated, %victor, "actor defeated");
            if let Some(hook) = self.reward_hook.as_mut() {
                hook.on_defeat(defeated, victor);
            }
        }
    }
}

fn grant<A: Combatant>(actor: &mut A, def: &AbilityDef) {
    actor.abilities_mut().learn(def);
    tracing::info!(actor = %actor.id(), ability = %def.id, "granted starter ability");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
